pub mod stage0_locate;
pub mod stage1_normalize;
pub mod stage2_render;

pub use stage0_locate::*;
pub use stage1_normalize::*;
pub use stage2_render::*;
