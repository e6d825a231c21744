pub mod payload;
pub mod transcript;

pub use payload::*;
pub use transcript::*;
