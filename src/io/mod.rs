pub mod docx;
pub mod input;
pub mod output;

pub use docx::*;
pub use input::*;
pub use output::*;
