pub mod header_case;

pub use header_case::*;
