pub mod document;
pub mod phrases;

pub use document::*;
pub use phrases::*;
