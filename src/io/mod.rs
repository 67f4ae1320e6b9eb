pub mod input;
pub mod output;
pub mod page;

pub use input::*;
pub use output::*;
pub use page::*;
