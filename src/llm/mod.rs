pub mod cleanup;
pub mod client;
pub mod prompts;
pub mod rewrite;

pub use cleanup::*;
pub use client::*;
pub use prompts::*;
pub use rewrite::*;
