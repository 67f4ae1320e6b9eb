pub mod error;
pub mod humanizer;
pub mod io;
pub mod llm;
pub mod models;
pub mod server;
pub mod stages;

pub use error::ConfigError;
pub use humanizer::{Humanizer, HumanizerConfig};
pub use io::{read_document, write_output};
pub use llm::{ChatClient, ChatCompletion, ChatConfig, rewrite_with_llm};
pub use models::{Engine, OutputMode, Outcome, PhraseTable, Rejection, UNPROCESSABLE_MESSAGE};
pub use server::{AppState, ServerConfig, build_router, serve};
pub use stages::{
    MergeConfig, QuirkConfig, ToneConfig, inject_quirks, inject_tone, render, split_paragraphs,
    split_sentences, vary_length,
};
