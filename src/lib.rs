// src/lib.rs

pub mod config;
pub mod error;
pub mod llm;
pub mod repl;
pub mod schema;
pub mod server;
