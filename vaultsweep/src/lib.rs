// src/lib.rs
pub mod analyzer;
pub mod calendar;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod logging;
pub mod models;
pub mod reports;
pub mod transforms;
pub mod utils;

pub use cli::{Args, run};
