//! `apptracker` - Personal tracker for college transfer applications
//!
//! This library provides the record types, the file-backed application store,
//! and the text formatting used by the `apptrack` command-line tool.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod application;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod shell;
pub mod store;

pub use application::{CollegeApplication, Recommender, RenderOptions};
pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use store::{ApplicationStore, JsonFileBackend, MemoryBackend, Persistence, StoreStats};
