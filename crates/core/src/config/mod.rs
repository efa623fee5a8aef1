//! Configuration file loading

pub mod settings;

pub use settings::{CONFIG_FILE_NAMES, Config, InterpreterEntry};
