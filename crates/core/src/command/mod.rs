//! Install command representation and rendering

pub mod execution_args;

pub use execution_args::ExecutionArgs;
