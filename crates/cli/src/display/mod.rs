pub mod formatter;

pub use formatter::{print_installers, print_plan, print_tracked_interpreters};
