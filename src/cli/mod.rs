mod command;
mod runner;
mod util;

pub use command::Command;
pub use runner::{Outcome, OutputMode, execute, normalizer_for, run, run_with_format};
