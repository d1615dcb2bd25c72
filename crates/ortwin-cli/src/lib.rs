//! Console front end for the ORTWIN procedure engine
//!
//! Thin by design: loads the materialized fact snapshot, constraint rules,
//! and sensor replay from a data directory, then feeds triggers into the
//! core controller from a timer or the keyboard.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod console;
pub mod data;
pub mod driver;

pub use console::StdConsole;
pub use data::{load_data_dir, DataSet};
pub use driver::{run_interactive, run_timed, Trigger};
