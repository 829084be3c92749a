// Media command assembly
//
// - Commands: transcoder command lines as token lists
// - Job: probed streams plus registered filters, rendered into commands

pub mod commands;
pub mod job;

pub use commands::*;
pub use job::*;
