// Terminal surface of the console
pub mod commands;
pub mod output;
pub mod terminal;

pub use terminal::{run, shared_stdin, SharedLines, TerminalConfirmer};
