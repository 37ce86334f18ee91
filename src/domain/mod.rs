pub mod console;
pub mod deployment;
