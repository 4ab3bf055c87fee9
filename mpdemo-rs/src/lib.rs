pub mod cli;
pub mod config;
pub mod gc;
pub mod host;
pub mod script;
