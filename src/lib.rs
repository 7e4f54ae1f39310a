pub mod cli;
pub mod config;
pub mod constants;
pub mod diagnostics;
pub mod inventory;
pub mod utils;
