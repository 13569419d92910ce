pub mod config;
pub mod state;

pub mod actions;
pub mod cli;
pub mod events;
pub mod input_handler;
pub mod keys;
pub mod logging;
pub use state::*;
