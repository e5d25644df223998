pub mod accumulator;
pub mod client;
pub mod constants;
pub mod event;
pub mod frame;
pub mod health;
pub mod logging;
pub mod main_helper;
pub mod prompt;
pub mod relay;
pub mod str_utils;
pub mod streaming;
pub mod types;

pub use types::*;

pub use main_helper::{AppState, Args, Command};
