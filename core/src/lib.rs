pub mod battery;
pub mod config;
pub mod error;
pub mod history;
pub mod ignition;
pub mod model;
pub mod suggestion;
pub mod types;

pub use error::{Error, Result};
