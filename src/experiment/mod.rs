pub mod app;
pub mod config;
pub mod error;
pub mod layout;
pub mod participant;
pub mod report;
pub mod sequence;

pub use app::{App, InputEvent, Screen, Signal};
pub use config::ExperimentConfig;
pub use error::ExperimentError;
