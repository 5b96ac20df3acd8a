pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod event;
pub mod model;
pub mod ui;
pub mod wizard;
pub mod workflows;

pub use error::{PostdeckError, Result};
