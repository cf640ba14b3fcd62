//! Presenter lifecycle and the public contracts around it.

mod app;
mod config;
mod error;
mod presenter;

pub use app::AppControl;
pub use config::PresenterConfig;
pub use error::Error;
pub use presenter::Presenter;
