pub mod config;
pub mod error;
pub mod market;
pub mod ui;
pub mod view;

pub use config::ViewConfig;
pub use error::ViewError;
