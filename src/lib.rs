pub mod app;
pub mod display;
pub mod error;
pub mod locale;
pub mod ui;
pub mod util;

pub use error::{Error, Result};
