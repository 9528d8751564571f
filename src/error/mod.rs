use thiserror::Error;

use crate::config::SettingsError;
use crate::data::DataError;

#[derive(Error, Debug)]
pub enum SharecurveError {
    #[error("Error loading the dataset: {0}")]
    Data(#[from] DataError),
    #[error("Error in the configuration: {0}")]
    Settings(#[from] SettingsError),
    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}
