//! Error types for the importer

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ImportError {
    #[error("File {name:?} has no locator")]
    EmptyLocator { name: String },
}
