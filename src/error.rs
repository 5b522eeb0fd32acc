//! Error handling for pyskel.
//! Policy refusals (existing directory, existing file) and missing optional
//! resources are not errors; they are reported through outcome values.
//! Everything in this enum is fatal for the generator that hit it.

use std::io;
use thiserror::Error;

/// Custom error types for pyskel operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// A generated file could not be written or synced
    #[error("Failed to write '{path}': {source}.")]
    WriteError {
        path: String,
        #[source]
        source: io::Error,
    },

    /// Reading the git configuration failed
    #[error("Git error: {0}.")]
    Git2Error(#[from] git2::Error),

    /// The project directory argument cannot be used
    #[error("Invalid project directory: '{0}'.")]
    ProjectDirError(String),
}

/// Convenience type alias for Results with pyskel's Error as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) -> ! {
    eprintln!("{err}");
    std::process::exit(1);
}
