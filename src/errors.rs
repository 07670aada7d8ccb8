// errors.rs
use std::fmt;

use crate::resolver::ResolverError;

/// Errors that can halt an address update run. Record-level problems
/// (ambiguous matches, invalid field data, missing GURAS records) are not
/// errors; they are classified outcomes that flow into the exception report.
#[derive(Debug)]
pub enum AppError {
    /// Neither the primary nor the secondary registry target answered.
    Connection(String),
    Db(String),
    Io(String),
    Xlsx(String),
    Resolver(String),
    /// The operator chose to abort at a failure prompt.
    Aborted,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Connection(msg) => write!(f, "Registry connection error: {msg}"),
            AppError::Db(msg) => write!(f, "Database error: {msg}"),
            AppError::Io(msg) => write!(f, "IO error: {msg}"),
            AppError::Xlsx(msg) => write!(f, "Spreadsheet error: {msg}"),
            AppError::Resolver(msg) => write!(f, "GURAS resolver error: {msg}"),
            AppError::Aborted => write!(f, "Aborted by operator"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<rusqlite::Error> for AppError {
    fn from(e: rusqlite::Error) -> Self {
        AppError::Db(e.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Io(e.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for AppError {
    fn from(e: rust_xlsxwriter::XlsxError) -> Self {
        AppError::Xlsx(e.to_string())
    }
}

impl From<ResolverError> for AppError {
    fn from(e: ResolverError) -> Self {
        match e {
            ResolverError::Aborted => AppError::Aborted,
            other => AppError::Resolver(other.to_string()),
        }
    }
}
