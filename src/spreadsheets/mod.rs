pub mod exceptions_xlsx;

pub use exceptions_xlsx::{export_exceptions_xlsx, ExceptionRow};
