//! Domain model: levels, records, formatting and errors.

pub mod errors;
pub mod formatter;
pub mod level;
pub mod record;

pub use self::errors::LogError;
pub use self::formatter::Formatter;
pub use self::level::{Level, is_enabled};
pub use self::record::LogRecord;
