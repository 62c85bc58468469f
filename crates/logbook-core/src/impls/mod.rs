//! Handler implementations.

mod sink;

pub mod console;
pub mod file;
pub mod writer;

pub use self::console::ConsoleHandler;
pub use self::file::{FileHandler, FileMode};
pub use self::writer::WriterHandler;
