//! Printer implementations

pub mod console;

pub use console::ConsolePrinter;

pub use crate::core::Printer;
