//! Output sinks for recorded readings.

mod console;
mod csv;
mod writer;

pub use console::ConsoleEcho;
pub use csv::CsvLog;
pub use writer::ReadingSink;
