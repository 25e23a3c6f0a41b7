pub mod log_reader;
pub mod parser;

pub use log_reader::{InputError, LogFileReader};
pub use parser::LogLineParser;
