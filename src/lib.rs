// Library exports for the binary and integration tests

pub mod config;
pub mod converter;
pub mod error;
pub mod events;
pub mod logging;
pub mod scanner;
pub mod table;

pub use converter::{convert_directory, ConversionSummary};
pub use error::ConverterError;
