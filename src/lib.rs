pub mod config;
pub mod error;
pub mod fetch;
pub mod output;
pub mod process;

pub use config::{Cli, Config, Source};
pub use error::{IngestError, ValueKind};
pub use process::{extract_transform_data, DateParser, Dataset, Record};
