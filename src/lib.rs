pub mod cleaner;
pub mod error;
pub mod file_utils;
pub mod logger;
pub mod metadata;
pub mod tags;

pub use cleaner::{FileOutcome, TagCleaner};
pub use error::{CleanError, TagError};
pub use logger::{OutputFormat, ReportConfig, Reporter};
pub use metadata::Id3Backend;
