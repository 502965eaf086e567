use std::path::PathBuf;
use thiserror::Error;

/// Failure to bring a single file's tag into a loadable, writable state.
#[derive(Error, Debug)]
pub enum TagError {
    #[error("{0}")]
    Id3(#[from] id3::Error),

    #[error("{0}")]
    Lofty(#[from] lofty::error::LoftyError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unreadable tag in {}: {reason}", path.display())]
    Corrupt { path: PathBuf, reason: String },

    #[error("{} already has an ID3v2 header", path.display())]
    HeaderPresent { path: PathBuf },

    #[error("{} is not MPEG audio", path.display())]
    NotMpegAudio { path: PathBuf },

    #[error("tags still unreadable after header initialization of {}: {reason}", path.display())]
    Unloadable { path: PathBuf, reason: String },
}

/// Failures that abort a whole batch.
#[derive(Error, Debug)]
pub enum CleanError {
    #[error("cannot list directory {}: {source}", path.display())]
    ListDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
