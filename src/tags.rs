use crate::error::TagError;
use std::path::Path;

/// Field key for the recording date / year.
pub const DATE_KEY: &str = "date";

/// Mapping-like view over a file's tag container.
pub trait TagAccess {
    fn contains_key(&self, key: &str) -> bool;

    /// Returns true if anything was removed.
    fn delete_key(&mut self, key: &str) -> bool;

    /// Write the in-memory container back to the file it was loaded from.
    fn persist(&mut self) -> Result<(), TagError>;
}

/// Result of trying to open a file's tag container.
#[derive(Debug)]
pub enum LoadOutcome<T> {
    Loaded(T),
    NoHeader,
    Corrupt(String),
}

/// A tagging library binding the cleaner can drive.
pub trait TagBackend {
    type Tags: TagAccess;

    fn open(&self, path: &Path) -> LoadOutcome<Self::Tags>;

    /// Create an empty standard tag header on `path` and persist it.
    fn initialize_header(&self, path: &Path) -> Result<(), TagError>;
}

/// Open the tags of `path`, initializing a header first when none can be read.
///
/// Any open failure (missing or corrupt header) gets exactly one initialization
/// attempt. A corrupt header whose initialization fails is reported with the
/// reason it could not be read.
pub fn load_tags<B: TagBackend>(backend: &B, path: &Path) -> Result<B::Tags, TagError> {
    let corrupt_reason = match backend.open(path) {
        LoadOutcome::Loaded(tags) => return Ok(tags),
        LoadOutcome::NoHeader => None,
        LoadOutcome::Corrupt(reason) => Some(reason),
    };

    if let Err(e) = backend.initialize_header(path) {
        return Err(match corrupt_reason {
            Some(reason) => TagError::Corrupt {
                path: path.to_path_buf(),
                reason,
            },
            None => e,
        });
    }

    match backend.open(path) {
        LoadOutcome::Loaded(tags) => Ok(tags),
        LoadOutcome::NoHeader => Err(TagError::Unloadable {
            path: path.to_path_buf(),
            reason: "no tag header".to_string(),
        }),
        LoadOutcome::Corrupt(reason) => Err(TagError::Unloadable {
            path: path.to_path_buf(),
            reason,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    struct FakeTags;

    impl TagAccess for FakeTags {
        fn contains_key(&self, _key: &str) -> bool {
            false
        }

        fn delete_key(&mut self, _key: &str) -> bool {
            false
        }

        fn persist(&mut self) -> Result<(), TagError> {
            Ok(())
        }
    }

    /// Replays a fixed sequence of open results.
    struct ScriptedBackend {
        opens: RefCell<Vec<LoadOutcome<FakeTags>>>,
        init_fails: bool,
        inits: Cell<u32>,
    }

    impl ScriptedBackend {
        fn new(mut opens: Vec<LoadOutcome<FakeTags>>, init_fails: bool) -> Self {
            opens.reverse();
            Self {
                opens: RefCell::new(opens),
                init_fails,
                inits: Cell::new(0),
            }
        }
    }

    impl TagBackend for ScriptedBackend {
        type Tags = FakeTags;

        fn open(&self, _path: &Path) -> LoadOutcome<FakeTags> {
            self.opens.borrow_mut().pop().expect("unexpected open")
        }

        fn initialize_header(&self, path: &Path) -> Result<(), TagError> {
            self.inits.set(self.inits.get() + 1);
            if self.init_fails {
                Err(TagError::NotMpegAudio {
                    path: path.to_path_buf(),
                })
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn test_loaded_does_not_initialize() {
        let backend = ScriptedBackend::new(vec![LoadOutcome::Loaded(FakeTags)], false);
        assert!(load_tags(&backend, Path::new("a.mp3")).is_ok());
        assert_eq!(backend.inits.get(), 0);
    }

    #[test]
    fn test_no_header_initializes_then_reopens() {
        let backend = ScriptedBackend::new(
            vec![LoadOutcome::NoHeader, LoadOutcome::Loaded(FakeTags)],
            false,
        );
        assert!(load_tags(&backend, Path::new("b.mp3")).is_ok());
        assert_eq!(backend.inits.get(), 1);
    }

    #[test]
    fn test_corrupt_also_attempts_initialization() {
        let backend = ScriptedBackend::new(
            vec![
                LoadOutcome::Corrupt("bad frame".to_string()),
                LoadOutcome::Loaded(FakeTags),
            ],
            false,
        );
        assert!(load_tags(&backend, Path::new("c.mp3")).is_ok());
        assert_eq!(backend.inits.get(), 1);
    }

    #[test]
    fn test_initialization_failure_propagates() {
        let backend = ScriptedBackend::new(vec![LoadOutcome::NoHeader], true);
        let err = load_tags(&backend, Path::new("c.mp3")).err().unwrap();
        assert!(matches!(err, TagError::NotMpegAudio { .. }));
    }

    #[test]
    fn test_corrupt_header_failure_keeps_read_reason() {
        let backend = ScriptedBackend::new(
            vec![LoadOutcome::Corrupt("unknown encoding".to_string())],
            true,
        );
        let err = load_tags(&backend, Path::new("c.mp3")).err().unwrap();
        match err {
            TagError::Corrupt { reason, .. } => assert_eq!(reason, "unknown encoding"),
            other => panic!("unexpected error: {}", other),
        }
        assert_eq!(backend.inits.get(), 1);
    }

    #[test]
    fn test_reopen_failure_is_unloadable() {
        let backend = ScriptedBackend::new(
            vec![
                LoadOutcome::NoHeader,
                LoadOutcome::Corrupt("still broken".to_string()),
            ],
            false,
        );
        let err = load_tags(&backend, Path::new("d.mp3")).err().unwrap();
        match err {
            TagError::Unloadable { reason, .. } => assert_eq!(reason, "still broken"),
            other => panic!("unexpected error: {}", other),
        }
    }
}
