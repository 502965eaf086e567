use crate::error::TagError;
use crate::tags::{LoadOutcome, TagAccess, TagBackend, DATE_KEY};
use id3::{ErrorKind, Tag, TagLike, Version};
use lofty::config::{ParseOptions, WriteOptions};
use lofty::file::{FileType, TaggedFileExt};
use lofty::probe::Probe;
use lofty::tag::{Accessor, TagExt, TagType};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Frames holding the recording date: TDRC in ID3v2.4, TYER/TDAT/TIME in ID3v2.3.
const DATE_FRAMES: [&str; 4] = ["TDRC", "TYER", "TDAT", "TIME"];

fn frames_for_key(key: &str) -> &'static [&'static str] {
    match key {
        DATE_KEY => &DATE_FRAMES,
        _ => &[],
    }
}

/// ID3v2 tag of one file plus the year of a trailing ID3v1 tag, bound to the file's path.
pub struct Id3Tags {
    path: PathBuf,
    tag: Tag,
    version: Version,
    v1_year: Option<String>,
    v1_dirty: bool,
}

impl TagAccess for Id3Tags {
    fn contains_key(&self, key: &str) -> bool {
        let in_v1 = key == DATE_KEY && self.v1_year.is_some();
        in_v1 || frames_for_key(key).iter().any(|id| self.tag.get(id).is_some())
    }

    fn delete_key(&mut self, key: &str) -> bool {
        let mut removed = 0;
        for id in frames_for_key(key) {
            removed += self.tag.remove(id).len();
        }
        if key == DATE_KEY && self.v1_year.take().is_some() {
            self.v1_dirty = true;
            removed += 1;
        }
        removed > 0
    }

    fn persist(&mut self) -> Result<(), TagError> {
        self.tag.write_to_path(&self.path, self.version)?;
        if self.v1_dirty {
            clear_v1_year(&self.path)?;
            self.v1_dirty = false;
        }
        Ok(())
    }
}

/// Non-empty year of the file's ID3v1 tag, if it has one.
fn read_v1_year(path: &Path) -> Option<String> {
    let v1 = id3::v1::Tag::read_from_path(path).ok()?;
    let year = v1.year.trim_matches(|c: char| c == '\0' || c.is_whitespace());
    (!year.is_empty()).then(|| year.to_string())
}

/// Rewrite the trailing ID3v1 tag without its year. The ID3v2 tag is left alone.
fn clear_v1_year(path: &Path) -> Result<(), TagError> {
    let mut tagged = Probe::open(path)?
        .options(ParseOptions::new().read_properties(false))
        .read()?;
    if let Some(v1) = tagged.tag_mut(TagType::Id3v1) {
        v1.remove_year();
        v1.save_to_path(path, WriteOptions::default())?;
    }
    Ok(())
}

/// Whether the file content (not its extension) identifies as MPEG audio.
fn is_mpeg_audio(path: &Path) -> Result<bool, TagError> {
    let reader = BufReader::new(File::open(path)?);
    let probe = Probe::new(reader).guess_file_type()?;
    Ok(probe.file_type() == Some(FileType::Mpeg))
}

/// `TagBackend` over the `id3` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct Id3Backend;

impl TagBackend for Id3Backend {
    type Tags = Id3Tags;

    fn open(&self, path: &Path) -> LoadOutcome<Id3Tags> {
        match Tag::read_from_path(path) {
            Ok(tag) => {
                // v2.2 can be read but not written
                let version = match tag.version() {
                    Version::Id3v22 => Version::Id3v23,
                    v => v,
                };
                LoadOutcome::Loaded(Id3Tags {
                    path: path.to_path_buf(),
                    tag,
                    version,
                    v1_year: read_v1_year(path),
                    v1_dirty: false,
                })
            }
            Err(e) if matches!(e.kind, ErrorKind::NoTag) => LoadOutcome::NoHeader,
            Err(e) => LoadOutcome::Corrupt(e.to_string()),
        }
    }

    /// Only ever creates a header where none exists; an unreadable ID3v2 tag is never replaced.
    fn initialize_header(&self, path: &Path) -> Result<(), TagError> {
        if Tag::is_candidate(File::open(path)?)? {
            return Err(TagError::HeaderPresent {
                path: path.to_path_buf(),
            });
        }
        if !is_mpeg_audio(path)? {
            return Err(TagError::NotMpegAudio {
                path: path.to_path_buf(),
            });
        }
        Tag::new().write_to_path(path, Version::Id3v24)?;
        Ok(())
    }
}
