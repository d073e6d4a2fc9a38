//! Shot-division text parsing.
//!
//! The second narrative call returns a loosely structured, markdown-like script.
//! The grammar accepted here is intentionally narrow:
//!
//! ```text
//! **Shot <id>: <title>**
//! * bullet text
//! * more bullet text
//! ```
//!
//! Every other line is ignored. A marker line that does not carry an
//! identifier token is rejected instead of being guessed at, and so is an
//! identifier that could not be used as part of a file name.

use std::fmt;

use serde::Serialize;
use serde::ser::SerializeMap;
use thiserror::Error;

/// Literal prefix that opens a new shot block.
pub const SHOT_MARKER: &str = "**Shot";

const BULLET: char = '*';

const PATH_SEPARATORS: [char; 2] = ['/', '\\'];

/// Parser-owned failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShotDivisionError {
    /// A marker line has no identifier token after `Shot`.
    #[error("Malformed shot header on line {line_number}: '{line}'")]
    MalformedShotHeader { line_number: usize, line: String },

    /// The identifier contains a path separator.
    #[error("Shot id '{id}' on line {line_number} cannot be used in a file name")]
    UnsafeShotId { line_number: usize, id: String },
}

/// Opaque shot identifier taken verbatim from a marker line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ShotId(String);

impl ShotId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One parsed shot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shot {
    pub id: ShotId,
    pub description: String,
}

/// Ordered mapping from shot identifier to description.
///
/// Entries keep the position of their first insertion. Inserting an existing
/// identifier replaces its description in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShotList {
    shots: Vec<Shot>,
}

impl ShotList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the description for `id`.
    pub fn insert(&mut self, id: ShotId, description: String) {
        match self.shots.iter_mut().find(|shot| shot.id == id) {
            Some(existing) => existing.description = description,
            None => self.shots.push(Shot { id, description }),
        }
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.shots.iter().find(|shot| shot.id.as_str() == id).map(|shot| shot.description.as_str())
    }

    pub fn len(&self) -> usize {
        self.shots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Shot> {
        self.shots.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &ShotId> {
        self.shots.iter().map(|shot| &shot.id)
    }
}

impl<'a> IntoIterator for &'a ShotList {
    type Item = &'a Shot;
    type IntoIter = std::slice::Iter<'a, Shot>;

    fn into_iter(self) -> Self::IntoIter {
        self.shots.iter()
    }
}

impl Serialize for ShotList {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.shots.len()))?;
        for shot in &self.shots {
            map.serialize_entry(shot.id.as_str(), &shot.description)?;
        }
        map.end()
    }
}

/// Parse shot-division text into an ordered shot list.
///
/// Single pass, line oriented. Bullets before the first marker and any
/// non-bullet line are dropped.
pub fn parse_shot_division(text: &str) -> Result<ShotList, ShotDivisionError> {
    let mut shots = ShotList::new();
    let mut current_id: Option<ShotId> = None;
    let mut current_lines: Vec<&str> = Vec::new();

    for (index, raw_line) in text.lines().enumerate() {
        let line = raw_line.trim();

        if line.starts_with(SHOT_MARKER) {
            if let Some(id) = current_id.take() {
                shots.insert(id, current_lines.join(" "));
            }
            let id = extract_shot_id(line).ok_or_else(|| {
                ShotDivisionError::MalformedShotHeader {
                    line_number: index + 1,
                    line: line.to_string(),
                }
            })?;
            if id.as_str().contains(PATH_SEPARATORS) {
                return Err(ShotDivisionError::UnsafeShotId {
                    line_number: index + 1,
                    id: id.as_str().to_string(),
                });
            }
            current_id = Some(id);
            current_lines.clear();
        } else if current_id.is_some()
            && let Some(bullet) = line.strip_prefix(BULLET)
        {
            current_lines.push(bullet.trim_start());
        }
    }

    if let Some(id) = current_id {
        shots.insert(id, current_lines.join(" "));
    }

    Ok(shots)
}

/// `**Shot 3: The Chase**` -> `3`.
fn extract_shot_id(line: &str) -> Option<ShotId> {
    let header = line.split(':').next().unwrap_or(line);
    let header: String = header.chars().filter(|c| *c != BULLET).collect();
    header.split_whitespace().nth(1).map(ShotId::new)
}
