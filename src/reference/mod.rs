use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

mod chapters;

pub use chapters::{
    all_chapters, at_position, chapter_info, chapter_name, first_verse, is_valid_chapter,
    last_verse, position, verse_count, ChapterInfo, CHAPTER_COUNT,
};


/// A verse of the Qur'an, ordered by surah then ayah.
///
/// Nothing checks that `verse` fits the surah; callers build references from
/// the chapter table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Reference {
    pub chapter: u16,
    pub verse: u16,
}

impl Reference {
    pub const FIRST: Reference = Reference {
        chapter: 1,
        verse: 1,
    };
    pub const LAST: Reference = Reference {
        chapter: CHAPTER_COUNT,
        verse: 6,
    };

    pub const fn new(chapter: u16, verse: u16) -> Self {
        Reference { chapter, verse }
    }

    pub fn parts(&self) -> (u16, u16) {
        (self.chapter, self.verse)
    }

    pub fn is_last_of_chapter(&self) -> bool {
        self.verse >= verse_count(self.chapter)
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.chapter, self.verse)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Malformed verse key: {0:?}")]
pub struct ParseReferenceError(String);

impl FromStr for Reference {
    type Err = ParseReferenceError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        let malformed = || ParseReferenceError(key.to_owned());
        let (chapter, verse) = key.trim().split_once(':').ok_or_else(malformed)?;
        let chapter = chapter.parse().map_err(|_| malformed())?;
        let verse = verse.parse().map_err(|_| malformed())?;
        Ok(Reference::new(chapter, verse))
    }
}

impl Serialize for Reference {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Reference {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let key = String::deserialize(deserializer)?;
        key.parse().map_err(|_| {
            de::Error::invalid_value(de::Unexpected::Str(&key), &"a verse key like 2:255")
        })
    }
}

pub fn next(reference: Reference) -> Option<Reference> {
    if reference.is_last_of_chapter() {
        if reference.chapter >= CHAPTER_COUNT {
            return None;
        }
        return Some(first_verse(reference.chapter + 1));
    }
    Some(Reference::new(reference.chapter, reference.verse + 1))
}

pub fn prev(reference: Reference) -> Option<Reference> {
    if reference.verse <= 1 {
        if reference.chapter <= 1 {
            return None;
        }
        return Some(last_verse(reference.chapter - 1));
    }
    Some(Reference::new(reference.chapter, reference.verse - 1))
}

/// Every reference from `start` to `end`, both included.
///
/// Stops as soon as the walk passes `end`, so a backwards range yields
/// `[start]` instead of running to the end of the Qur'an.
pub fn all_in_range(start: Reference, end: Reference) -> Vec<Reference> {
    let mut references = Vec::new();
    let mut current = Some(start);
    while let Some(reference) = current {
        references.push(reference);
        if reference >= end {
            break;
        }
        current = next(reference).filter(|n| *n <= end);
    }
    references
}

/// Up to `count` references starting at `start`, never past `ceiling`.
pub fn consecutive(start: Reference, count: usize, ceiling: Option<Reference>) -> Vec<Reference> {
    let mut references = Vec::with_capacity(count);
    if count == 0 {
        return references;
    }
    references.push(start);
    let mut current = start;
    while references.len() < count {
        let candidate = match next(current) {
            Some(c) => c,
            None => break,
        };
        if ceiling.map_or(false, |ceiling| candidate > ceiling) {
            break;
        }
        references.push(candidate);
        current = candidate;
    }
    references
}

/// `"2:5 – 2:7"`, or just `"2:5"` for a single reference.
pub fn describe_run(references: &[Reference]) -> String {
    match (references.first(), references.last()) {
        (Some(first), Some(last)) if first != last => format!("{} – {}", first, last),
        (Some(first), _) => first.to_string(),
        _ => String::new(),
    }
}
