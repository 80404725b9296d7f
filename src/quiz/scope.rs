use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::corpus::{Corpus, CorpusSource};
use crate::error::{Error, Result};
use crate::reference::{
    at_position, first_verse, is_valid_chapter, last_verse, position, verse_count, Reference,
};

/// The part of the Qur'an questions are drawn from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Full,
    /// A juz, 1 to 30.
    Section(u8),
    /// A surah, 1 to 114.
    Chapter(u16),
}

/// Ayah numbers narrowing a [`Scope::Chapter`], both included.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubRange {
    pub start: u16,
    pub end: u16,
}

impl SubRange {
    pub fn new(start: u16, end: u16) -> Self {
        SubRange { start, end }
    }
}

/// Inclusive interval to sample from. Verse runs may not go past `ceiling`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Span {
    pub start: Reference,
    pub end: Reference,
    pub ceiling: Option<Reference>,
}

impl Span {
    pub fn contains(&self, reference: Reference) -> bool {
        self.start <= reference && reference <= self.end
    }

    pub fn is_single_chapter(&self) -> bool {
        self.start.chapter == self.end.chapter
    }

    /// A uniformly chosen verse of the span.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Reference {
        let first = position(self.start);
        let last = position(self.end).max(first);
        at_position(rng.gen_range(first, last + 1)).unwrap_or(self.start)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} – {}", self.start, self.end)
    }
}

impl Scope {
    pub fn is_chapter(&self) -> bool {
        matches!(self, Scope::Chapter(_))
    }

    /// The sub-range only applies to a surah scope; it is ignored otherwise.
    pub fn resolve<S: CorpusSource>(
        &self,
        sub_range: Option<SubRange>,
        corpus: &Corpus<S>,
    ) -> Result<Span> {
        match *self {
            Scope::Full => Ok(Span {
                start: Reference::FIRST,
                end: Reference::LAST,
                ceiling: None,
            }),
            Scope::Section(number) => {
                let range = corpus.section_range(number)?;
                Ok(Span {
                    start: range.start,
                    end: range.end,
                    ceiling: None,
                })
            }
            Scope::Chapter(chapter) => {
                if !is_valid_chapter(chapter) {
                    return Err(Error::NotFound(format!("Surah {}", chapter)));
                }
                match sub_range {
                    None => Ok(Span {
                        start: first_verse(chapter),
                        end: last_verse(chapter),
                        ceiling: None,
                    }),
                    Some(sub_range) => {
                        let count = verse_count(chapter);
                        let start = sub_range.start.clamp(1, count);
                        let end = sub_range.end.clamp(1, count);
                        if start > end {
                            return Err(Error::InvalidScope(format!(
                                "ayah range {}-{} is empty",
                                sub_range.start, sub_range.end
                            )));
                        }
                        let end = Reference::new(chapter, end);
                        Ok(Span {
                            start: Reference::new(chapter, start),
                            end,
                            ceiling: Some(end),
                        })
                    }
                }
            }
        }
    }
}
