use rand::Rng;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, trace, warn};

use crate::error::{Error, Result};
use crate::quiz::scope::{Scope, SubRange};
use crate::reference::Reference;

mod cache;
#[cfg(test)]
pub mod mock;
mod source;
mod tables;

use self::cache::Cached;
use self::tables::*;

pub use self::source::{CorpusSource, FileSource, Resource};
pub use self::tables::{SectionRange, Timestamp};

#[cfg(test)]
mod tests;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Verse {
    pub reference: Reference,
    pub arabic: String,
    pub english: String,
}

impl Verse {
    pub fn chapter(&self) -> u16 {
        self.reference.chapter
    }

    pub fn verse(&self) -> u16 {
        self.reference.verse
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AudioSegment {
    pub start_millis: u64,
    pub end_millis: u64,
    pub audio_url: String,
}

struct Tables<S> {
    source: S,
    arabic: Cached<ArabicTable>,
    translation: Cached<TranslationTable>,
    sections: Cached<Vec<SectionRange>>,
    audio_sources: Cached<AudioSourceTable>,
    timestamps: Cached<TimestampTable>,
}

/// Read-only access to the text, translation, juz and recitation data.
///
/// Each source is fetched at most once per successful load; clones share the
/// same caches.
pub struct Corpus<S> {
    tables: Arc<Tables<S>>,
}

impl<S> Clone for Corpus<S> {
    fn clone(&self) -> Self {
        Corpus {
            tables: Arc::clone(&self.tables),
        }
    }
}

fn load<S, T>(
    source: &S,
    cache: &Cached<T>,
    resource: Resource,
    parse: fn(&str) -> anyhow::Result<T>,
    count: fn(&T) -> usize,
) -> Result<Arc<T>>
where
    S: CorpusSource,
{
    cache
        .get_or_load(|| -> anyhow::Result<T> {
            match source.fetch(resource).and_then(|document| parse(&document)) {
                Ok(table) => {
                    info!("Loaded {} ({} entries)", resource, count(&table));
                    Ok(table)
                }
                Err(e) => {
                    warn!("Could not load {}: {:#}", resource, e);
                    Err(e)
                }
            }
        })
        .map_err(|cause| Error::DataLoad { resource, cause })
}

impl<S: CorpusSource> Corpus<S> {
    pub fn new(source: S) -> Self {
        Corpus {
            tables: Arc::new(Tables {
                source,
                arabic: Cached::new(),
                translation: Cached::new(),
                sections: Cached::new(),
                audio_sources: Cached::new(),
                timestamps: Cached::new(),
            }),
        }
    }

    fn arabic(&self) -> Result<Arc<ArabicTable>> {
        let tables = &*self.tables;
        load(
            &tables.source,
            &tables.arabic,
            Resource::ArabicText,
            parse_arabic,
            |t| t.len(),
        )
    }

    fn translation(&self) -> Result<Arc<TranslationTable>> {
        let tables = &*self.tables;
        load(
            &tables.source,
            &tables.translation,
            Resource::Translation,
            parse_translation,
            |t| t.len(),
        )
    }

    pub fn sections(&self) -> Result<Arc<Vec<SectionRange>>> {
        let tables = &*self.tables;
        load(
            &tables.source,
            &tables.sections,
            Resource::Sections,
            parse_sections,
            |t| t.len(),
        )
    }

    fn audio_sources(&self) -> Result<Arc<AudioSourceTable>> {
        let tables = &*self.tables;
        load(
            &tables.source,
            &tables.audio_sources,
            Resource::AudioSources,
            parse_audio_sources,
            |t| t.len(),
        )
    }

    fn timestamps(&self) -> Result<Arc<TimestampTable>> {
        let tables = &*self.tables;
        load(
            &tables.source,
            &tables.timestamps,
            Resource::Timestamps,
            parse_timestamps,
            |t| t.len(),
        )
    }

    /// Loads the text, translation and juz tables ahead of the first question.
    pub fn preload(&self) -> Result<()> {
        self.arabic()?;
        self.translation()?;
        self.sections()?;
        Ok(())
    }

    pub fn is_loaded(&self, resource: Resource) -> bool {
        let tables = &*self.tables;
        match resource {
            Resource::ArabicText => tables.arabic.is_loaded(),
            Resource::Translation => tables.translation.is_loaded(),
            Resource::Sections => tables.sections.is_loaded(),
            Resource::AudioSources => tables.audio_sources.is_loaded(),
            Resource::Timestamps => tables.timestamps.is_loaded(),
        }
    }

    /// `None` when the Arabic text has no such verse. A missing translation
    /// gives an empty `english`.
    pub fn verse(&self, reference: Reference) -> Result<Option<Verse>> {
        let arabic = self.arabic()?;
        let translation = self.translation()?;
        Ok(arabic.get(&reference).map(|text| Verse {
            reference,
            arabic: text.clone(),
            english: translation.get(&reference).cloned().unwrap_or_default(),
        }))
    }

    /// All the verses, or `None` if any one of them is missing.
    pub fn verses(&self, references: &[Reference]) -> Result<Option<Vec<Verse>>> {
        let mut verses = Vec::with_capacity(references.len());
        for reference in references {
            match self.verse(*reference)? {
                Some(verse) => verses.push(verse),
                None => return Ok(None),
            }
        }
        Ok(Some(verses))
    }

    pub fn section_range(&self, number: u8) -> Result<SectionRange> {
        self.sections()?
            .iter()
            .find(|s| s.number == number)
            .copied()
            .ok_or_else(|| Error::NotFound(format!("Juz {}", number)))
    }

    /// Recitation segment for a verse, if both its surah audio and its
    /// timestamps are known.
    pub fn audio_segment(&self, reference: Reference) -> Result<Option<AudioSegment>> {
        let audio_sources = self.audio_sources()?;
        let timestamps = self.timestamps()?;
        let audio_url = audio_sources.get(&reference.chapter);
        let timestamp = timestamps.get(&reference);
        Ok(match (audio_url, timestamp) {
            (Some(audio_url), Some(timestamp)) => Some(AudioSegment {
                start_millis: timestamp.start_millis,
                end_millis: timestamp.end_millis,
                audio_url: audio_url.clone(),
            }),
            _ => None,
        })
    }

    /// A uniformly chosen verse within the scope.
    pub fn random_reference<R: Rng + ?Sized>(
        &self,
        scope: Scope,
        sub_range: Option<SubRange>,
        rng: &mut R,
    ) -> Result<Reference> {
        let span = scope.resolve(sub_range, self)?;
        let reference = span.choose(rng);
        trace!("Sampled {} from {}", reference, span);
        Ok(reference)
    }
}
