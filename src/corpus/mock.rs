use anyhow::{anyhow, Result};
use parking_lot::RwLock;
use serde_json::{json, Map, Value};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use crate::corpus::{CorpusSource, Resource};
use crate::reference::{all_in_range, prev, Reference};

const JUZ_STARTS: [(u16, u16); 30] = [
    (1, 1),
    (2, 142),
    (2, 253),
    (3, 93),
    (4, 24),
    (4, 148),
    (5, 82),
    (6, 111),
    (7, 88),
    (8, 41),
    (9, 93),
    (11, 6),
    (12, 53),
    (15, 1),
    (17, 1),
    (18, 75),
    (21, 1),
    (23, 1),
    (25, 21),
    (27, 56),
    (29, 46),
    (33, 31),
    (36, 28),
    (39, 32),
    (41, 47),
    (46, 1),
    (51, 31),
    (58, 1),
    (67, 1),
    (78, 1),
];

/// Arabic text of a verse in the mock corpus: a tag followed by seven words.
pub fn mock_arabic(reference: Reference) -> String {
    format!(
        "v{}_{} alif ba ta tha jim ha kha",
        reference.chapter, reference.verse
    )
}

pub fn mock_english(reference: Reference) -> String {
    format!("Translation of {}", reference)
}

pub fn mock_audio_url(chapter: u16) -> String {
    format!("https://audio.example/{:03}.mp3", chapter)
}

/// In-memory corpus covering every verse, with knobs to remove data and to
/// make fetches fail or stall.
#[derive(Clone, Default)]
pub struct MockSource {
    fetches: Arc<RwLock<HashMap<Resource, usize>>>,
    failing: Arc<RwLock<HashSet<Resource>>>,
    missing_arabic: HashSet<Reference>,
    missing_translation: HashSet<Reference>,
    recited: Vec<Reference>,
    recited_chapters: HashSet<u16>,
    fetch_delay: Option<Duration>,
}

impl MockSource {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn without_arabic(mut self, reference: Reference) -> Self {
        self.missing_arabic.insert(reference);
        self
    }

    pub fn without_translation(mut self, reference: Reference) -> Self {
        self.missing_translation.insert(reference);
        self
    }

    /// Gives the verse a timestamp and its surah an audio file.
    pub fn with_recitation(mut self, reference: Reference) -> Self {
        self.recited.push(reference);
        self.recited_chapters.insert(reference.chapter);
        self
    }

    /// Gives the verse a timestamp but leaves its surah without audio.
    pub fn with_timestamp_only(mut self, reference: Reference) -> Self {
        self.recited.push(reference);
        self
    }

    pub fn with_fetch_delay(mut self, delay: Duration) -> Self {
        self.fetch_delay = Some(delay);
        self
    }

    pub fn fail(&self, resource: Resource) {
        self.failing.write().insert(resource);
    }

    pub fn recover(&self, resource: Resource) {
        self.failing.write().remove(&resource);
    }

    pub fn fetch_count(&self, resource: Resource) -> usize {
        self.fetches.read().get(&resource).copied().unwrap_or(0)
    }

    fn every_verse() -> Vec<Reference> {
        all_in_range(Reference::FIRST, Reference::LAST)
    }

    fn arabic_document(&self) -> String {
        let mut document = Map::new();
        for (id, reference) in Self::every_verse().into_iter().enumerate() {
            if self.missing_arabic.contains(&reference) {
                continue;
            }
            document.insert(
                reference.to_string(),
                json!({
                    "id": id + 1,
                    "verse_key": reference.to_string(),
                    "surah": reference.chapter,
                    "ayah": reference.verse,
                    "text": mock_arabic(reference),
                }),
            );
        }
        Value::Object(document).to_string()
    }

    fn translation_document(&self) -> String {
        let mut document = Map::new();
        for reference in Self::every_verse() {
            if self.missing_translation.contains(&reference) {
                continue;
            }
            document.insert(
                reference.to_string(),
                json!({ "t": mock_english(reference) }),
            );
        }
        Value::Object(document).to_string()
    }

    fn sections_document(&self) -> String {
        let mut lines = vec!["juz,start_surah,start_ayah,end_surah,end_ayah".to_owned()];
        for (i, (chapter, verse)) in JUZ_STARTS.iter().enumerate() {
            let end = match JUZ_STARTS.get(i + 1) {
                Some((c, v)) => prev(Reference::new(*c, *v)).unwrap_or(Reference::LAST),
                None => Reference::LAST,
            };
            lines.push(format!(
                "{},{},{},{},{}",
                i + 1,
                chapter,
                verse,
                end.chapter,
                end.verse
            ));
        }
        lines.join("\n")
    }

    fn audio_sources_document(&self) -> String {
        let mut document = Map::new();
        for chapter in &self.recited_chapters {
            document.insert(
                chapter.to_string(),
                json!({ "audio_url": mock_audio_url(*chapter) }),
            );
        }
        Value::Object(document).to_string()
    }

    fn timestamps_document(&self) -> String {
        let mut document = Map::new();
        for reference in &self.recited {
            let start = u64::from(reference.verse) * 10_000;
            document.insert(
                reference.to_string(),
                json!({ "timestamp_from": start, "timestamp_to": start + 9_000 }),
            );
        }
        Value::Object(document).to_string()
    }
}

impl CorpusSource for MockSource {
    fn fetch(&self, resource: Resource) -> Result<String> {
        *self.fetches.write().entry(resource).or_insert(0) += 1;
        if let Some(delay) = self.fetch_delay {
            std::thread::sleep(delay);
        }
        if self.failing.read().contains(&resource) {
            return Err(anyhow!("{} is unavailable", resource));
        }
        Ok(match resource {
            Resource::ArabicText => self.arabic_document(),
            Resource::Translation => self.translation_document(),
            Resource::Sections => self.sections_document(),
            Resource::AudioSources => self.audio_sources_document(),
            Resource::Timestamps => self.timestamps_document(),
        })
    }
}
