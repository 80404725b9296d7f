use anyhow::{anyhow, bail, Context, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashMap;

use crate::reference::{is_valid_chapter, Reference};

#[derive(Deserialize)]
struct RawVerse {
    surah: u16,
    ayah: u16,
    text: String,
}

#[derive(Deserialize)]
struct RawTranslation {
    t: String,
}

#[derive(Deserialize)]
struct RawAudioSource {
    audio_url: String,
}

#[derive(Deserialize)]
struct RawTimestamp {
    timestamp_from: u64,
    timestamp_to: u64,
}

/// Juz number, start surah, start ayah, end surah, end ayah.
type RawSection = (u8, u16, u16, u16, u16);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SectionRange {
    pub number: u8,
    pub start: Reference,
    pub end: Reference,
}

impl From<RawSection> for SectionRange {
    fn from(raw: RawSection) -> Self {
        let (number, start_chapter, start_verse, end_chapter, end_verse) = raw;
        SectionRange {
            number,
            start: Reference::new(start_chapter, start_verse),
            end: Reference::new(end_chapter, end_verse),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timestamp {
    pub start_millis: u64,
    pub end_millis: u64,
}

pub type ArabicTable = HashMap<Reference, String>;
pub type TranslationTable = HashMap<Reference, String>;
pub type AudioSourceTable = HashMap<u16, String>;
pub type TimestampTable = HashMap<Reference, Timestamp>;

fn parse_keyed<T: DeserializeOwned>(document: &str) -> Result<Vec<(Reference, T)>> {
    let raw: HashMap<String, T> = serde_json::from_str(document)?;
    raw.into_iter()
        .map(|(key, value)| {
            let reference = key.parse::<Reference>()?;
            Ok((reference, value))
        })
        .collect()
}

pub fn parse_arabic(document: &str) -> Result<ArabicTable> {
    let mut table = HashMap::new();
    for (reference, verse) in parse_keyed::<RawVerse>(document)? {
        if reference != Reference::new(verse.surah, verse.ayah) {
            bail!(
                "verse {} is filed under key {}",
                Reference::new(verse.surah, verse.ayah),
                reference
            );
        }
        table.insert(reference, verse.text);
    }
    Ok(table)
}

pub fn parse_translation(document: &str) -> Result<TranslationTable> {
    Ok(parse_keyed::<RawTranslation>(document)?
        .into_iter()
        .map(|(reference, translation)| (reference, translation.t))
        .collect())
}

pub fn parse_sections(document: &str) -> Result<Vec<SectionRange>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(document.as_bytes());
    let mut sections = Vec::new();
    for row in csv_reader.deserialize() {
        let raw_section: RawSection = row?;
        let section = SectionRange::from(raw_section);
        if section.start > section.end {
            bail!(
                "juz {} starts at {} after its end {}",
                section.number,
                section.start,
                section.end
            );
        }
        sections.push(section);
    }
    sections.sort_by_key(|s| s.number);
    Ok(sections)
}

pub fn parse_audio_sources(document: &str) -> Result<AudioSourceTable> {
    let raw: HashMap<String, RawAudioSource> = serde_json::from_str(document)?;
    raw.into_iter()
        .map(|(key, source)| {
            let chapter: u16 = key
                .trim()
                .parse()
                .with_context(|| format!("invalid surah number {:?}", key))?;
            if !is_valid_chapter(chapter) {
                return Err(anyhow!("invalid surah number {}", chapter));
            }
            Ok((chapter, source.audio_url))
        })
        .collect()
}

pub fn parse_timestamps(document: &str) -> Result<TimestampTable> {
    Ok(parse_keyed::<RawTimestamp>(document)?
        .into_iter()
        .map(|(reference, raw)| {
            let timestamp = Timestamp {
                start_millis: raw.timestamp_from,
                end_millis: raw.timestamp_to,
            };
            (reference, timestamp)
        })
        .collect())
}
