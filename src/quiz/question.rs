use itertools::Itertools;
use serde::Serialize;
use std::fmt;

pub use crate::corpus::AudioSegment;
use crate::quiz::mode::Mode;
use crate::reference::Reference;
use crate::text::{ordinal, sanitize, MASK};

pub const RECITATION_PROMPT: &str = "Listen to the ayat. What 2 ayat come next?";

const VERSE_SEPARATOR: &str = "\n\n";

/// What the player is shown.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case", tag = "kind", content = "content")]
pub enum Prompt {
    /// A verse with some of its words hidden.
    Masked(String),
    Verse(String),
    /// Consecutive verses, one of which is hidden.
    Blanked(Vec<Option<String>>),
    /// Consecutive verses out of order.
    Shuffled(Vec<String>),
    Passage(Vec<String>),
    /// Audio only, see [`Question::audio`].
    Recitation,
    Numbered(Vec<String>),
    Ordinal { position: u16, chapter_name: String },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case", tag = "kind", content = "content")]
pub enum Answer {
    Verse(String),
    Verses(Vec<String>),
    Translation(String),
    ChapterName(String),
    VerseNumber(u16),
    /// The verse that does not belong, `position` counting from 1.
    Intruder {
        position: usize,
        reference: Reference,
        text: String,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Metadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chapter_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verse_range: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_range: Option<String>,
    /// Where the verses that do belong come from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub companions: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Question {
    pub mode: Mode,
    pub reference: Reference,
    pub prompt: Prompt,
    pub answer: Answer,
    /// The verses the question is built from, in reading order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<Reference>,
    pub metadata: Metadata,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub audio: Vec<AudioSegment>,
}

impl Question {
    pub fn new(mode: Mode, reference: Reference, prompt: Prompt, answer: Answer) -> Self {
        Question {
            mode,
            reference,
            prompt,
            answer,
            references: Vec::new(),
            metadata: Metadata::default(),
            audio: Vec::new(),
        }
    }

    pub fn with_references(mut self, references: Vec<Reference>) -> Self {
        self.references = references;
        self
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn with_audio(mut self, audio: Vec<AudioSegment>) -> Self {
        self.audio = audio;
        self
    }

    /// One flag per answer verse: whether `arrangement` holds it at that
    /// position. Positions `arrangement` does not reach are `false`, extra
    /// entries are ignored. Empty unless the answer is an ordered list of
    /// verses.
    pub fn order_matches(&self, arrangement: &[String]) -> Vec<bool> {
        match &self.answer {
            Answer::Verses(verses) => verses
                .iter()
                .enumerate()
                .map(|(i, expected)| arrangement.get(i) == Some(expected))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Checks the prompt's own ordering, as shown before any rearranging.
    pub fn shown_order_matches(&self) -> Vec<bool> {
        match &self.prompt {
            Prompt::Shuffled(verses) => self.order_matches(verses),
            _ => Vec::new(),
        }
    }

    /// Grades a typed answer. `None` for answers a player grades themselves,
    /// such as reciting a verse.
    pub fn check_guess(&self, guess: &str) -> Option<bool> {
        let guess = sanitize(guess);
        match &self.answer {
            Answer::ChapterName(name) => Some(!guess.is_empty() && guess == sanitize(name)),
            Answer::VerseNumber(number) => Some(guess == number.to_string()),
            Answer::Intruder { position, .. } => Some(guess == position.to_string()),
            _ => None,
        }
    }
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prompt::Masked(text) | Prompt::Verse(text) => f.write_str(text),
            Prompt::Blanked(verses) => write!(
                f,
                "{}",
                verses
                    .iter()
                    .map(|v| v.as_deref().unwrap_or(MASK))
                    .join(VERSE_SEPARATOR)
            ),
            Prompt::Shuffled(verses) | Prompt::Passage(verses) => {
                write!(f, "{}", verses.join(VERSE_SEPARATOR))
            }
            Prompt::Recitation => f.write_str(RECITATION_PROMPT),
            Prompt::Numbered(verses) => write!(
                f,
                "{}",
                verses
                    .iter()
                    .enumerate()
                    .map(|(i, v)| format!("{}. {}", i + 1, v))
                    .join(VERSE_SEPARATOR)
            ),
            Prompt::Ordinal {
                position,
                chapter_name,
            } => write!(f, "What is the {} ayah of {}", ordinal(*position), chapter_name),
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::Verse(text) | Answer::Translation(text) | Answer::ChapterName(text) => {
                f.write_str(text)
            }
            Answer::Verses(verses) => write!(f, "{}", verses.join(VERSE_SEPARATOR)),
            Answer::VerseNumber(number) => write!(f, "{}", number),
            Answer::Intruder { position, text, .. } => {
                write!(f, "Ayah {} doesn't belong{}{}", position, VERSE_SEPARATOR, text)
            }
        }
    }
}
