//! Memorization quizzes over the Qur'an.
//!
//! A [`Quiz`] session asks a [`Generator`] for questions in one of sixteen
//! [`Mode`]s, sampled from a [`Scope`] of the text. Verse text, translations,
//! juz boundaries and recitation timings come from a [`CorpusSource`] and are
//! cached on first use.

pub mod corpus;
pub mod error;
pub mod quiz;
pub mod reference;
pub mod settings;
pub mod text;

pub use corpus::{Corpus, CorpusSource, FileSource, Resource, Verse};
pub use error::{Error, Result};
pub use quiz::generator::Generator;
pub use quiz::mode::Mode;
pub use quiz::question::{Answer, AudioSegment, Metadata, Prompt, Question};
pub use quiz::scope::{Scope, SubRange};
pub use quiz::score::Score;
pub use quiz::Quiz;
pub use reference::{all_chapters, chapter_info, chapter_name, ChapterInfo, Reference};
pub use settings::{DataPaths, Settings};
