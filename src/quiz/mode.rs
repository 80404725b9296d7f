use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::quiz::scope::Scope;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    Beginning,
    Ending,
    Missing,
    Reorder,
    Next,
    Previous,
    Partial,
    NextThree,
    Translation,
    GuessSurah,
    HelpImam,
    ChainingSurah,
    ChainingSurahReverse,
    AyahNumber,
    WhatDoesntBelong,
    WhatIsX,
}

impl Mode {
    pub const ALL: [Mode; 16] = [
        Mode::Beginning,
        Mode::Ending,
        Mode::Missing,
        Mode::Reorder,
        Mode::Next,
        Mode::Previous,
        Mode::Partial,
        Mode::NextThree,
        Mode::Translation,
        Mode::GuessSurah,
        Mode::HelpImam,
        Mode::ChainingSurah,
        Mode::ChainingSurahReverse,
        Mode::AyahNumber,
        Mode::WhatDoesntBelong,
        Mode::WhatIsX,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Mode::Beginning => "beginning",
            Mode::Ending => "ending",
            Mode::Missing => "missing",
            Mode::Reorder => "reorder",
            Mode::Next => "next",
            Mode::Previous => "previous",
            Mode::Partial => "partial",
            Mode::NextThree => "next-three",
            Mode::Translation => "translation",
            Mode::GuessSurah => "guess-surah",
            Mode::HelpImam => "help-imam",
            Mode::ChainingSurah => "chaining-surah",
            Mode::ChainingSurahReverse => "chaining-surah-reverse",
            Mode::AyahNumber => "ayah-number",
            Mode::WhatDoesntBelong => "what-doesnt-belong",
            Mode::WhatIsX => "what-is-x",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Mode::Beginning => "Beginning Completion",
            Mode::Ending => "Ending Completion",
            Mode::Missing => "Missing Verse",
            Mode::Reorder => "Order Rearrange",
            Mode::Next => "Next Ayah",
            Mode::Previous => "Previous Ayah",
            Mode::Partial => "Partial Reveal",
            Mode::NextThree => "Next 3 Ayat",
            Mode::Translation => "Translation",
            Mode::GuessSurah => "Guess Surah",
            Mode::HelpImam => "Help the Imam",
            Mode::ChainingSurah => "Chaining Surah",
            Mode::ChainingSurahReverse => "Chaining Surah Reverse",
            Mode::AyahNumber => "Ayah Number Guess",
            Mode::WhatDoesntBelong => "What Doesn't Belong",
            Mode::WhatIsX => "What is X Ayah?",
        }
    }

    /// Whether a mode selector should offer this mode for the scope.
    /// Guessing the surah is pointless inside a single surah, and "what is
    /// the nth ayah" needs one.
    pub fn is_available_for(&self, scope: &Scope) -> bool {
        match self {
            Mode::GuessSurah => !scope.is_chapter(),
            Mode::WhatIsX => scope.is_chapter(),
            _ => true,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown quiz mode: {0:?}")]
pub struct ParseModeError(String);

impl FromStr for Mode {
    type Err = ParseModeError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let name = name.trim();
        Mode::ALL
            .iter()
            .copied()
            .find(|mode| mode.name() == name)
            .ok_or_else(|| ParseModeError(name.to_owned()))
    }
}
