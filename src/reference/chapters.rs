use serde::Serialize;

use super::Reference;

pub const CHAPTER_COUNT: u16 = 114;

const CHAPTERS: [(&str, u16); CHAPTER_COUNT as usize] = [
    ("Al-Fatihah", 7),
    ("Al-Baqarah", 286),
    ("Ali 'Imran", 200),
    ("An-Nisa", 176),
    ("Al-Ma'idah", 120),
    ("Al-An'am", 165),
    ("Al-A'raf", 206),
    ("Al-Anfal", 75),
    ("At-Tawbah", 129),
    ("Yunus", 109),
    ("Hud", 123),
    ("Yusuf", 111),
    ("Ar-Ra'd", 43),
    ("Ibrahim", 52),
    ("Al-Hijr", 99),
    ("An-Nahl", 128),
    ("Al-Isra", 111),
    ("Al-Kahf", 110),
    ("Maryam", 98),
    ("Taha", 135),
    ("Al-Anbya", 112),
    ("Al-Hajj", 78),
    ("Al-Mu'minun", 118),
    ("An-Nur", 64),
    ("Al-Furqan", 77),
    ("Ash-Shu'ara", 227),
    ("An-Naml", 93),
    ("Al-Qasas", 88),
    ("Al-'Ankabut", 69),
    ("Ar-Rum", 60),
    ("Luqman", 34),
    ("As-Sajdah", 30),
    ("Al-Ahzab", 73),
    ("Saba", 54),
    ("Fatir", 45),
    ("Ya-Sin", 83),
    ("As-Saffat", 182),
    ("Sad", 88),
    ("Az-Zumar", 75),
    ("Ghafir", 85),
    ("Fussilat", 54),
    ("Ash-Shuraa", 53),
    ("Az-Zukhruf", 89),
    ("Ad-Dukhan", 59),
    ("Al-Jathiyah", 37),
    ("Al-Ahqaf", 35),
    ("Muhammad", 38),
    ("Al-Fath", 29),
    ("Al-Hujurat", 18),
    ("Qaf", 45),
    ("Adh-Dhariyat", 60),
    ("At-Tur", 49),
    ("An-Najm", 62),
    ("Al-Qamar", 55),
    ("Ar-Rahman", 78),
    ("Al-Waqi'ah", 96),
    ("Al-Hadid", 29),
    ("Al-Mujadila", 22),
    ("Al-Hashr", 24),
    ("Al-Mumtahanah", 13),
    ("As-Saf", 14),
    ("Al-Jumu'ah", 11),
    ("Al-Munafiqun", 11),
    ("At-Taghabun", 18),
    ("At-Talaq", 12),
    ("At-Tahrim", 12),
    ("Al-Mulk", 30),
    ("Al-Qalam", 52),
    ("Al-Haqqah", 52),
    ("Al-Ma'arij", 44),
    ("Nuh", 28),
    ("Al-Jinn", 28),
    ("Al-Muzzammil", 20),
    ("Al-Muddaththir", 56),
    ("Al-Qiyamah", 40),
    ("Al-Insan", 31),
    ("Al-Mursalat", 50),
    ("An-Naba", 40),
    ("An-Nazi'at", 46),
    ("'Abasa", 42),
    ("At-Takwir", 29),
    ("Al-Infitar", 19),
    ("Al-Mutaffifin", 36),
    ("Al-Inshiqaq", 25),
    ("Al-Buruj", 22),
    ("At-Tariq", 17),
    ("Al-A'la", 19),
    ("Al-Ghashiyah", 26),
    ("Al-Fajr", 30),
    ("Al-Balad", 20),
    ("Ash-Shams", 15),
    ("Al-Layl", 21),
    ("Ad-Duhaa", 11),
    ("Ash-Sharh", 8),
    ("At-Tin", 8),
    ("Al-'Alaq", 19),
    ("Al-Qadr", 5),
    ("Al-Bayyinah", 8),
    ("Az-Zalzalah", 8),
    ("Al-'Adiyat", 11),
    ("Al-Qari'ah", 11),
    ("At-Takathur", 8),
    ("Al-'Asr", 3),
    ("Al-Humazah", 9),
    ("Al-Fil", 5),
    ("Quraysh", 4),
    ("Al-Ma'un", 7),
    ("Al-Kawthar", 3),
    ("Al-Kafirun", 6),
    ("An-Nasr", 3),
    ("Al-Masad", 5),
    ("Al-Ikhlas", 4),
    ("Al-Falaq", 5),
    ("An-Nas", 6),
];

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChapterInfo {
    pub number: u16,
    pub name: String,
    pub verse_count: u16,
}

fn entry(chapter: u16) -> Option<&'static (&'static str, u16)> {
    if chapter == 0 {
        return None;
    }
    CHAPTERS.get(usize::from(chapter - 1))
}

/// Number of verses in a surah, 0 for numbers outside 1..=114.
pub fn verse_count(chapter: u16) -> u16 {
    entry(chapter).map(|(_, count)| *count).unwrap_or(0)
}

pub fn chapter_name(chapter: u16) -> String {
    match entry(chapter) {
        Some((name, _)) => (*name).to_owned(),
        None => format!("Surah {}", chapter),
    }
}

pub fn chapter_info(chapter: u16) -> ChapterInfo {
    ChapterInfo {
        number: chapter,
        name: chapter_name(chapter),
        verse_count: verse_count(chapter),
    }
}

pub fn all_chapters() -> Vec<ChapterInfo> {
    (1..=CHAPTER_COUNT).map(chapter_info).collect()
}

pub fn is_valid_chapter(chapter: u16) -> bool {
    entry(chapter).is_some()
}

pub fn first_verse(chapter: u16) -> Reference {
    Reference::new(chapter, 1)
}

pub fn last_verse(chapter: u16) -> Reference {
    Reference::new(chapter, verse_count(chapter))
}

/// Zero-based index of a verse in reading order: 1:1 is 0, 114:6 is 6235.
pub fn position(reference: Reference) -> u32 {
    let before: u32 = CHAPTERS
        .iter()
        .take(usize::from(reference.chapter.saturating_sub(1)))
        .map(|(_, count)| u32::from(*count))
        .sum();
    before + u32::from(reference.verse.saturating_sub(1))
}

/// Inverse of [`position`]. `None` past the last verse.
pub fn at_position(position: u32) -> Option<Reference> {
    let mut remaining = position;
    for (i, (_, count)) in CHAPTERS.iter().enumerate() {
        let count = u32::from(*count);
        if remaining < count {
            return Some(Reference::new(i as u16 + 1, remaining as u16 + 1));
        }
        remaining -= count;
    }
    None
}
