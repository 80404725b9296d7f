use itertools::Itertools;
use lazy_static::lazy_static;
use rand::seq::index;
use rand::Rng;
use regex::Regex;
use std::collections::HashSet;
use unidecode::unidecode;


pub const MASK: &str = "...";
pub const PARTIAL_MASK: &str = "…";

lazy_static! {
    static ref FORBIDDEN_GUESS_CHARACTERS_REGEX: Regex = Regex::new("[^a-z0-9]").unwrap();
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Beginning,
    Ending,
}

pub fn split_words(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

fn mask_count(word_count: usize, fraction: f64) -> usize {
    let count = (word_count as f64 * fraction).ceil() as usize;
    count.min(word_count)
}

/// Hides the first or last `fraction` of the words, one placeholder per word.
pub fn mask_text(text: &str, side: Side, fraction: f64) -> String {
    let words = split_words(text);
    let count = mask_count(words.len(), fraction);
    let masks = std::iter::repeat(MASK).take(count);
    match side {
        Side::Beginning => masks.chain(words[count..].iter().copied()).join(" "),
        Side::Ending => words[..words.len() - count]
            .iter()
            .copied()
            .chain(masks)
            .join(" "),
    }
}

/// Hides `fraction` of the words at distinct random positions.
pub fn mask_random<R: Rng + ?Sized>(text: &str, fraction: f64, rng: &mut R) -> String {
    let words = split_words(text);
    let count = mask_count(words.len(), fraction);
    let hidden: HashSet<usize> = index::sample(rng, words.len(), count).iter().collect();
    words
        .iter()
        .enumerate()
        .map(|(i, &word)| if hidden.contains(&i) { PARTIAL_MASK } else { word })
        .join(" ")
}

pub fn ordinal(n: u16) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

/// Lowercase ASCII letters and digits only, for comparing typed answers.
pub fn sanitize(answer: &str) -> String {
    let answer = unidecode(answer);
    FORBIDDEN_GUESS_CHARACTERS_REGEX
        .replace_all(&answer.to_lowercase(), "")
        .into()
}
