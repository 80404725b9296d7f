use itertools::Itertools;
use rand::seq::SliceRandom;
use rand::Rng;

use super::{located, Context, Outcome};
use crate::corpus::CorpusSource;
use crate::error::Result;
use crate::quiz::mode::Mode;
use crate::quiz::question::{Answer, Metadata, Prompt, Question};
use crate::reference::{all_in_range, chapter_name, first_verse, last_verse, Reference};

const COMPANIONS: usize = 2;

/// Verses of the sampled surah other than `base`, up to the ceiling.
fn same_chapter(base: Reference, ceiling: Option<Reference>) -> Vec<Reference> {
    let end = match ceiling {
        Some(ceiling) if ceiling.chapter == base.chapter => ceiling.min(last_verse(base.chapter)),
        _ => last_verse(base.chapter),
    };
    all_in_range(first_verse(base.chapter), end)
        .into_iter()
        .filter(|r| r.chapter == base.chapter && *r != base)
        .collect()
}

/// Samples the scope until it hits a verse from another surah.
fn foreign<S: CorpusSource, R: Rng + ?Sized>(
    ctx: &Context<'_, S>,
    chapter: u16,
    rng: &mut R,
) -> Option<Reference> {
    (0..ctx.settings.foreign_sample_attempts)
        .map(|_| ctx.sample(rng))
        .find(|r| r.chapter != chapter)
}

/// Three verses of one surah and one from elsewhere in the scope, shuffled.
pub(super) fn what_doesnt_belong<S: CorpusSource, R: Rng + ?Sized>(
    ctx: &Context<'_, S>,
    base: Reference,
    rng: &mut R,
) -> Result<Outcome> {
    let pool = same_chapter(base, ctx.ceiling());
    let companions: Vec<Reference> = pool.choose_multiple(rng, COMPANIONS).copied().collect();
    if companions.len() < COMPANIONS {
        return Ok(Outcome::Infeasible("surah is too short"));
    }
    let intruder = require!(
        foreign(ctx, base.chapter, rng),
        "no verse from another surah in scope"
    );

    let mut belonging = vec![base];
    belonging.extend(companions);
    let mut shown = belonging.clone();
    shown.push(intruder);
    shown.shuffle(rng);

    let verses = require!(ctx.verses(&shown)?, "verse text is missing");
    let position = require!(
        shown.iter().position(|r| *r == intruder),
        "intruder was lost in the shuffle"
    );
    let intruder_verse = &verses[position];

    let companions_info = belonging
        .iter()
        .map(|r| located(r.chapter, &r.to_string()))
        .join(" | ");
    let metadata = Metadata {
        verse_range: Some(format!(
            "Mistaken ayah: {}",
            located(intruder.chapter, &intruder.to_string())
        )),
        translation: Some(intruder_verse.english.clone()),
        companions: Some(companions_info),
        chapter_name: Some(chapter_name(base.chapter)),
        ..Default::default()
    };
    let answer = Answer::Intruder {
        position: position + 1,
        reference: intruder,
        text: intruder_verse.arabic.clone(),
    };
    let prompt = Prompt::Numbered(verses.iter().map(|v| v.arabic.clone()).collect());
    let question = Question::new(Mode::WhatDoesntBelong, base, prompt, answer)
        .with_references(shown)
        .with_metadata(metadata);
    Ok(Outcome::Ready(question))
}
