use rand::seq::SliceRandom;
use rand::Rng;

use super::{arabic, located, Context, Outcome};
use crate::corpus::CorpusSource;
use crate::error::Result;
use crate::quiz::mode::Mode;
use crate::quiz::question::{Answer, Metadata, Prompt, Question};
use crate::reference::{chapter_name, consecutive, describe_run, next, prev, Reference};

const MISSING_RUN: usize = 4;
const REORDER_RUN: usize = 5;
const NEXT_THREE_RUN: usize = 4;
const GUESS_SURAH_RUN: usize = 3;

/// `count` consecutive verses from `base`, or `None` if the range ends first.
fn run<S: CorpusSource>(ctx: &Context<'_, S>, base: Reference, count: usize) -> Option<Vec<Reference>> {
    let references = consecutive(base, count, ctx.ceiling());
    if references.len() < count {
        return None;
    }
    Some(references)
}

pub(super) fn missing<S: CorpusSource, R: Rng + ?Sized>(
    ctx: &Context<'_, S>,
    base: Reference,
    rng: &mut R,
) -> Result<Outcome> {
    let references = require!(run(ctx, base, MISSING_RUN), "not enough verses left in range");
    let mut verses = require!(ctx.verses(&references)?, "verse text is missing");
    let blank = rng.gen_range(0, verses.len());
    let prompt = Prompt::Blanked(
        verses
            .iter()
            .enumerate()
            .map(|(i, v)| if i == blank { None } else { Some(v.arabic.clone()) })
            .collect(),
    );
    let hidden = verses.swap_remove(blank);
    let question = Question::new(
        Mode::Missing,
        hidden.reference,
        prompt,
        Answer::Verse(hidden.arabic),
    )
    .with_metadata(Metadata {
        translation: Some(hidden.english),
        verse_range: Some(describe_run(&references)),
        ..Default::default()
    })
    .with_references(references);
    Ok(Outcome::Ready(question))
}

pub(super) fn reorder<S: CorpusSource, R: Rng + ?Sized>(
    ctx: &Context<'_, S>,
    base: Reference,
    rng: &mut R,
) -> Result<Outcome> {
    let references = require!(run(ctx, base, REORDER_RUN), "not enough verses left in range");
    let verses = require!(ctx.verses(&references)?, "verse text is missing");
    let in_order = arabic(&verses);
    let mut shuffled = in_order.clone();
    shuffled.shuffle(rng);

    let name = chapter_name(base.chapter);
    let question = Question::new(
        Mode::Reorder,
        base,
        Prompt::Shuffled(shuffled),
        Answer::Verses(in_order),
    )
    .with_metadata(Metadata {
        verse_range: Some(located(base.chapter, &describe_run(&references))),
        chapter_name: Some(name),
        ..Default::default()
    })
    .with_references(references);
    Ok(Outcome::Ready(question))
}

/// The verse right after (`Mode::Next`) or before (`Mode::Previous`) `base`.
pub(super) fn adjacent<S: CorpusSource>(
    ctx: &Context<'_, S>,
    base: Reference,
    mode: Mode,
) -> Result<Outcome> {
    let neighbour = match mode {
        Mode::Previous => require!(prev(base), "no verse before the start of the Qur'an"),
        _ => require!(next(base), "no verse after the end of the Qur'an"),
    };
    let verse = require!(ctx.verse(base)?, "verse text is missing");
    let neighbour_verse = require!(ctx.verse(neighbour)?, "verse text is missing");
    let question = Question::new(
        mode,
        base,
        Prompt::Verse(verse.arabic),
        Answer::Verse(neighbour_verse.arabic),
    )
    .with_references(vec![base, neighbour])
    .with_metadata(Metadata {
        translation: Some(verse.english),
        verse_range: Some(format!("Question: {}, Answer: {}", base, neighbour)),
        ..Default::default()
    });
    Ok(Outcome::Ready(question))
}

pub(super) fn next_three<S: CorpusSource>(ctx: &Context<'_, S>, base: Reference) -> Result<Outcome> {
    let references = require!(run(ctx, base, NEXT_THREE_RUN), "not enough verses left in range");
    let mut verses = require!(ctx.verses(&references)?, "verse text is missing");
    let following = verses.split_off(1);
    let first = verses.remove(0);

    let name = chapter_name(base.chapter);
    let question = Question::new(
        Mode::NextThree,
        base,
        Prompt::Verse(first.arabic),
        Answer::Verses(arabic(&following)),
    )
    .with_metadata(Metadata {
        translation: Some(first.english),
        verse_range: Some(located(base.chapter, &describe_run(&references[1..]))),
        chapter_name: Some(name),
        ..Default::default()
    })
    .with_references(references);
    Ok(Outcome::Ready(question))
}

pub(super) fn guess_surah<S: CorpusSource>(ctx: &Context<'_, S>, base: Reference) -> Result<Outcome> {
    let references = require!(run(ctx, base, GUESS_SURAH_RUN), "not enough verses left in range");
    let verses = require!(ctx.verses(&references)?, "verse text is missing");

    let name = chapter_name(base.chapter);
    let question = Question::new(
        Mode::GuessSurah,
        base,
        Prompt::Passage(arabic(&verses)),
        Answer::ChapterName(name.clone()),
    )
    .with_metadata(Metadata {
        verse_range: Some(located(base.chapter, &describe_run(&references))),
        chapter_name: Some(name),
        ..Default::default()
    })
    .with_references(references);
    Ok(Outcome::Ready(question))
}
