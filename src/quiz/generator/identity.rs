use super::{located, Context, Outcome};
use crate::corpus::CorpusSource;
use crate::error::Result;
use crate::quiz::mode::Mode;
use crate::quiz::question::{Answer, Metadata, Prompt, Question};
use crate::reference::{chapter_name, Reference};

pub(super) fn translation<S: CorpusSource>(
    ctx: &Context<'_, S>,
    base: Reference,
) -> Result<Outcome> {
    let verse = require!(ctx.verse(base)?, "verse text is missing");
    let question = Question::new(
        Mode::Translation,
        base,
        Prompt::Verse(verse.arabic),
        Answer::Translation(verse.english),
    )
    .with_references(vec![base])
    .with_metadata(Metadata {
        verse_range: Some(base.to_string()),
        ..Default::default()
    });
    Ok(Outcome::Ready(question))
}

pub(super) fn ayah_number<S: CorpusSource>(
    ctx: &Context<'_, S>,
    base: Reference,
) -> Result<Outcome> {
    let verse = require!(ctx.verse(base)?, "verse text is missing");
    let question = Question::new(
        Mode::AyahNumber,
        base,
        Prompt::Verse(verse.arabic),
        Answer::VerseNumber(base.verse),
    )
    .with_references(vec![base])
    .with_metadata(Metadata {
        verse_range: Some(located(base.chapter, &base.to_string())),
        translation: Some(verse.english),
        ..Default::default()
    });
    Ok(Outcome::Ready(question))
}

pub(super) fn what_is_x<S: CorpusSource>(
    ctx: &Context<'_, S>,
    base: Reference,
) -> Result<Outcome> {
    let verse = require!(ctx.verse(base)?, "verse text is missing");
    let prompt = Prompt::Ordinal {
        position: base.verse,
        chapter_name: chapter_name(base.chapter),
    };
    let question = Question::new(Mode::WhatIsX, base, prompt, Answer::Verse(verse.arabic))
        .with_references(vec![base])
        .with_metadata(Metadata {
            verse_range: Some(located(base.chapter, &base.to_string())),
            translation: Some(verse.english),
            ..Default::default()
        });
    Ok(Outcome::Ready(question))
}
