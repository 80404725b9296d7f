use rand::Rng;

use super::{Context, Outcome};
use crate::corpus::CorpusSource;
use crate::error::Result;
use crate::quiz::mode::Mode;
use crate::quiz::question::{Answer, Metadata, Prompt, Question};
use crate::reference::Reference;
use crate::text::{mask_random, mask_text, Side};

pub(super) fn masked<S: CorpusSource>(
    ctx: &Context<'_, S>,
    base: Reference,
    side: Side,
) -> Result<Outcome> {
    let verse = require!(ctx.verse(base)?, "verse text is missing");
    let mode = match side {
        Side::Beginning => Mode::Beginning,
        Side::Ending => Mode::Ending,
    };
    let prompt = Prompt::Masked(mask_text(&verse.arabic, side, ctx.settings.mask_fraction));
    let question = Question::new(mode, base, prompt, Answer::Verse(verse.arabic))
        .with_references(vec![base])
        .with_metadata(Metadata {
            translation: Some(verse.english),
            verse_range: Some(base.to_string()),
            ..Default::default()
        });
    Ok(Outcome::Ready(question))
}

pub(super) fn partial<S: CorpusSource, R: Rng + ?Sized>(
    ctx: &Context<'_, S>,
    base: Reference,
    rng: &mut R,
) -> Result<Outcome> {
    let verse = require!(ctx.verse(base)?, "verse text is missing");
    let prompt = Prompt::Masked(mask_random(
        &verse.arabic,
        ctx.settings.partial_fraction,
        rng,
    ));
    let question = Question::new(Mode::Partial, base, prompt, Answer::Verse(verse.arabic))
        .with_references(vec![base])
        .with_metadata(Metadata {
            translation: Some(verse.english),
            verse_range: Some(base.to_string()),
            ..Default::default()
        });
    Ok(Outcome::Ready(question))
}
