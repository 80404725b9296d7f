use super::{Context, Outcome};
use crate::corpus::CorpusSource;
use crate::error::Result;
use crate::quiz::mode::Mode;
use crate::quiz::question::{Answer, Metadata, Prompt, Question};
use crate::reference::{chapter_name, first_verse, last_verse, Reference, CHAPTER_COUNT};

/// Shows `shown_at` and asks for `answer_at`, both surah boundary verses.
fn boundary<S: CorpusSource>(
    ctx: &Context<'_, S>,
    mode: Mode,
    shown_at: Reference,
    answer_at: Reference,
) -> Result<Outcome> {
    let shown = require!(ctx.verse(shown_at)?, "verse text is missing");
    let expected = require!(ctx.verse(answer_at)?, "verse text is missing");
    let verse_range = format!(
        "Question: {} {}, Answer: {} {}",
        chapter_name(shown_at.chapter),
        shown_at,
        chapter_name(answer_at.chapter),
        answer_at
    );
    let question = Question::new(
        mode,
        shown_at,
        Prompt::Verse(shown.arabic),
        Answer::Verse(expected.arabic),
    )
    .with_references(vec![shown_at, answer_at])
    .with_metadata(Metadata {
        translation: Some(shown.english),
        verse_range: Some(verse_range),
        ..Default::default()
    });
    Ok(Outcome::Ready(question))
}

/// Last verse of the sampled surah, first verse of the next one.
pub(super) fn forward<S: CorpusSource>(ctx: &Context<'_, S>, base: Reference) -> Result<Outcome> {
    if base.chapter >= CHAPTER_COUNT {
        return Ok(Outcome::Infeasible("no surah after An-Nas"));
    }
    boundary(
        ctx,
        Mode::ChainingSurah,
        last_verse(base.chapter),
        first_verse(base.chapter + 1),
    )
}

/// First verse of the sampled surah, last verse of the previous one.
pub(super) fn reverse<S: CorpusSource>(ctx: &Context<'_, S>, base: Reference) -> Result<Outcome> {
    if base.chapter <= 1 {
        return Ok(Outcome::Infeasible("no surah before Al-Fatihah"));
    }
    boundary(
        ctx,
        Mode::ChainingSurahReverse,
        first_verse(base.chapter),
        last_verse(base.chapter - 1),
    )
}
