use super::{arabic, Context, Outcome};
use crate::corpus::CorpusSource;
use crate::error::Result;
use crate::quiz::mode::Mode;
use crate::quiz::question::{Answer, Metadata, Prompt, Question};
use crate::reference::{chapter_name, consecutive, describe_run, Reference, CHAPTER_COUNT};

const RECITED_RUN: usize = 3;
const ANSWER_RUN: usize = 2;

/// The two verses a listener should continue with after `last_recited`.
///
/// After the final verse of a surah the answer is the opening of the next
/// surah, whatever the ceiling.
fn continuation(last_recited: Reference, ceiling: Option<Reference>) -> Vec<Reference> {
    if last_recited.is_last_of_chapter() && last_recited.chapter < CHAPTER_COUNT {
        let chapter = last_recited.chapter + 1;
        return vec![Reference::new(chapter, 1), Reference::new(chapter, 2)];
    }
    consecutive(last_recited, ANSWER_RUN + 1, ceiling)
        .into_iter()
        .skip(1)
        .collect()
}

pub(super) fn help_imam<S: CorpusSource>(ctx: &Context<'_, S>, base: Reference) -> Result<Outcome> {
    let mut segments = Vec::new();
    let mut recited = Vec::new();
    for reference in consecutive(base, RECITED_RUN, ctx.ceiling()) {
        if let Some(segment) = ctx.corpus.audio_segment(reference)? {
            segments.push(segment);
            recited.push(reference);
        }
    }
    let first_recited = *require!(recited.first(), "no recitation for these verses");
    let last_recited = *require!(recited.last(), "no recitation for these verses");

    let answer_references = continuation(last_recited, ctx.ceiling());
    if answer_references.len() < ANSWER_RUN {
        return Ok(Outcome::Infeasible("not enough verses after the recitation"));
    }
    let answer_verses = require!(ctx.verses(&answer_references)?, "verse text is missing");

    let first_name = chapter_name(first_recited.chapter);
    let last_answer = answer_references[ANSWER_RUN - 1];
    let name = if first_recited.chapter == last_answer.chapter {
        first_name
    } else {
        format!("{} – {}", first_name, chapter_name(last_answer.chapter))
    };
    let translation = answer_verses
        .iter()
        .map(|v| v.english.as_str())
        .collect::<Vec<_>>()
        .join("\n\n");

    let metadata = Metadata {
        chapter_name: Some(name),
        verse_range: Some(describe_run(&answer_references)),
        audio_range: Some(describe_run(&recited)),
        translation: Some(translation),
        ..Default::default()
    };
    let mut references = recited;
    references.extend(answer_references);
    let question = Question::new(
        Mode::HelpImam,
        base,
        Prompt::Recitation,
        Answer::Verses(arabic(&answer_verses)),
    )
    .with_references(references)
    .with_metadata(metadata)
    .with_audio(segments);
    Ok(Outcome::Ready(question))
}
