use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

use crate::corpus::{Corpus, CorpusSource, Verse};
use crate::error::{Error, Result};
use crate::quiz::mode::Mode;
use crate::quiz::question::Question;
use crate::quiz::scope::{Scope, Span, SubRange};
use crate::reference::{chapter_name, Reference};
use crate::settings::Settings;
use crate::text::Side;

/// Unwraps an `Option`, or gives up on the sampled verse with a reason.
macro_rules! require {
    ($value:expr, $reason:expr) => {
        match $value {
            Some(value) => value,
            None => return Ok(Outcome::Infeasible($reason)),
        }
    };
}

mod chaining;
mod completion;
mod identity;
mod intruder;
mod recitation;
mod sequence;


/// Result of building a question around one sampled verse.
#[derive(Debug)]
enum Outcome {
    Ready(Question),
    /// The verse cannot carry this kind of question; sample another one.
    Infeasible(&'static str),
}

struct Context<'a, S> {
    corpus: &'a Corpus<S>,
    settings: &'a Settings,
    span: Span,
}

impl<'a, S: CorpusSource> Context<'a, S> {
    fn new(corpus: &'a Corpus<S>, settings: &'a Settings, span: Span) -> Self {
        Context {
            corpus,
            settings,
            span,
        }
    }

    fn ceiling(&self) -> Option<Reference> {
        self.span.ceiling
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Reference {
        self.span.choose(rng)
    }

    fn verse(&self, reference: Reference) -> Result<Option<Verse>> {
        self.corpus.verse(reference)
    }

    fn verses(&self, references: &[Reference]) -> Result<Option<Vec<Verse>>> {
        self.corpus.verses(references)
    }
}

/// `"Al-Baqarah, 2:5"` or `"Al-Baqarah, 2:5 – 2:9"`.
fn located(chapter: u16, range: &str) -> String {
    format!("{}, {}", chapter_name(chapter), range)
}

fn arabic(verses: &[Verse]) -> Vec<String> {
    verses.iter().map(|v| v.arabic.clone()).collect()
}

fn build<S: CorpusSource, R: Rng + ?Sized>(
    mode: Mode,
    ctx: &Context<'_, S>,
    base: Reference,
    rng: &mut R,
) -> Result<Outcome> {
    match mode {
        Mode::Beginning => completion::masked(ctx, base, Side::Beginning),
        Mode::Ending => completion::masked(ctx, base, Side::Ending),
        Mode::Partial => completion::partial(ctx, base, rng),
        Mode::Missing => sequence::missing(ctx, base, rng),
        Mode::Reorder => sequence::reorder(ctx, base, rng),
        Mode::Next => sequence::adjacent(ctx, base, Mode::Next),
        Mode::Previous => sequence::adjacent(ctx, base, Mode::Previous),
        Mode::NextThree => sequence::next_three(ctx, base),
        Mode::GuessSurah => sequence::guess_surah(ctx, base),
        Mode::Translation => identity::translation(ctx, base),
        Mode::AyahNumber => identity::ayah_number(ctx, base),
        Mode::WhatIsX => identity::what_is_x(ctx, base),
        Mode::HelpImam => recitation::help_imam(ctx, base),
        Mode::ChainingSurah => chaining::forward(ctx, base),
        Mode::ChainingSurahReverse => chaining::reverse(ctx, base),
        Mode::WhatDoesntBelong => intruder::what_doesnt_belong(ctx, base, rng),
    }
}

/// Builds questions from a [`Corpus`].
///
/// Each call samples a verse from the scope and hands it to the mode. A verse
/// the mode cannot use (too close to the end of the range, no recitation, ...)
/// is dropped and a fresh one sampled, up to `Settings::max_attempts` times.
pub struct Generator<S> {
    corpus: Corpus<S>,
    settings: Settings,
    rng: StdRng,
}

impl<S: CorpusSource> Generator<S> {
    pub fn new(corpus: Corpus<S>, settings: Settings) -> Self {
        let rng = match settings.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Generator {
            corpus,
            settings,
            rng,
        }
    }

    pub fn generate(
        &mut self,
        mode: Mode,
        scope: Scope,
        sub_range: Option<SubRange>,
    ) -> Result<Question> {
        let mode = if mode == Mode::WhatIsX && !scope.is_chapter() {
            debug!("{} needs a surah scope, asking a {} question", mode, Mode::Beginning);
            Mode::Beginning
        } else {
            mode
        };

        let span = scope.resolve(sub_range, &self.corpus)?;
        if mode == Mode::WhatDoesntBelong && span.is_single_chapter() {
            debug!("{} has no verse from a second surah", span);
            return Err(Error::Exhausted { mode, attempts: 0 });
        }

        let Generator {
            corpus,
            settings,
            rng,
        } = self;
        let ctx = Context::new(corpus, settings, span);
        for _ in 0..settings.max_attempts {
            let base = corpus.random_reference(scope, sub_range, rng)?;
            trace!("Building {} question around {}", mode, base);
            match build(mode, &ctx, base, rng)? {
                Outcome::Ready(question) => return Ok(question),
                Outcome::Infeasible(reason) => {
                    debug!("Rejected {} for {} question: {}", base, mode, reason)
                }
            }
        }

        Err(Error::Exhausted {
            mode,
            attempts: settings.max_attempts,
        })
    }
}
