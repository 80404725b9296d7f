use parking_lot::{Mutex, RwLock};
use tracing::{debug, error};

use self::generator::Generator;
use self::mode::Mode;
use self::question::Question;
use self::scope::{Scope, SubRange};
use self::score::Score;
use crate::corpus::CorpusSource;
use crate::error::Result;

pub mod generator;
pub mod mode;
pub mod question;
pub mod scope;
pub mod score;


#[derive(Debug, Default)]
struct Session {
    question: Option<Question>,
    revealed: bool,
    pending: usize,
    score: Score,
}

/// One player's quiz: the current question, whether its answer is showing,
/// and the running score.
///
/// Methods take `&self` so a UI thread can read the state while another
/// thread generates the next question.
pub struct Quiz<S> {
    generator: Mutex<Generator<S>>,
    session: RwLock<Session>,
}

impl<S: CorpusSource> Quiz<S> {
    pub fn new(generator: Generator<S>) -> Self {
        Quiz {
            generator: Mutex::new(generator),
            session: RwLock::new(Session::default()),
        }
    }

    /// Replaces the current question. On failure the previous question is
    /// kept and the error returned.
    pub fn generate(&self, mode: Mode, scope: Scope, sub_range: Option<SubRange>) -> Result<()> {
        {
            let mut session = self.session.write();
            session.pending += 1;
            session.revealed = false;
        }

        let result = self.generator.lock().generate(mode, scope, sub_range);

        let mut session = self.session.write();
        session.pending -= 1;
        match result {
            Ok(question) => {
                debug!("New {} question on {}", question.mode, question.reference);
                session.question = Some(question);
                Ok(())
            }
            Err(e) => {
                error!("Failed to generate question: {}", e);
                Err(e)
            }
        }
    }

    pub fn reveal(&self) {
        self.session.write().revealed = true;
    }

    pub fn reset(&self) {
        let mut session = self.session.write();
        session.question = None;
        session.revealed = false;
    }

    pub fn question(&self) -> Option<Question> {
        self.session.read().question.clone()
    }

    pub fn is_revealed(&self) -> bool {
        self.session.read().revealed
    }

    pub fn is_loading(&self) -> bool {
        self.session.read().pending > 0
    }

    /// Records the player's own verdict on the current question.
    pub fn mark(&self, correct: bool) {
        self.session.write().score.record(correct);
    }

    pub fn score(&self) -> Score {
        self.session.read().score
    }

    pub fn reset_score(&self) {
        self.session.write().score.reset();
    }
}
