use serde::Serialize;


/// Running tally of self-reported answers for one session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Score {
    pub correct: u32,
    pub wrong: u32,
}

impl Score {
    pub fn record(&mut self, correct: bool) {
        if correct {
            self.correct += 1;
        } else {
            self.wrong += 1;
        }
    }

    pub fn total(&self) -> u32 {
        self.correct + self.wrong
    }

    /// Rounded percentage of correct answers, 0 before any answer.
    pub fn accuracy(&self) -> u32 {
        let total = self.total();
        if total == 0 {
            return 0;
        }
        (f64::from(self.correct) * 100.0 / f64::from(total)).round() as u32
    }

    pub fn reset(&mut self) {
        *self = Score::default();
    }
}
