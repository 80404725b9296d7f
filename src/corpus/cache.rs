use parking_lot::{Condvar, Mutex};
use std::sync::Arc;

pub type Outcome<T, E> = Result<Arc<T>, Arc<E>>;

enum Progress<T, E> {
    Pending,
    Done(Outcome<T, E>),
    /// The loader unwound before producing anything.
    Abandoned,
}

/// One load of the value, shared by every caller that arrives while it runs.
struct Attempt<T, E> {
    progress: Mutex<Progress<T, E>>,
    finished: Condvar,
}

impl<T, E> Attempt<T, E> {
    fn new() -> Self {
        Attempt {
            progress: Mutex::new(Progress::Pending),
            finished: Condvar::new(),
        }
    }

    fn finish(&self, progress: Progress<T, E>) {
        *self.progress.lock() = progress;
        self.finished.notify_all();
    }

    /// `None` if the attempt was abandoned and the caller should start over.
    fn wait(&self) -> Option<Outcome<T, E>> {
        let mut progress = self.progress.lock();
        loop {
            match &*progress {
                Progress::Done(outcome) => return Some(outcome.clone()),
                Progress::Abandoned => return None,
                Progress::Pending => {}
            }
            self.finished.wait(&mut progress);
        }
    }
}

enum Slot<T, E> {
    Empty,
    Loading(Arc<Attempt<T, E>>),
    Loaded(Arc<T>),
}

/// Clears the slot and releases waiters if the loader panics.
struct Leader<'a, T, E> {
    cache: &'a Cached<T, E>,
    attempt: Arc<Attempt<T, E>>,
    finished: bool,
}

impl<'a, T, E> Leader<'a, T, E> {
    fn complete(mut self, outcome: Outcome<T, E>) -> Outcome<T, E> {
        *self.cache.slot.lock() = match &outcome {
            Ok(value) => Slot::Loaded(Arc::clone(value)),
            Err(_) => Slot::Empty,
        };
        self.attempt.finish(Progress::Done(outcome.clone()));
        self.finished = true;
        outcome
    }
}

impl<'a, T, E> Drop for Leader<'a, T, E> {
    fn drop(&mut self) {
        if !self.finished {
            *self.cache.slot.lock() = Slot::Empty;
            self.attempt.finish(Progress::Abandoned);
        }
    }
}

/// A value loaded on first use and kept for the life of the process.
///
/// Callers arriving while a load runs wait for it and share its outcome,
/// success or failure. A failure is not kept: the next caller after it
/// starts a fresh load.
pub struct Cached<T, E = anyhow::Error> {
    slot: Mutex<Slot<T, E>>,
}

impl<T, E> Cached<T, E> {
    pub fn new() -> Self {
        Cached {
            slot: Mutex::new(Slot::Empty),
        }
    }

    pub fn get_or_load<F>(&self, load: F) -> Outcome<T, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        let attempt = loop {
            let mut slot = self.slot.lock();
            let in_flight = match &*slot {
                Slot::Loaded(value) => return Ok(Arc::clone(value)),
                Slot::Loading(attempt) => Some(Arc::clone(attempt)),
                Slot::Empty => None,
            };
            match in_flight {
                Some(attempt) => {
                    drop(slot);
                    if let Some(outcome) = attempt.wait() {
                        return outcome;
                    }
                }
                None => {
                    let attempt = Arc::new(Attempt::new());
                    *slot = Slot::Loading(Arc::clone(&attempt));
                    break attempt;
                }
            }
        };

        let leader = Leader {
            cache: self,
            attempt,
            finished: false,
        };
        let outcome = load().map(Arc::new).map_err(Arc::new);
        leader.complete(outcome)
    }

    pub fn is_loaded(&self) -> bool {
        matches!(*self.slot.lock(), Slot::Loaded(_))
    }
}

impl<T, E> Default for Cached<T, E> {
    fn default() -> Self {
        Self::new()
    }
}
