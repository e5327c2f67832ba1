use crate::generator::{generate, Alphabet};
use crate::meter::ProgressMeter;
use crate::scoring::ScoreTable;
use crate::selection::{Mode, Selector};
use crate::session::{KeyOutcome, Session, Word};

/// The running game: word set, score table, selection state machine, the
/// live session, and the progress meter.
///
/// Word set and score table are created together and only ever replaced
/// together; `reconfigure` is the single reset path.
#[derive(Debug)]
pub struct Drill {
    word_length: usize,
    alphabet: Alphabet,
    words: Vec<String>,
    scores: ScoreTable,
    selector: Selector,
    session: Session,
    pub meter: ProgressMeter,
    words_completed: usize,
}

impl Drill {
    pub fn new(word_length: usize, alphabet: Alphabet) -> Self {
        let words = generate(word_length, &alphabet);
        let scores = ScoreTable::new(&words);
        let selector = Selector::new();
        let first = pick(&selector, &scores, None, &words);

        Self {
            word_length,
            alphabet,
            words,
            scores,
            selector,
            session: Session::new(first),
            meter: ProgressMeter::new(),
            words_completed: 0,
        }
    }

    /// Full reset for a configuration change: new word set, zeroed scores,
    /// back to discovery, fresh word. The meter keeps its value.
    pub fn reconfigure(&mut self, word_length: usize, alphabet: Alphabet) {
        self.word_length = word_length;
        self.alphabet = alphabet;
        self.words = generate(self.word_length, &self.alphabet);
        self.scores = ScoreTable::new(&self.words);
        self.selector.reset();
        let first = pick(&self.selector, &self.scores, None, &self.words);
        self.session = Session::new(first);
        self.words_completed = 0;
    }

    /// Feeds one classified keypress through the session and applies its
    /// consequences: a completion scores the word, advances the meter and
    /// mode, and swaps in the next word; a miss resets the meter. Incorrect
    /// keystrokes never touch the score table.
    pub fn on_key(&mut self, c: char) -> KeyOutcome {
        let outcome = self.session.on_key(c);
        match outcome {
            KeyOutcome::Completed { elapsed_ms } => {
                let slug = self.session.word().slug.clone();
                // Near-instant completions must still land a nonzero score;
                // the floor-average from zero halves, so clamp to 2 ms.
                self.scores.record_completion(&slug, elapsed_ms.max(2));
                self.words_completed += 1;
                self.meter.advance();
                self.selector.refresh_mode(&self.scores);
                let next = pick(&self.selector, &self.scores, Some(&slug), &self.words);
                self.session = Session::new(next);
            }
            KeyOutcome::Miss => self.meter.reset(),
            KeyOutcome::Advanced => {}
        }
        outcome
    }

    pub fn word_length(&self) -> usize {
        self.word_length
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn scores(&self) -> &ScoreTable {
        &self.scores
    }

    pub fn mode(&self) -> Mode {
        self.selector.mode()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn words_completed(&self) -> usize {
        self.words_completed
    }
}

fn pick(selector: &Selector, scores: &ScoreTable, previous: Option<&str>, words: &[String]) -> Word {
    let mut rng = rand::thread_rng();
    let slug = selector
        .pick_next(scores, previous, &mut rng)
        .unwrap_or_else(|| words[0].clone());
    Word::new(slug)
}
