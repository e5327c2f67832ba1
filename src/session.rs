use std::time::Instant;

/// A practice word in both of its forms: the canonical slug and its letter
/// sequence for per-character rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    pub slug: String,
    pub letters: Vec<char>,
}

impl Word {
    pub fn new(slug: impl Into<String>) -> Self {
        let slug = slug.into();
        let letters = slug.chars().collect();
        Self { slug, letters }
    }

    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }
}

/// What a classified keystroke did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Correct character; the word is not complete yet.
    Advanced,
    /// Correct character completed the word.
    Completed { elapsed_ms: u64 },
    /// Wrong character; the entry restarts from the beginning of the word.
    Miss,
}

/// The word currently on screen, the correctly typed prefix, and when the
/// word was first displayed.
///
/// `entry` is always a strict prefix of the word's slug (or empty); the
/// session is replaced outright on completion, so it never holds a finished
/// word.
#[derive(Debug)]
pub struct Session {
    word: Word,
    entry: String,
    shown_at: Instant,
}

impl Session {
    pub fn new(word: Word) -> Self {
        Self {
            word,
            entry: String::new(),
            shown_at: Instant::now(),
        }
    }

    pub fn word(&self) -> &Word {
        &self.word
    }

    pub fn entry(&self) -> &str {
        &self.entry
    }

    /// Number of correctly typed characters so far.
    pub fn typed(&self) -> usize {
        self.entry.chars().count()
    }

    /// The next character the user has to hit, if any.
    pub fn expected_char(&self) -> Option<char> {
        self.word.letters.get(self.typed()).copied()
    }

    /// Classifies one keypress against the current word.
    ///
    /// A match extends the entry and, on the final character, reports the
    /// elapsed time since the word was shown. A mismatch clears the entry;
    /// the word must be typed again from the start.
    pub fn on_key(&mut self, c: char) -> KeyOutcome {
        if self.expected_char() == Some(c) {
            self.entry.push(c);
            if self.entry == self.word.slug {
                KeyOutcome::Completed {
                    elapsed_ms: self.shown_at.elapsed().as_millis() as u64,
                }
            } else {
                KeyOutcome::Advanced
            }
        } else {
            self.entry.clear();
            KeyOutcome::Miss
        }
    }
}
