use crate::scoring::ScoreTable;
use rand::seq::SliceRandom;
use rand::Rng;

/// How many of the hardest words the drill pool holds.
pub const DRILL_POOL_SIZE: usize = 3;

/// Selection phase for the current word set.
///
/// Discovery while any word is still untested, Drill once every word has a
/// nonzero score. The transition is one-way per word set: later score updates
/// reshuffle the top-3 ranking but never drop back to Discovery. Only a full
/// reconfiguration resets the mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Mode {
    Discovery,
    Drill,
}

/// A selection strategy's candidate pool over the score table.
pub trait WordPicker {
    fn pool<'a>(&self, scores: &'a ScoreTable) -> Vec<&'a str>;
}

/// Untested words only; every word gets seen once before drilling starts.
pub struct DiscoveryPicker;

impl WordPicker for DiscoveryPicker {
    fn pool<'a>(&self, scores: &'a ScoreTable) -> Vec<&'a str> {
        scores.untested()
    }
}

/// The three highest-scoring (slowest) words.
pub struct DrillPicker;

impl WordPicker for DrillPicker {
    fn pool<'a>(&self, scores: &'a ScoreTable) -> Vec<&'a str> {
        scores.hardest(DRILL_POOL_SIZE)
    }
}

/// Picks the next practice word and owns the Discovery/Drill state machine.
#[derive(Debug)]
pub struct Selector {
    mode: Mode,
}

impl Selector {
    pub fn new() -> Self {
        Self {
            mode: Mode::Discovery,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Advances Discovery -> Drill once every word has been tested.
    /// Call after each recorded completion; never transitions backwards.
    pub fn refresh_mode(&mut self, scores: &ScoreTable) {
        if self.mode == Mode::Discovery && scores.all_tested() {
            self.mode = Mode::Drill;
        }
    }

    /// Back to Discovery. Only valid alongside a word-set rebuild.
    pub fn reset(&mut self) {
        self.mode = Mode::Discovery;
    }

    /// Uniform choice from the current mode's pool, never repeating the word
    /// just completed.
    ///
    /// The no-repeat rule is bounded rather than a retry loop: when the pool
    /// minus `previous` is empty, fall back to the whole word set minus
    /// `previous`; for a degenerate single-word set the previous word itself
    /// comes back rather than spinning forever. Returns None only for an
    /// empty table.
    pub fn pick_next<R: Rng>(
        &self,
        scores: &ScoreTable,
        previous: Option<&str>,
        rng: &mut R,
    ) -> Option<String> {
        let picker: &dyn WordPicker = match self.mode {
            Mode::Discovery => &DiscoveryPicker,
            Mode::Drill => &DrillPicker,
        };

        let eligible: Vec<&str> = picker
            .pool(scores)
            .into_iter()
            .filter(|&slug| Some(slug) != previous)
            .collect();
        if let Some(&slug) = eligible.choose(rng) {
            return Some(slug.to_string());
        }

        let fallback: Vec<&str> = scores.slugs().filter(|&s| Some(s) != previous).collect();
        if let Some(&slug) = fallback.choose(rng) {
            return Some(slug.to_string());
        }

        previous.map(str::to_string)
    }
}

impl Default for Selector {
    fn default() -> Self {
        Self::new()
    }
}
