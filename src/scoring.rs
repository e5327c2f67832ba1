use itertools::Itertools;
use std::collections::HashMap;

/// Smoothed typing latency per word, in milliseconds. Zero means the word has
/// never been completed; the score table is the difficulty proxy the selector
/// ranks on.
///
/// The key set is always exactly the current word set: rebuilt wholesale on
/// every configuration change, never patched incrementally.
#[derive(Debug, Clone, Default)]
pub struct ScoreTable {
    scores: HashMap<String, u64>,
}

impl ScoreTable {
    /// A fresh table with every word mapped to zero.
    pub fn new(words: &[String]) -> Self {
        Self {
            scores: words.iter().map(|w| (w.clone(), 0)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn get(&self, slug: &str) -> Option<u64> {
        self.scores.get(slug).copied()
    }

    pub fn slugs(&self) -> impl Iterator<Item = &str> {
        self.scores.keys().map(String::as_str)
    }

    /// True once every word has been completed at least once.
    pub fn all_tested(&self) -> bool {
        !self.scores.is_empty() && self.scores.values().all(|&score| score > 0)
    }

    /// Folds a completed word's latency into its score.
    ///
    /// A completion that beats the old score by more than 20% is adopted
    /// outright; anything else is averaged with the old score (floored), so a
    /// slow word keeps most of its history while a genuinely slower attempt
    /// pulls the score up immediately.
    ///
    /// Called only after a word is typed correctly in full; misses never
    /// touch the table. A slug outside the word set means the caller's
    /// session and score table have drifted apart.
    pub fn record_completion(&mut self, slug: &str, elapsed_ms: u64) {
        debug_assert!(
            self.scores.contains_key(slug),
            "completed word {slug} is not in the score table"
        );
        if let Some(score) = self.scores.get_mut(slug) {
            let old = *score;
            *score = if old as f64 / 1.2 > elapsed_ms as f64 {
                elapsed_ms
            } else {
                (old + elapsed_ms) / 2
            };
        }
    }

    /// Words never completed so far (score still zero).
    pub fn untested(&self) -> Vec<&str> {
        self.scores
            .iter()
            .filter(|(_, &score)| score == 0)
            .map(|(slug, _)| slug.as_str())
            .collect()
    }

    /// The `n` highest-scoring words. Ties break towards the lexically
    /// smaller slug so the ranking is stable across calls.
    pub fn hardest(&self, n: usize) -> Vec<&str> {
        self.ranked().into_iter().take(n).map(|(s, _)| s).collect()
    }

    /// Every word with its score, highest first.
    pub fn ranked(&self) -> Vec<(&str, u64)> {
        self.scores
            .iter()
            .map(|(slug, &score)| (slug.as_str(), score))
            .sorted_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)))
            .collect()
    }
}
