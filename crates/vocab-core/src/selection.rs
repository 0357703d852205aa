//! Card selection policies.

use crate::models::{Deck, Status};
use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Trait for next-card selection.
pub trait SelectionPolicy: Send {
    /// Policy name.
    fn name(&self) -> &str;

    /// Pick the index of the next item to show. Returns 0 for an empty deck.
    fn pick_index(&mut self, deck: &Deck) -> usize;
}

/// Selection weight per status.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectionWeights {
    #[serde(default = "default_red")]
    pub red: f64,
    #[serde(default = "default_neutral")]
    pub neutral: f64,
    #[serde(default = "default_green")]
    pub green: f64,
}

fn default_red() -> f64 { 10.0 }
fn default_neutral() -> f64 { 2.0 }
fn default_green() -> f64 { 0.2 }

impl Default for SelectionWeights {
    fn default() -> Self {
        Self {
            red: default_red(),
            neutral: default_neutral(),
            green: default_green(),
        }
    }
}

impl SelectionWeights {
    /// Weight for a status.
    pub fn weight(&self, status: Status) -> f64 {
        match status {
            Status::Red => self.red,
            Status::Neutral => self.neutral,
            Status::Green => self.green,
        }
    }
}

/// Independent weighted draws with replacement.
///
/// Immediate repeats are possible.
pub struct WeightedRandom<R = StdRng> {
    weights: SelectionWeights,
    rng: R,
}

impl WeightedRandom<StdRng> {
    /// Create a policy seeded from the OS.
    pub fn new(weights: SelectionWeights) -> Self {
        Self::with_rng(weights, StdRng::from_os_rng())
    }

    /// Create a reproducible policy.
    pub fn seeded(weights: SelectionWeights, seed: u64) -> Self {
        Self::with_rng(weights, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> WeightedRandom<R> {
    pub fn with_rng(weights: SelectionWeights, rng: R) -> Self {
        Self { weights, rng }
    }
}

impl<R: Rng + Send> SelectionPolicy for WeightedRandom<R> {
    fn name(&self) -> &str {
        "weighted-random"
    }

    fn pick_index(&mut self, deck: &Deck) -> usize {
        if deck.is_empty() {
            return 0;
        }

        let weights = deck.iter().map(|item| self.weights.weight(item.status));
        match WeightedIndex::new(weights) {
            Ok(dist) => {
                let index = dist.sample(&mut self.rng);
                debug!(index, deck_len = deck.len(), "picked next item");
                index
            }
            Err(err) => {
                // Zero, negative or non-finite weights everywhere.
                warn!(%err, "weighted sampling unavailable, falling back to first item");
                0
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::collections::VecDeque;

    /// Replays a fixed list of indices, then repeats 0.
    pub struct Scripted {
        picks: VecDeque<usize>,
    }

    impl Scripted {
        pub fn new(picks: impl IntoIterator<Item = usize>) -> Self {
            Self { picks: picks.into_iter().collect() }
        }
    }

    impl SelectionPolicy for Scripted {
        fn name(&self) -> &str {
            "scripted"
        }

        fn pick_index(&mut self, _deck: &Deck) -> usize {
            self.picks.pop_front().unwrap_or(0)
        }
    }
}
