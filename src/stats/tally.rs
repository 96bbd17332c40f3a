use std::collections::HashMap;
use std::hash::Hash;

use super::{models::Outcome, StatCollector, WinLossCount};
use crate::games::GameRecord;

/// Win/loss counters keyed by `K`, remembering the order keys first appeared
#[derive(Debug, Clone)]
pub struct Tally<K> {
    order: Vec<K>,
    counts: HashMap<K, WinLossCount>,
}

impl<K: Eq + Hash + Clone> Default for Tally<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash + Clone> Tally<K> {
    pub fn new() -> Self {
        Self {
            order: Vec::new(),
            counts: HashMap::new(),
        }
    }

    /// Runs `collector` over every game and accumulates what it emits
    pub fn collect<'a, C, I>(collector: &C, games: I) -> Self
    where
        C: StatCollector<Key = K>,
        I: IntoIterator<Item = &'a GameRecord>,
    {
        let mut tally = Self::new();
        for game in games {
            for data in collector.collect(game) {
                tally.record(data.key, data.outcome);
            }
        }
        tally
    }

    pub fn record(&mut self, key: K, outcome: Outcome) {
        if !self.counts.contains_key(&key) {
            self.order.push(key.clone());
        }
        self.counts.entry(key).or_default().record(outcome);
    }

    pub fn get(&self, key: &K) -> Option<WinLossCount> {
        self.counts.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Keys with their counts, in first-appearance order
    pub fn into_entries(mut self) -> Vec<(K, WinLossCount)> {
        self.order
            .into_iter()
            .map(|key| {
                let count = self.counts.remove(&key).unwrap_or_default();
                (key, count)
            })
            .collect()
    }
}
