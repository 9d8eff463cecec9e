// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

use crate::error::Error;
use crate::error::ErrorKind;
use crate::traits::ByteCost;
use crate::traits::ENTRY_OVERHEAD_BYTES;

// Count plus the bucket in which the entry was (re-)created. The
// bucket id caps how stale an entry may be before pruning removes it.
#[derive(Debug, Clone, Copy)]
struct Entry {
    count: u64,
    bucket_id: u64,
}

const ENTRY_VALUE_BYTES: usize = 16;

/// Adaptive frequency table with windowed pruning.
#[derive(Debug, Clone)]
pub struct LossyCountingTable<T> {
    epsilon: f64,
    window_width: u64,
    current_bucket: u64,
    total_weight: u64,
    entries: HashMap<T, Entry>,
    key_bytes: usize,
}

impl<T: Eq + Hash + ByteCost> LossyCountingTable<T> {
    /// Creates a table with error budget `epsilon`.
    ///
    /// The window width is `ceil(1 / epsilon)`: once per window the
    /// table is pruned of entries whose count cannot have kept pace
    /// with one occurrence per elapsed window.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::ConfigInvalid`] unless `0 < epsilon < 1`.
    pub fn new(epsilon: f64) -> Result<Self, Error> {
        if !(epsilon > 0.0 && epsilon < 1.0) {
            return Err(
                Error::new(ErrorKind::ConfigInvalid, "epsilon must be in (0, 1)")
                    .with_context("epsilon", epsilon),
            );
        }
        Ok(Self {
            epsilon,
            window_width: (1.0 / epsilon).ceil() as u64,
            current_bucket: 1,
            total_weight: 0,
            entries: HashMap::new(),
            key_bytes: 0,
        })
    }

    /// Feeds one item to the table, pruning at window boundaries.
    pub fn update<Q>(&mut self, item: &Q)
    where
        T: Borrow<Q>,
        Q: Eq + Hash + ToOwned<Owned = T> + ?Sized,
    {
        self.total_weight += 1;
        if let Some(entry) = self.entries.get_mut(item) {
            entry.count += 1;
        } else {
            let key = item.to_owned();
            self.key_bytes += key.byte_cost();
            self.entries.insert(
                key,
                Entry {
                    count: 1,
                    bucket_id: self.current_bucket - 1,
                },
            );
        }
        if self.total_weight % self.window_width == 0 {
            self.prune();
            self.current_bucket += 1;
        }
    }

    /// Returns the tracked count, or 0 if the item was never seen or
    /// was pruned as statistically negligible.
    pub fn estimate<Q>(&self, item: &Q) -> u64
    where
        T: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.entries.get(item).map_or(0, |entry| entry.count)
    }

    /// Returns the configured error budget.
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Returns the window width, `ceil(1 / epsilon)`.
    pub fn window_width(&self) -> u64 {
        self.window_width
    }

    /// Returns the number of items currently tracked.
    pub fn num_tracked(&self) -> usize {
        self.entries.len()
    }

    /// Returns the total number of items processed.
    pub fn total_weight(&self) -> u64 {
        self.total_weight
    }

    /// Returns the byte cost of the table under the fixed memory model:
    /// key bytes plus a 16-byte value and a flat per-entry overhead.
    pub fn memory_bytes(&self) -> usize {
        self.key_bytes + self.entries.len() * (ENTRY_VALUE_BYTES + ENTRY_OVERHEAD_BYTES)
    }

    // An entry survives only if its count exceeds the number of windows
    // elapsed since its bucket began.
    fn prune(&mut self) {
        let current_bucket = self.current_bucket;
        let key_bytes = &mut self.key_bytes;
        self.entries.retain(|key, entry| {
            let keep = entry.count + entry.bucket_id > current_bucket;
            if !keep {
                *key_bytes -= key.byte_cost();
            }
            keep
        });
    }
}

impl crate::traits::FrequencyEstimator for LossyCountingTable<String> {
    fn record(&mut self, item: &str) {
        self.update(item);
    }

    fn frequency(&self, item: &str) -> u64 {
        self.estimate(item)
    }

    fn memory_bytes(&self) -> usize {
        LossyCountingTable::memory_bytes(self)
    }

    fn label(&self) -> &'static str {
        "lossy-counting"
    }
}
