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
use crate::traits::COUNTER_BYTES;
use crate::traits::ENTRY_OVERHEAD_BYTES;

/// Fixed-capacity candidate set with global decrement on overflow.
#[derive(Debug, Clone)]
pub struct MajorityCandidateTracker<T> {
    k: usize,
    total_weight: u64,
    candidates: HashMap<T, u64>,
    key_bytes: usize,
}

impl<T: Eq + Hash + ByteCost> MajorityCandidateTracker<T> {
    /// Creates a tracker that retains items occurring more than
    /// `n / k` times, using at most `k - 1` candidate slots.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::ConfigInvalid`] if `k < 2`.
    pub fn new(k: usize) -> Result<Self, Error> {
        if k < 2 {
            return Err(
                Error::new(ErrorKind::ConfigInvalid, "k must be at least 2").with_context("k", k),
            );
        }
        Ok(Self {
            k,
            total_weight: 0,
            candidates: HashMap::with_capacity(k - 1),
            key_bytes: 0,
        })
    }

    /// Feeds one item to the tracker.
    ///
    /// A tracked item is incremented; an untracked item fills a free
    /// slot, or, with all slots taken, triggers the global decrement
    /// and is itself dropped for this occurrence.
    pub fn update<Q>(&mut self, item: &Q)
    where
        T: Borrow<Q>,
        Q: Eq + Hash + ToOwned<Owned = T> + ?Sized,
    {
        self.total_weight += 1;
        if let Some(count) = self.candidates.get_mut(item) {
            *count += 1;
        } else if self.candidates.len() < self.k - 1 {
            let key = item.to_owned();
            self.key_bytes += key.byte_cost();
            self.candidates.insert(key, 1);
        } else {
            let key_bytes = &mut self.key_bytes;
            self.candidates.retain(|key, count| {
                *count -= 1;
                if *count == 0 {
                    *key_bytes -= key.byte_cost();
                    return false;
                }
                true
            });
        }
    }

    /// Returns the tracked count, or 0 if the item is not a candidate.
    pub fn estimate<Q>(&self, item: &Q) -> u64
    where
        T: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.candidates.get(item).copied().unwrap_or(0)
    }

    /// Returns the configured threshold divisor `k`.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Returns the maximum number of simultaneous candidates, `k - 1`.
    pub fn capacity(&self) -> usize {
        self.k - 1
    }

    /// Returns the number of candidates currently tracked.
    pub fn num_candidates(&self) -> usize {
        self.candidates.len()
    }

    /// Returns the total number of items processed.
    pub fn total_weight(&self) -> u64 {
        self.total_weight
    }

    /// Iterates over the surviving candidates and their counts.
    pub fn candidates(&self) -> impl Iterator<Item = (&T, u64)> {
        self.candidates.iter().map(|(item, count)| (item, *count))
    }

    /// Returns the byte cost of the candidate set under the fixed
    /// memory model: key bytes plus an 8-byte counter and a flat
    /// per-entry overhead.
    pub fn memory_bytes(&self) -> usize {
        self.key_bytes + self.candidates.len() * (COUNTER_BYTES + ENTRY_OVERHEAD_BYTES)
    }
}

impl crate::traits::FrequencyEstimator for MajorityCandidateTracker<String> {
    fn record(&mut self, item: &str) {
        self.update(item);
    }

    fn frequency(&self, item: &str) -> u64 {
        self.estimate(item)
    }

    fn memory_bytes(&self) -> usize {
        MajorityCandidateTracker::memory_bytes(self)
    }

    fn label(&self) -> &'static str {
        "misra-gries"
    }
}
