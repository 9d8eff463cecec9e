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

//! Exact frequency counter used as evaluation ground truth.
//!
//! Memory grows with the number of distinct items, so this is strictly
//! an evaluation aid, never a memory-constrained deployment component.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

use crate::traits::ByteCost;
use crate::traits::ENTRY_OVERHEAD_BYTES;

const ENTRY_VALUE_BYTES: usize = 16;

#[derive(Debug, Clone, Copy)]
struct Entry {
    count: u64,
    // Stream position of the first occurrence; ranked reports break
    // count ties first-seen-first for reproducibility.
    first_seen: u64,
}

/// Exact item-to-count map with first-seen tie ordering.
#[derive(Debug, Clone, Default)]
pub struct ExactCounter<T> {
    counts: HashMap<T, Entry>,
    total_weight: u64,
    key_bytes: usize,
}

impl<T: Eq + Hash + ByteCost> ExactCounter<T> {
    /// Creates an empty counter.
    pub fn new() -> Self {
        Self {
            counts: HashMap::new(),
            total_weight: 0,
            key_bytes: 0,
        }
    }

    /// Counts one occurrence of an item.
    pub fn increment<Q>(&mut self, item: &Q)
    where
        T: Borrow<Q>,
        Q: Eq + Hash + ToOwned<Owned = T> + ?Sized,
    {
        self.total_weight += 1;
        if let Some(entry) = self.counts.get_mut(item) {
            entry.count += 1;
        } else {
            let key = item.to_owned();
            self.key_bytes += key.byte_cost();
            self.counts.insert(
                key,
                Entry {
                    count: 1,
                    first_seen: self.total_weight,
                },
            );
        }
    }

    /// Returns the exact count for an item, 0 if never seen.
    pub fn count<Q>(&self, item: &Q) -> u64
    where
        T: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.counts.get(item).map_or(0, |entry| entry.count)
    }

    /// Returns the total number of items counted.
    pub fn total_weight(&self) -> u64 {
        self.total_weight
    }

    /// Returns the number of distinct items seen.
    pub fn num_distinct(&self) -> usize {
        self.counts.len()
    }

    /// Returns the `n` most frequent items, highest count first, with
    /// count ties broken by encounter order.
    pub fn top_n(&self, n: usize) -> Vec<(&T, u64)> {
        let mut ranked: Vec<(&T, &Entry)> = self.counts.iter().collect();
        ranked.sort_by(|(_, a), (_, b)| {
            b.count.cmp(&a.count).then(a.first_seen.cmp(&b.first_seen))
        });
        ranked
            .into_iter()
            .take(n)
            .map(|(item, entry)| (item, entry.count))
            .collect()
    }

    /// Returns every item whose count is at least
    /// `threshold_ratio * total_weight`, ordered like [`Self::top_n`].
    pub fn heavy_hitters(&self, threshold_ratio: f64) -> Vec<(&T, u64)> {
        let threshold = threshold_ratio * self.total_weight as f64;
        let mut hitters: Vec<(&T, &Entry)> = self
            .counts
            .iter()
            .filter(|(_, entry)| entry.count as f64 >= threshold)
            .collect();
        hitters.sort_by(|(_, a), (_, b)| {
            b.count.cmp(&a.count).then(a.first_seen.cmp(&b.first_seen))
        });
        hitters
            .into_iter()
            .map(|(item, entry)| (item, entry.count))
            .collect()
    }

    /// Returns the byte cost of the map under the fixed memory model.
    pub fn memory_bytes(&self) -> usize {
        self.key_bytes + self.counts.len() * (ENTRY_VALUE_BYTES + ENTRY_OVERHEAD_BYTES)
    }
}
