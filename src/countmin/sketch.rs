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

use std::hash::Hash;
use std::marker::PhantomData;

use crate::hash::HashPair;
use crate::traits::COUNTER_BYTES;

/// Configuration and fixed memory footprint of a [`CountMinSketch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountMinStats {
    /// Number of rows (independent hash functions).
    pub num_hashes: u8,
    /// Number of buckets per row.
    pub num_buckets: u32,
    /// Total counter cells, `num_hashes * num_buckets`.
    pub total_cells: usize,
    /// Fixed byte cost: `total_cells * 8`.
    pub memory_bytes: usize,
}

/// Count-Min sketch over any hashable item type.
///
/// The table is a row-major `num_hashes x num_buckets` array of `u64`
/// counters allocated once at construction; memory never grows or
/// shrinks afterwards. Every update touches exactly one counter per
/// row, so each row's counters always sum to the total stream weight.
#[derive(Debug)]
pub struct CountMinSketch<T: ?Sized> {
    num_hashes: u8,
    num_buckets: u32,
    counters: Vec<u64>,
    total_weight: u64,
    _items: PhantomData<fn(&T)>,
}

impl<T: ?Sized> Clone for CountMinSketch<T> {
    fn clone(&self) -> Self {
        Self {
            num_hashes: self.num_hashes,
            num_buckets: self.num_buckets,
            counters: self.counters.clone(),
            total_weight: self.total_weight,
            _items: PhantomData,
        }
    }
}

impl<T: Hash + ?Sized> CountMinSketch<T> {
    /// Creates a sketch with `num_hashes` rows of `num_buckets` counters.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn new(num_hashes: u8, num_buckets: u32) -> Self {
        assert!(num_hashes >= 1, "num_hashes must be at least 1");
        assert!(num_buckets >= 1, "num_buckets must be at least 1");
        Self {
            num_hashes,
            num_buckets,
            counters: vec![0; num_hashes as usize * num_buckets as usize],
            total_weight: 0,
            _items: PhantomData,
        }
    }

    /// Suggests the number of buckets for a target relative error
    /// (overestimate bound as a fraction of total stream weight).
    pub fn suggest_num_buckets(relative_error: f64) -> u32 {
        assert!(
            relative_error > 0.0,
            "relative_error must be greater than 0"
        );
        (std::f64::consts::E / relative_error).ceil() as u32
    }

    /// Suggests the number of hashes for a target confidence in `(0, 1)`.
    pub fn suggest_num_hashes(confidence: f64) -> u8 {
        assert!(
            confidence > 0.0 && confidence < 1.0,
            "confidence must be between 0 and 1, exclusive"
        );
        (1.0 / (1.0 - confidence)).ln().ceil() as u8
    }

    /// Updates the sketch with a weight of one.
    pub fn update(&mut self, item: &T) {
        self.update_with_weight(item, 1);
    }

    /// Updates the sketch with an item and weight.
    pub fn update_with_weight(&mut self, item: &T, weight: u64) {
        if weight == 0 {
            return;
        }
        let pair = HashPair::new(item);
        for row in 0..self.num_hashes {
            let cell = self.cell(row, pair.bucket(row, self.num_buckets));
            self.counters[cell] += weight;
        }
        self.total_weight += weight;
    }

    /// Returns the estimated frequency for an item: the minimum counter
    /// across rows. Never below the item's true weight.
    pub fn estimate(&self, item: &T) -> u64 {
        let pair = HashPair::new(item);
        let mut result = u64::MAX;
        for row in 0..self.num_hashes {
            let cell = self.cell(row, pair.bucket(row, self.num_buckets));
            result = result.min(self.counters[cell]);
        }
        result
    }

    /// Returns the number of rows.
    pub fn num_hashes(&self) -> u8 {
        self.num_hashes
    }

    /// Returns the number of buckets per row.
    pub fn num_buckets(&self) -> u32 {
        self.num_buckets
    }

    /// Returns the total weight of all updates.
    pub fn total_weight(&self) -> u64 {
        self.total_weight
    }

    /// Returns true if the sketch has seen no updates.
    pub fn is_empty(&self) -> bool {
        self.total_weight == 0
    }

    /// Returns configuration and the fixed byte cost of the table.
    pub fn stats(&self) -> CountMinStats {
        let total_cells = self.counters.len();
        CountMinStats {
            num_hashes: self.num_hashes,
            num_buckets: self.num_buckets,
            total_cells,
            memory_bytes: total_cells * COUNTER_BYTES,
        }
    }

    #[inline]
    fn cell(&self, row: u8, bucket: usize) -> usize {
        row as usize * self.num_buckets as usize + bucket
    }
}

impl crate::traits::FrequencyEstimator for CountMinSketch<str> {
    fn record(&mut self, item: &str) {
        self.update(item);
    }

    fn frequency(&self, item: &str) -> u64 {
        self.estimate(item)
    }

    fn memory_bytes(&self) -> usize {
        self.stats().memory_bytes
    }

    fn label(&self) -> &'static str {
        "count-min"
    }
}

#[cfg(test)]
mod tests {
    use super::CountMinSketch;

    #[test]
    fn test_each_row_conserves_total_weight() {
        let mut sketch = CountMinSketch::<str>::new(3, 100);
        for item in ["a", "b", "a", "a", "c", "b", "a"] {
            sketch.update(item);
        }
        sketch.update_with_weight("d", 5);

        assert_eq!(sketch.total_weight(), 12);
        for row in 0..sketch.num_hashes {
            let start = row as usize * sketch.num_buckets as usize;
            let row_sum: u64 = sketch.counters[start..start + sketch.num_buckets as usize]
                .iter()
                .sum();
            assert_eq!(row_sum, sketch.total_weight());
        }
    }

    #[test]
    fn test_zero_weight_is_a_noop() {
        let mut sketch = CountMinSketch::<str>::new(3, 100);
        sketch.update_with_weight("a", 0);
        assert!(sketch.is_empty());
        assert_eq!(sketch.estimate("a"), 0);
    }
}
