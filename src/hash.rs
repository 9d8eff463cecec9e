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

//! Double-hash derivation of per-row bucket indices.
//!
//! A single murmur3 x64_128 evaluation produces two independent 64-bit
//! hashes; row `i`'s bucket index is derived as `(h1 + i * h2) mod w`
//! (the Kirsch-Mitzenmacher construction). This gives each sketch row a
//! distinct, well-distributed hash function without paying for a full
//! hash evaluation per row.

use std::hash::Hash;

pub(crate) const DEFAULT_SEED: u32 = 9001;

/// A pair of independent 64-bit hashes of one item, computed once and
/// reused for every row of a sketch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashPair {
    h1: u64,
    h2: u64,
}

impl HashPair {
    /// Hashes an item with the default seed.
    pub fn new<T: Hash + ?Sized>(item: &T) -> Self {
        Self::with_seed(item, DEFAULT_SEED)
    }

    /// Hashes an item with an explicit seed.
    pub fn with_seed<T: Hash + ?Sized>(item: &T, seed: u32) -> Self {
        let mut hasher = mur3::Hasher128::with_seed(seed);
        item.hash(&mut hasher);
        let (h1, h2) = hasher.finish128();
        Self { h1, h2 }
    }

    /// Returns the bucket index for `row` in a table of `num_buckets`
    /// buckets. Deterministic in `(item, seed, row)`.
    #[inline]
    pub fn bucket(&self, row: u8, num_buckets: u32) -> usize {
        let combined = self.h1.wrapping_add((row as u64).wrapping_mul(self.h2));
        (combined % num_buckets as u64) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::HashPair;

    #[test]
    fn test_deterministic_per_row() {
        let a = HashPair::new("search query");
        let b = HashPair::new("search query");
        for row in 0..8 {
            assert_eq!(a.bucket(row, 1024), b.bucket(row, 1024));
        }
    }

    #[test]
    fn test_rows_disperse() {
        // Distinct rows should not all collapse into one bucket.
        let pair = HashPair::new("the quick brown fox");
        let buckets: Vec<usize> = (0..16).map(|row| pair.bucket(row, 1 << 20)).collect();
        let first = buckets[0];
        assert!(buckets.iter().any(|&b| b != first));
    }

    #[test]
    fn test_bucket_in_range() {
        for width in [1u32, 2, 7, 100, 10_000] {
            let pair = HashPair::new(&width);
            for row in 0..5 {
                assert!(pair.bucket(row, width) < width as usize);
            }
        }
    }
}
