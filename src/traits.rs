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

//! Shared capability of the streaming approximators, plus the byte-cost
//! model used for memory accounting.
//!
//! All memory figures reported by this crate come from an explicit,
//! documented cost model rather than runtime object-size introspection,
//! so reports are comparable across structures and reproducible across
//! platforms.

/// Size in bytes of one counter word.
pub const COUNTER_BYTES: usize = 8;

/// Fixed per-entry bookkeeping charge for the hash-table based
/// structures (hash code, control byte, allocator padding). Applied
/// uniformly so the dictionary structures stay comparable.
pub const ENTRY_OVERHEAD_BYTES: usize = 32;

/// Byte cost of a key under the fixed memory model.
pub trait ByteCost {
    /// Number of bytes charged for this value.
    fn byte_cost(&self) -> usize;
}

impl ByteCost for String {
    fn byte_cost(&self) -> usize {
        self.len()
    }
}

impl ByteCost for str {
    fn byte_cost(&self) -> usize {
        self.len()
    }
}

impl ByteCost for u64 {
    fn byte_cost(&self) -> usize {
        8
    }
}

impl ByteCost for i64 {
    fn byte_cost(&self) -> usize {
        8
    }
}

/// The common surface of the streaming frequency approximators.
///
/// The evaluation harness drives heterogeneous structures (a counter
/// table, a windowed dictionary and a bounded candidate set) through a
/// single pass and queries them uniformly through this trait.
pub trait FrequencyEstimator {
    /// Feed one normalized item to the structure.
    fn record(&mut self, item: &str);

    /// Estimated frequency of an item; 0 if the structure no longer
    /// (or never) tracks it.
    fn frequency(&self, item: &str) -> u64;

    /// Memory charged to the structure under the fixed byte-cost model.
    fn memory_bytes(&self) -> usize;

    /// Short, stable name for reports.
    fn label(&self) -> &'static str;
}
