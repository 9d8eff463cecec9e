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

mod common;

use common::skewed_stream;
use common::true_counts;
use streamfreq::countmin::CountMinSketch;

#[test]
fn estimate_never_below_true_count() {
    let stream = skewed_stream(200, 40);
    let mut sketch = CountMinSketch::<str>::new(3, 256);
    for item in &stream {
        sketch.update(item);
    }

    for (item, count) in true_counts(&stream) {
        assert!(
            sketch.estimate(item) >= count,
            "underestimated {item}: {} < {count}",
            sketch.estimate(item)
        );
    }
    assert_eq!(sketch.total_weight(), stream.len() as u64);
}

#[test]
fn small_stream_scenario() {
    let mut sketch = CountMinSketch::<str>::new(3, 100);
    for item in ["a", "b", "a", "a", "c", "b", "a"] {
        sketch.update(item);
    }

    assert!(sketch.estimate("a") >= 4);
    assert!(sketch.estimate("b") >= 2);
    assert!(sketch.estimate("c") >= 1);
    assert_eq!(sketch.total_weight(), 7);
}

#[test]
fn estimate_is_idempotent() {
    let mut sketch = CountMinSketch::<str>::new(5, 128);
    sketch.update_with_weight("token", 7);

    let first = sketch.estimate("token");
    assert_eq!(sketch.estimate("token"), first);
    assert_eq!(sketch.estimate("token"), first);
}

#[test]
fn unseen_item_estimates_zero_in_sparse_table() {
    let mut sketch = CountMinSketch::<str>::new(5, 65_536);
    sketch.update("only");
    // With one update in a wide table, a different item colliding in
    // every row is effectively impossible.
    assert_eq!(sketch.estimate("other"), 0);
}

#[test]
fn stats_report_fixed_memory_model() {
    let sketch = CountMinSketch::<str>::new(5, 10_000);
    let stats = sketch.stats();

    assert_eq!(stats.num_hashes, 5);
    assert_eq!(stats.num_buckets, 10_000);
    assert_eq!(stats.total_cells, 50_000);
    assert_eq!(stats.memory_bytes, 400_000);
}

#[test]
fn suggest_helpers_match_bounds() {
    // ceil(e / 0.01) = 272, ceil(ln(1 / 0.01)) = 5.
    assert_eq!(CountMinSketch::<str>::suggest_num_buckets(0.01), 272);
    assert_eq!(CountMinSketch::<str>::suggest_num_hashes(0.99), 5);
}

#[test]
#[should_panic(expected = "num_buckets must be at least 1")]
fn zero_buckets_panics() {
    let _ = CountMinSketch::<str>::new(5, 0);
}
