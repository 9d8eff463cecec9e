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

//! Side-by-side evaluation of the streaming approximators against an
//! exact baseline.
//!
//! The [`Evaluator`] owns one instance of each structure and fans every
//! observed item out to all of them in stream order, in a single pass.
//! After the pass it produces ranked comparison rows, heavy-hitter
//! error metrics and per-structure memory accounting.
//!
//! # Usage
//!
//! ```rust
//! use streamfreq::evaluate::{Evaluator, EvaluatorConfig};
//!
//! let config = EvaluatorConfig {
//!     epsilon: 0.25,
//!     k: 3,
//!     ..EvaluatorConfig::default()
//! };
//! let mut evaluator = Evaluator::new(config).unwrap();
//! evaluator.consume(["a", "b", "a", "a", "c", "b", "a"]);
//!
//! let rows = evaluator.top_rows(2);
//! assert_eq!(rows[0].item, "a");
//! assert_eq!(rows[0].exact, 4);
//! assert!(rows[0].countmin >= 4);
//! ```

mod metrics;
pub use self::metrics::CSV_HEADER;
pub use self::metrics::MetricsRecord;

use std::time::Duration;
use std::time::Instant;

use crate::countmin::CountMinSketch;
use crate::error::Error;
use crate::error::ErrorKind;
use crate::exact::ExactCounter;
use crate::lossy::LossyCountingTable;
use crate::majority::MajorityCandidateTracker;
use crate::traits::FrequencyEstimator;

/// Parameters for one evaluation run.
///
/// Defaults match a web-query-log scale workload: a 5 x 10000 counter
/// table, a 0.05% lossy-counting error budget, 2000 candidate slots
/// and a 0.1% heavy-hitter threshold.
#[derive(Debug, Clone, Copy)]
pub struct EvaluatorConfig {
    /// Count-Min rows.
    pub num_hashes: u8,
    /// Count-Min buckets per row.
    pub num_buckets: u32,
    /// Lossy-counting error budget, in `(0, 1)`.
    pub epsilon: f64,
    /// Misra-Gries threshold divisor, at least 2.
    pub k: usize,
    /// Heavy-hitter threshold as a fraction of stream length, in `(0, 1)`.
    pub heavy_hitter_ratio: f64,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            num_hashes: 5,
            num_buckets: 10_000,
            epsilon: 0.0005,
            k: 2000,
            heavy_hitter_ratio: 0.001,
        }
    }
}

/// One row of the ranked comparison table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedRow {
    /// 1-based rank by exact count.
    pub rank: usize,
    pub item: String,
    pub exact: u64,
    pub countmin: u64,
    pub lossy: u64,
    pub majority: u64,
}

/// Accuracy of one approximator over the heavy-hitter set.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ErrorMetrics {
    pub avg_abs_error: f64,
    pub avg_rel_error: f64,
    /// Number of heavy hitters the averages cover; 0 means the stream
    /// had no items over the threshold and both averages are 0.
    pub heavy_hitters: usize,
}

/// Configured parameters and byte cost of one structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryReport {
    pub label: &'static str,
    pub params: String,
    pub memory_bytes: usize,
}

/// All four counts for a single item, for ad-hoc lookups after the
/// pass. This is the explicit session surface; there is no process-wide
/// lookup state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupRow {
    pub exact: u64,
    pub countmin: u64,
    pub lossy: u64,
    pub majority: u64,
}

#[derive(Debug, Clone, Copy, Default)]
struct UpdateRuntimes {
    countmin: Duration,
    lossy: Duration,
    majority: Duration,
}

/// Drives one synchronized pass over all structures and computes
/// comparative accuracy and memory reports.
#[derive(Debug)]
pub struct Evaluator {
    config: EvaluatorConfig,
    exact: ExactCounter<String>,
    countmin: CountMinSketch<str>,
    lossy: LossyCountingTable<String>,
    majority: MajorityCandidateTracker<String>,
    runtimes: UpdateRuntimes,
}

impl Evaluator {
    /// Creates all structures from one configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::ConfigInvalid`] if any parameter is out of
    /// range. Nothing is processed on failure; there are no partially
    /// initialized structures.
    pub fn new(config: EvaluatorConfig) -> Result<Self, Error> {
        if config.num_hashes < 1 || config.num_buckets < 1 {
            return Err(Error::new(
                ErrorKind::ConfigInvalid,
                "count-min dimensions must be at least 1",
            )
            .with_context("num_hashes", config.num_hashes)
            .with_context("num_buckets", config.num_buckets));
        }
        if !(config.heavy_hitter_ratio > 0.0 && config.heavy_hitter_ratio < 1.0) {
            return Err(Error::new(
                ErrorKind::ConfigInvalid,
                "heavy_hitter_ratio must be in (0, 1)",
            )
            .with_context("heavy_hitter_ratio", config.heavy_hitter_ratio));
        }
        Ok(Self {
            config,
            exact: ExactCounter::new(),
            countmin: CountMinSketch::new(config.num_hashes, config.num_buckets),
            lossy: LossyCountingTable::new(config.epsilon)?,
            majority: MajorityCandidateTracker::new(config.k)?,
            runtimes: UpdateRuntimes::default(),
        })
    }

    /// Feeds one normalized item to the baseline and all approximators,
    /// accumulating per-structure update time.
    pub fn observe(&mut self, item: &str) {
        self.exact.increment(item);

        let start = Instant::now();
        self.countmin.update(item);
        let after_countmin = Instant::now();
        self.lossy.update(item);
        let after_lossy = Instant::now();
        self.majority.update(item);
        let after_majority = Instant::now();

        self.runtimes.countmin += after_countmin - start;
        self.runtimes.lossy += after_lossy - after_countmin;
        self.runtimes.majority += after_majority - after_lossy;
    }

    /// Feeds a whole item sequence, in order.
    pub fn consume<I>(&mut self, items: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for item in items {
            self.observe(item.as_ref());
        }
    }

    /// Returns the configuration this run was created with.
    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// Total items observed.
    pub fn total_items(&self) -> u64 {
        self.exact.total_weight()
    }

    /// Distinct items observed.
    pub fn distinct_items(&self) -> usize {
        self.exact.num_distinct()
    }

    /// Returns the ground-truth counter.
    pub fn exact(&self) -> &ExactCounter<String> {
        &self.exact
    }

    /// Returns the three approximators behind their shared capability,
    /// for uniform iteration in reports.
    pub fn approximators(&self) -> [&dyn FrequencyEstimator; 3] {
        [&self.countmin, &self.lossy, &self.majority]
    }

    /// Ranked comparison of the top `n` exact items against every
    /// approximator. Count ties are broken by encounter order.
    pub fn top_rows(&self, n: usize) -> Vec<RankedRow> {
        self.exact
            .top_n(n)
            .into_iter()
            .enumerate()
            .map(|(i, (item, exact))| RankedRow {
                rank: i + 1,
                exact,
                countmin: self.countmin.estimate(item.as_str()),
                lossy: self.lossy.estimate(item.as_str()),
                majority: self.majority.estimate(item.as_str()),
                item: item.clone(),
            })
            .collect()
    }

    /// Items whose exact count is at least `heavy_hitter_ratio * n`.
    pub fn heavy_hitters(&self) -> Vec<(&str, u64)> {
        self.exact
            .heavy_hitters(self.config.heavy_hitter_ratio)
            .into_iter()
            .map(|(item, count)| (item.as_str(), count))
            .collect()
    }

    /// Average absolute and relative error of one approximator over the
    /// heavy-hitter set. Returns all zeros when no item crosses the
    /// threshold, rather than dividing by zero.
    pub fn error_metrics(&self, estimator: &dyn FrequencyEstimator) -> ErrorMetrics {
        let hitters = self.exact.heavy_hitters(self.config.heavy_hitter_ratio);
        if hitters.is_empty() {
            return ErrorMetrics::default();
        }
        let mut abs_sum = 0.0;
        let mut rel_sum = 0.0;
        for (item, exact) in &hitters {
            let abs_error = exact.abs_diff(estimator.frequency(item.as_str())) as f64;
            abs_sum += abs_error;
            rel_sum += abs_error / *exact as f64;
        }
        let count = hitters.len();
        ErrorMetrics {
            avg_abs_error: abs_sum / count as f64,
            avg_rel_error: rel_sum / count as f64,
            heavy_hitters: count,
        }
    }

    /// Per-structure configured parameters and byte cost, baseline
    /// included for comparison.
    pub fn memory_reports(&self) -> Vec<MemoryReport> {
        let stats = self.countmin.stats();
        vec![
            MemoryReport {
                label: "exact",
                params: format!("distinct={}", self.exact.num_distinct()),
                memory_bytes: self.exact.memory_bytes(),
            },
            MemoryReport {
                label: "count-min",
                params: format!(
                    "num_hashes={} num_buckets={} cells={}",
                    stats.num_hashes, stats.num_buckets, stats.total_cells
                ),
                memory_bytes: stats.memory_bytes,
            },
            MemoryReport {
                label: "lossy-counting",
                params: format!(
                    "epsilon={} window={} tracked={}",
                    self.lossy.epsilon(),
                    self.lossy.window_width(),
                    self.lossy.num_tracked()
                ),
                memory_bytes: self.lossy.memory_bytes(),
            },
            MemoryReport {
                label: "misra-gries",
                params: format!(
                    "k={} candidates={}",
                    self.majority.k(),
                    self.majority.num_candidates()
                ),
                memory_bytes: self.majority.memory_bytes(),
            },
        ]
    }

    /// All four counts for one item.
    pub fn lookup(&self, item: &str) -> LookupRow {
        LookupRow {
            exact: self.exact.count(item),
            countmin: self.countmin.estimate(item),
            lossy: self.lossy.estimate(item),
            majority: self.majority.estimate(item),
        }
    }

    /// Builds the flat metrics record persisted across runs; `limit`
    /// is the top-N cutoff the run reported on.
    pub fn metrics_record(&self, limit: usize) -> MetricsRecord {
        let mg = self.error_metrics(&self.majority);
        let lc = self.error_metrics(&self.lossy);
        MetricsRecord {
            limit,
            mg_runtime: self.runtimes.majority.as_secs_f64(),
            mg_memory_kb: self.majority.memory_bytes() as f64 / 1024.0,
            mg_avg_abs_error: mg.avg_abs_error,
            mg_avg_rel_error: mg.avg_rel_error,
            lc_runtime: self.runtimes.lossy.as_secs_f64(),
            lc_memory_kb: self.lossy.memory_bytes() as f64 / 1024.0,
            lc_avg_abs_error: lc.avg_abs_error,
            lc_avg_rel_error: lc.avg_rel_error,
        }
    }
}
