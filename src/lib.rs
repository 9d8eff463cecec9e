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

//! Streaming frequency estimation in fixed, sub-linear memory, with an
//! evaluation harness that compares the approximators against exact
//! ground truth.
//!
//! # Structures
//!
//! - [`countmin::CountMinSketch`]: fixed-size counter table; estimates
//!   never fall below the true count (overestimate-only).
//! - [`lossy::LossyCountingTable`]: windowed dictionary with periodic
//!   pruning; estimates never exceed the true count, and tracked items
//!   are within `epsilon * n` of it (underestimate-only).
//! - [`majority::MajorityCandidateTracker`]: Misra-Gries candidate set
//!   of at most `k - 1` items; any item occurring more than `n / k`
//!   times is guaranteed present (underestimate-only).
//! - [`exact::ExactCounter`]: exact baseline, evaluation only.
//!
//! All structures are built once with a fixed configuration, mutated
//! only by updates during a single sequential pass, and read-only
//! afterwards. None supports deletion or decay.
//!
//! # Evaluation
//!
//! [`evaluate::Evaluator`] fans one item stream out to every structure
//! and reports ranked comparisons, heavy-hitter error metrics and
//! byte-cost memory accounting:
//!
//! ```rust
//! use streamfreq::evaluate::{Evaluator, EvaluatorConfig};
//!
//! let mut evaluator = Evaluator::new(EvaluatorConfig {
//!     epsilon: 0.1,
//!     k: 10,
//!     ..EvaluatorConfig::default()
//! })
//! .unwrap();
//!
//! for token in ["rust", "go", "rust", "zig", "rust"] {
//!     evaluator.observe(token);
//! }
//!
//! let top = evaluator.top_rows(1);
//! assert_eq!(top[0].item, "rust");
//! assert!(top[0].countmin >= top[0].exact);
//! ```
//!
//! Item sequences come from an upstream tokenizer such as
//! [`stream::QueryLogReader`]; the structures themselves know nothing
//! about files or record formats.

pub mod countmin;
pub mod error;
pub mod evaluate;
pub mod exact;
pub mod hash;
pub mod lossy;
pub mod majority;
pub mod stream;
pub mod traits;
