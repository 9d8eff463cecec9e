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

//! Misra-Gries majority-candidate tracker.
//!
//! The tracker keeps at most `k - 1` candidate items. When a new item
//! arrives with the table full, every candidate's count is decremented
//! by one instead of inserting the newcomer. An item with true
//! frequency above `n / k` accumulates increments faster than the
//! shared decrement rate can deplete it, so it is guaranteed to be
//! present at stream end with a count no more than `n / k` below its
//! true count. Estimates are one-sided underestimates; absent items
//! report zero.
//!
//! The tracker is strictly one-pass: surviving candidate counts are
//! not re-verified against the stream.
//!
//! # Usage
//!
//! ```rust
//! use streamfreq::majority::MajorityCandidateTracker;
//!
//! let mut tracker = MajorityCandidateTracker::<String>::new(3).unwrap();
//! for token in ["a", "b", "a", "a", "c", "b", "a"] {
//!     tracker.update(token);
//! }
//!
//! // "a" occurs more than 7/3 times, so it must survive.
//! assert!(tracker.estimate("a") >= 1);
//! assert!(tracker.num_candidates() <= 2);
//! ```

mod tracker;
pub use self::tracker::MajorityCandidateTracker;
