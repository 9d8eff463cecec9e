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

//! Lossy Counting table for frequency estimation.
//!
//! Lossy Counting splits the stream into windows of `ceil(1/epsilon)`
//! items and prunes entries that cannot have exceeded one count per
//! elapsed window. Estimates are one-sided: a tracked item's count is
//! never above its true count and never more than `epsilon * n` below
//! it. Items with true frequency under `epsilon * n` may be pruned
//! entirely, which is a property of the algorithm rather than a defect.
//!
//! # Usage
//!
//! ```rust
//! use streamfreq::lossy::LossyCountingTable;
//!
//! let mut table = LossyCountingTable::<String>::new(0.01).unwrap();
//! for token in ["apple", "apple", "banana", "apple"] {
//!     table.update(token);
//! }
//!
//! assert!(table.estimate("apple") <= 3);
//! assert!(LossyCountingTable::<String>::new(1.5).is_err());
//! ```

mod table;
pub use self::table::LossyCountingTable;
