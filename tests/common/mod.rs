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

use std::collections::HashMap;

/// Deterministic skewed stream: `item0` appears every round, `item1`
/// every second round and so on, interleaved in stream order.
pub fn skewed_stream(rounds: usize, distinct: usize) -> Vec<String> {
    let mut stream = Vec::new();
    for round in 0..rounds {
        for item in 0..distinct {
            if round % (item + 1) == 0 {
                stream.push(format!("item{item}"));
            }
        }
    }
    stream
}

pub fn true_counts(stream: &[String]) -> HashMap<&str, u64> {
    let mut counts = HashMap::new();
    for item in stream {
        *counts.entry(item.as_str()).or_insert(0) += 1;
    }
    counts
}
