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

//! Query-log tokenization: turns raw tab-separated log lines into the
//! normalized item sequence the sketches consume.
//!
//! Records are tab-separated with the query text in the second field.
//! An initial header line (one mentioning `anon` or `query`) is
//! skipped. Queries are case-folded and trimmed; empty and sentinel
//! values (`-`, `""`, `''`) are filtered out before the core ever
//! sees them.

use std::fs::File;
use std::io::BufRead;
use std::io::BufReader;
use std::path::Path;

use crate::error::Error;
use crate::error::ErrorKind;

const QUERY_FIELD: usize = 1;
const SENTINELS: [&str; 3] = ["-", "\"\"", "''"];

/// Normalizes one raw query: trim, lowercase, drop sentinels.
///
/// Returns `None` for values the stream treats as absent.
pub fn normalize(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || SENTINELS.contains(&trimmed) {
        return None;
    }
    Some(trimmed.to_lowercase())
}

/// Iterator over normalized query tokens from a tab-separated log.
///
/// Yields `Err` only for unreadable input; malformed records (missing
/// the query field) and sentinel queries are counted and skipped, so
/// downstream consumers see a clean item sequence.
#[derive(Debug)]
pub struct QueryLogReader<R> {
    lines: std::io::Lines<R>,
    saw_first_line: bool,
    records_malformed: u64,
    records_filtered: u64,
}

impl QueryLogReader<BufReader<File>> {
    /// Opens a query log on disk.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::SourceUnavailable`] if the file cannot be
    /// opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|err| {
            Error::new(ErrorKind::SourceUnavailable, "failed to open query log")
                .with_context("path", path.display())
                .set_source(err)
        })?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> QueryLogReader<R> {
    /// Wraps any buffered reader of log lines.
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            saw_first_line: false,
            records_malformed: 0,
            records_filtered: 0,
        }
    }

    /// Number of records skipped because the query field was missing.
    pub fn records_malformed(&self) -> u64 {
        self.records_malformed
    }

    /// Number of records dropped as empty or sentinel queries.
    pub fn records_filtered(&self) -> u64 {
        self.records_filtered
    }

    fn token_of(&mut self, line: &str) -> Option<String> {
        let mut fields = line.split('\t');
        let _ = fields.next();
        let Some(raw) = fields.next() else {
            self.records_malformed += 1;
            return None;
        };
        match normalize(raw) {
            Some(token) => Some(token),
            None => {
                self.records_filtered += 1;
                None
            }
        }
    }
}

impl<R: BufRead> Iterator for QueryLogReader<R> {
    type Item = Result<String, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(err) => {
                    return Some(Err(Error::new(
                        ErrorKind::SourceUnavailable,
                        "failed to read query log",
                    )
                    .set_source(err)));
                }
            };
            if !self.saw_first_line {
                self.saw_first_line = true;
                let lowered = line.to_lowercase();
                if lowered.contains("anon") || lowered.contains("query") {
                    continue;
                }
            }
            if line.trim().is_empty() {
                continue;
            }
            if let Some(token) = self.token_of(&line) {
                return Some(Ok(token));
            }
        }
    }
}
