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

use std::io::Cursor;

use googletest::assert_that;
use googletest::prelude::contains_substring;
use streamfreq::error::ErrorKind;
use streamfreq::stream::QueryLogReader;

fn tokens_of(log: &str) -> (Vec<String>, u64, u64) {
    let mut reader = QueryLogReader::new(Cursor::new(log.to_string()));
    let tokens: Vec<String> = reader.by_ref().map(|t| t.unwrap()).collect();
    (tokens, reader.records_malformed(), reader.records_filtered())
}

#[test]
fn skips_header_and_normalizes_queries() {
    let log = "AnonID\tQuery\tQueryTime\n\
               1\t  New YORK \t2006-03-01\n\
               2\tweather\t2006-03-01\n\
               3\tNEW york\t2006-03-02\n";
    let (tokens, malformed, filtered) = tokens_of(log);

    assert_eq!(tokens, ["new york", "weather", "new york"]);
    assert_eq!(malformed, 0);
    assert_eq!(filtered, 0);
}

#[test]
fn first_line_without_header_keywords_is_data() {
    let log = "1\trust sketches\t2006-03-01\n2\trust sketches\t2006-03-01\n";
    let (tokens, _, _) = tokens_of(log);
    assert_eq!(tokens, ["rust sketches", "rust sketches"]);
}

#[test]
fn filters_sentinel_and_malformed_records() {
    let log = "AnonID\tQuery\n\
               1\t-\n\
               2\t\n\
               3\t''\n\
               4\t\"\"\n\
               no-tab-in-this-line\n\
               5\tkept\n";
    let (tokens, malformed, filtered) = tokens_of(log);

    assert_eq!(tokens, ["kept"]);
    assert_eq!(malformed, 1);
    assert_eq!(filtered, 4);
}

#[test]
fn missing_file_reports_source_unavailable() {
    let err = QueryLogReader::open("/nonexistent/query.log").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SourceUnavailable);
    assert_that!(err.message(), contains_substring("failed to open query log"));
}
