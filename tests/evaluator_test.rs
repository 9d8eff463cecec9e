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

use std::fs;

use common::skewed_stream;
use googletest::assert_that;
use googletest::prelude::contains_substring;
use streamfreq::error::ErrorKind;
use streamfreq::evaluate::Evaluator;
use streamfreq::evaluate::EvaluatorConfig;

fn evaluator_over(stream: &[String], config: EvaluatorConfig) -> Evaluator {
    let mut evaluator = Evaluator::new(config).unwrap();
    evaluator.consume(stream);
    evaluator
}

#[test]
fn rejects_invalid_heavy_hitter_ratio() {
    let config = EvaluatorConfig {
        heavy_hitter_ratio: 1.0,
        ..EvaluatorConfig::default()
    };
    let err = Evaluator::new(config).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    assert_that!(err.message(), contains_substring("heavy_hitter_ratio"));
}

#[test]
fn invalid_structure_config_fails_before_processing() {
    let config = EvaluatorConfig {
        k: 1,
        ..EvaluatorConfig::default()
    };
    assert_eq!(
        Evaluator::new(config).unwrap_err().kind(),
        ErrorKind::ConfigInvalid
    );
}

#[test]
fn ranked_rows_follow_exact_counts() {
    let stream = skewed_stream(200, 30);
    let evaluator = evaluator_over(
        &stream,
        EvaluatorConfig {
            epsilon: 0.005,
            k: 20,
            ..EvaluatorConfig::default()
        },
    );

    let rows = evaluator.top_rows(10);
    assert_eq!(rows.len(), 10);
    assert_eq!(rows[0].item, "item0");
    assert_eq!(rows[0].exact, 200);
    for pair in rows.windows(2) {
        assert!(pair[0].exact >= pair[1].exact);
    }
    for row in &rows {
        assert!(row.countmin >= row.exact, "count-min must not underestimate");
        assert!(row.lossy <= row.exact, "lossy counting must not overestimate");
        assert!(row.majority <= row.exact, "misra-gries must not overestimate");
    }
}

#[test]
fn count_ties_break_by_encounter_order() {
    let mut evaluator = Evaluator::new(EvaluatorConfig::default()).unwrap();
    evaluator.consume(["second", "first", "second", "first"]);

    let rows = evaluator.top_rows(2);
    assert_eq!(rows[0].item, "second");
    assert_eq!(rows[1].item, "first");
    assert_eq!(rows[0].exact, rows[1].exact);
}

#[test]
fn empty_heavy_hitter_set_yields_zero_metrics() {
    // Every item unique, threshold far above 1/n.
    let stream: Vec<String> = (0..100).map(|i| format!("unique{i}")).collect();
    let evaluator = evaluator_over(
        &stream,
        EvaluatorConfig {
            heavy_hitter_ratio: 0.5,
            ..EvaluatorConfig::default()
        },
    );

    assert!(evaluator.heavy_hitters().is_empty());
    for estimator in evaluator.approximators() {
        let metrics = evaluator.error_metrics(estimator);
        assert_eq!(metrics.avg_abs_error, 0.0);
        assert_eq!(metrics.avg_rel_error, 0.0);
        assert_eq!(metrics.heavy_hitters, 0);
    }
}

#[test]
fn heavy_hitter_metrics_cover_threshold_set() {
    let stream = skewed_stream(500, 40);
    let evaluator = evaluator_over(
        &stream,
        EvaluatorConfig {
            heavy_hitter_ratio: 0.01,
            epsilon: 0.005,
            k: 50,
            ..EvaluatorConfig::default()
        },
    );

    let hitters = evaluator.heavy_hitters();
    assert!(!hitters.is_empty());
    let threshold = 0.01 * evaluator.total_items() as f64;
    for (_, count) in &hitters {
        assert!(*count as f64 >= threshold);
    }

    for estimator in evaluator.approximators() {
        let metrics = evaluator.error_metrics(estimator);
        assert_eq!(metrics.heavy_hitters, hitters.len());
        assert!(metrics.avg_abs_error >= 0.0);
        assert!(metrics.avg_rel_error >= 0.0);
    }
}

#[test]
fn memory_reports_use_fixed_model() {
    let stream = skewed_stream(100, 20);
    let evaluator = evaluator_over(&stream, EvaluatorConfig::default());

    let reports = evaluator.memory_reports();
    let labels: Vec<&str> = reports.iter().map(|r| r.label).collect();
    assert_eq!(
        labels,
        ["exact", "count-min", "lossy-counting", "misra-gries"]
    );

    // Count-Min memory is exactly cells * 8, independent of the data.
    let countmin = &reports[1];
    assert_eq!(countmin.memory_bytes, 5 * 10_000 * 8);
}

#[test]
fn lookup_reports_all_structures() {
    let stream = skewed_stream(50, 5);
    let evaluator = evaluator_over(
        &stream,
        EvaluatorConfig {
            epsilon: 0.01,
            k: 4,
            ..EvaluatorConfig::default()
        },
    );

    let row = evaluator.lookup("item0");
    assert_eq!(row.exact, 50);
    assert!(row.countmin >= 50);
    assert!(row.lossy <= 50);
    assert!(row.majority <= 50);

    let absent = evaluator.lookup("never-seen");
    assert_eq!(absent.exact, 0);
    assert_eq!(absent.lossy, 0);
    assert_eq!(absent.majority, 0);
}

#[test]
fn metrics_record_appends_header_once() {
    let stream = skewed_stream(100, 10);
    let evaluator = evaluator_over(&stream, EvaluatorConfig::default());

    let path = std::env::temp_dir().join(format!(
        "streamfreq_metrics_{}_{}.csv",
        std::process::id(),
        line!()
    ));
    let _ = fs::remove_file(&path);

    let record = evaluator.metrics_record(10);
    record.append_csv(&path).unwrap();
    record.append_csv(&path).unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], streamfreq::evaluate::CSV_HEADER);
    assert!(lines[1].starts_with("10,"));
    assert_eq!(lines[1], lines[2]);

    fs::remove_file(&path).unwrap();
}
