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

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::error::Error;
use crate::error::ErrorKind;

/// Column order of the persisted metrics table.
pub const CSV_HEADER: &str = "limit,mg_runtime,mg_memory_kb,mg_avg_abs_error,mg_avg_rel_error,\
lc_runtime,lc_memory_kb,lc_avg_abs_error,lc_avg_rel_error";

/// One run's comparison metrics for the two dictionary approximators,
/// in the fixed schema appended to a flat CSV file across runs.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsRecord {
    /// Top-N cutoff the run reported on.
    pub limit: usize,
    pub mg_runtime: f64,
    pub mg_memory_kb: f64,
    pub mg_avg_abs_error: f64,
    pub mg_avg_rel_error: f64,
    pub lc_runtime: f64,
    pub lc_memory_kb: f64,
    pub lc_avg_abs_error: f64,
    pub lc_avg_rel_error: f64,
}

impl MetricsRecord {
    /// Renders the record as one CSV row, without a trailing newline.
    pub fn to_csv_row(&self) -> String {
        format!(
            "{},{:.6},{:.2},{:.4},{:.6},{:.6},{:.2},{:.4},{:.6}",
            self.limit,
            self.mg_runtime,
            self.mg_memory_kb,
            self.mg_avg_abs_error,
            self.mg_avg_rel_error,
            self.lc_runtime,
            self.lc_memory_kb,
            self.lc_avg_abs_error,
            self.lc_avg_rel_error,
        )
    }

    /// Appends the record to a CSV file, writing the header first when
    /// the file is new or empty.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::SourceUnavailable`] if the file cannot be
    /// opened or written.
    pub fn append_csv(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        let path = path.as_ref();
        let io_error = |err: std::io::Error| {
            Error::new(ErrorKind::SourceUnavailable, "failed to write metrics file")
                .with_context("path", path.display())
                .set_source(err)
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(io_error)?;
        let is_empty = file.metadata().map_err(io_error)?.len() == 0;
        if is_empty {
            writeln!(file, "{CSV_HEADER}").map_err(io_error)?;
        }
        writeln!(file, "{}", self.to_csv_row()).map_err(io_error)?;
        Ok(())
    }
}
