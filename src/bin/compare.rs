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

//! Runs all approximators side by side over a query log and prints the
//! comparison report.

use std::io::BufRead;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use streamfreq::error::Error;
use streamfreq::evaluate::Evaluator;
use streamfreq::evaluate::EvaluatorConfig;
use streamfreq::stream::QueryLogReader;
use streamfreq::stream::normalize;
use tracing::info;
use tracing_subscriber::EnvFilter;

const PROGRESS_EVERY: u64 = 100_000;

#[derive(Debug, Parser)]
#[command(
    name = "compare",
    about = "Compare streaming frequency approximators against exact counts"
)]
struct Args {
    /// Tab-separated query log (query text in the second field).
    path: PathBuf,

    /// Count-Min rows.
    #[arg(long, default_value_t = 5)]
    num_hashes: u8,

    /// Count-Min buckets per row.
    #[arg(long, default_value_t = 10_000)]
    num_buckets: u32,

    /// Lossy-counting error budget.
    #[arg(long, default_value_t = 0.0005)]
    epsilon: f64,

    /// Misra-Gries threshold divisor.
    #[arg(long, default_value_t = 2000)]
    k: usize,

    /// Heavy-hitter threshold as a fraction of stream length.
    #[arg(long, default_value_t = 0.001)]
    heavy_hitter_ratio: f64,

    /// Number of top items in the ranked table.
    #[arg(long, default_value_t = 10)]
    limit: usize,

    /// Append this run's metrics to a CSV file.
    #[arg(long)]
    metrics: Option<PathBuf>,

    /// After the report, look up frequencies interactively on stdin.
    #[arg(long)]
    interactive: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Error> {
    let mut evaluator = Evaluator::new(EvaluatorConfig {
        num_hashes: args.num_hashes,
        num_buckets: args.num_buckets,
        epsilon: args.epsilon,
        k: args.k,
        heavy_hitter_ratio: args.heavy_hitter_ratio,
    })?;

    let mut reader = QueryLogReader::open(&args.path)?;
    info!(path = %args.path.display(), "processing query log");

    let start = Instant::now();
    for token in reader.by_ref() {
        evaluator.observe(&token?);
        if evaluator.total_items() % PROGRESS_EVERY == 0 {
            info!(processed = evaluator.total_items(), "still reading");
        }
    }
    let elapsed = start.elapsed();
    info!(
        processed = evaluator.total_items(),
        distinct = evaluator.distinct_items(),
        malformed = reader.records_malformed(),
        filtered = reader.records_filtered(),
        elapsed_secs = elapsed.as_secs_f64(),
        "pass complete"
    );

    print_report(&evaluator, args.limit);

    if let Some(path) = &args.metrics {
        evaluator.metrics_record(args.limit).append_csv(path)?;
        info!(path = %path.display(), "metrics appended");
    }

    if args.interactive {
        interactive_loop(&evaluator)?;
    }
    Ok(())
}

fn print_report(evaluator: &Evaluator, limit: usize) {
    println!();
    println!(
        "{:<5} | {:<40} | {:>8} | {:>8} | {:>8} | {:>8}",
        "RANK", "QUERY", "EXACT", "CMS", "LC", "MG"
    );
    println!("{}", "-".repeat(92));
    for row in evaluator.top_rows(limit) {
        let item: String = row.item.chars().take(40).collect();
        println!(
            "{:<5} | {:<40} | {:>8} | {:>8} | {:>8} | {:>8}",
            row.rank, item, row.exact, row.countmin, row.lossy, row.majority
        );
    }

    println!();
    println!(
        "Heavy-hitter accuracy (threshold {:.4}):",
        evaluator.config().heavy_hitter_ratio
    );
    for estimator in evaluator.approximators() {
        let metrics = evaluator.error_metrics(estimator);
        println!(
            "  {:<15} avg abs error {:>10.2}   avg rel error {:>8.4}   over {} heavy hitters",
            estimator.label(),
            metrics.avg_abs_error,
            metrics.avg_rel_error,
            metrics.heavy_hitters
        );
    }

    println!();
    println!("Memory (fixed byte-cost model):");
    for report in evaluator.memory_reports() {
        println!(
            "  {:<15} {:>12.2} KB   {}",
            report.label,
            report.memory_bytes as f64 / 1024.0,
            report.params
        );
    }
}

fn interactive_loop(evaluator: &Evaluator) -> Result<(), Error> {
    println!();
    println!("Enter queries to estimate their frequency; blank line or EOF quits.");
    let stdin = std::io::stdin();
    loop {
        print!("query> ");
        let _ = std::io::stdout().flush();
        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(_) => break,
        }
        let Some(token) = normalize(&line) else {
            break;
        };
        let row = evaluator.lookup(&token);
        println!(
            "  exact {}   count-min {}   lossy-counting {}   misra-gries {}",
            row.exact, row.countmin, row.lossy, row.majority
        );
    }
    Ok(())
}
