use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

use nextset::forest::AugmentedForest;
use nextset::set::{Op, SuccessorSet};

use nextset_bench::catalog::{self, Algorithm, Suite};
use nextset_bench::report::{self, Measurement};
use nextset_bench::timing::{self, TimingConfig};
use nextset_bench::workload::{self, Workload};

#[derive(Parser)]
#[command(name = "nextset-bench", about = "Successor-delete structure benchmark harness")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Time algorithms against generated workloads.
    Run {
        /// Suite: random, query-one, worst-case.
        #[arg(long, default_value = "random")]
        suite: String,
        /// Filter algorithms by name substring.
        #[arg(long)]
        algorithm: Option<String>,
        /// Smallest universe size (sweep doubles up to --max-n).
        #[arg(long, default_value_t = 2)]
        min_n: usize,
        /// Largest universe size.
        #[arg(long, default_value_t = 1 << 22)]
        max_n: usize,
        /// Queries per deletion (default sweeps 1/8 through 8).
        #[arg(long)]
        alpha: Option<f64>,
        /// Seed for the random suite.
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Seconds a timing trial must accumulate before it counts.
        #[arg(long, default_value_t = 1.0)]
        min_time: f64,
        /// Append results to this CSV file.
        #[arg(long)]
        csv: Option<PathBuf>,
        /// Output format: terminal, json.
        #[arg(long, default_value = "terminal")]
        format: String,
    },
    /// List registered algorithms and suites.
    List,
    /// Replay-verify every algorithm and audit forest invariants.
    Check {
        /// Largest universe size exercised.
        #[arg(long, default_value_t = 1024)]
        max_n: usize,
        /// Seed for randomized workloads.
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Command::Run {
            suite,
            algorithm,
            min_n,
            max_n,
            alpha,
            seed,
            min_time,
            csv,
            format,
        } => cmd_run(
            &suite, algorithm, min_n, max_n, alpha, seed, min_time, csv, &format,
        ),
        Command::List => cmd_list(),
        Command::Check { max_n, seed } => cmd_check(max_n, seed),
    }
}

fn filter_algorithms(pattern: Option<String>) -> Vec<Algorithm> {
    let mut algorithms = catalog::all_algorithms();
    if let Some(pattern) = &pattern {
        algorithms.retain(|a| a.name.contains(pattern.as_str()));
        if algorithms.is_empty() {
            eprintln!("no algorithm matches \"{pattern}\"");
            std::process::exit(2);
        }
    }
    algorithms
}

#[allow(clippy::too_many_arguments)]
fn cmd_run(
    suite_name: &str,
    algorithm: Option<String>,
    min_n: usize,
    max_n: usize,
    alpha: Option<f64>,
    seed: u64,
    min_time: f64,
    csv: Option<PathBuf>,
    format: &str,
) {
    let suite = Suite::from_name(suite_name).unwrap_or_else(|| {
        eprintln!("unknown suite: {suite_name}");
        std::process::exit(2);
    });
    let algorithms = filter_algorithms(algorithm);
    let alphas: Vec<f64> = match alpha {
        Some(a) => vec![a],
        None => catalog::ALPHAS.to_vec(),
    };
    let config = TimingConfig {
        min_test_time: min_time,
        ..TimingConfig::default()
    };

    let mut measurements = Vec::new();
    let mut n = min_n.max(2);
    while n <= max_n {
        for w in catalog::workloads(suite, n, &alphas, seed) {
            for alg in &algorithms {
                if !alg.runs(suite, n) {
                    continue;
                }
                let mut instance = alg.build(n);
                // Never time an algorithm that answers wrong
                if let Err(failure) = w.check(instance.as_mut()) {
                    eprintln!("{} on {} (n={n}): {}", alg.name, w.name, failure);
                    std::process::exit(1);
                }
                let seconds = timing::time_workload(instance.as_mut(), &w, &config);
                let m = Measurement {
                    algorithm: alg.name.to_string(),
                    workload: w.name.clone(),
                    n,
                    seconds,
                };
                println!("{}", m.csv_line());
                if let Some(path) = &csv {
                    if let Err(e) = report::append_csv(path, &m) {
                        eprintln!("cannot write {}: {e}", path.display());
                        std::process::exit(1);
                    }
                }
                measurements.push(m);
            }
        }
        n *= 2;
    }

    match format {
        "json" => println!("{}", report::to_json(&measurements)),
        _ => report::print_table(&measurements),
    }
}

fn cmd_list() {
    println!("{:<30} {:<12} {}", "Algorithm", "Query-one", "Interleaved");
    println!("{}", "-".repeat(60));
    for alg in catalog::all_algorithms() {
        let cap = match alg.query_one_cap {
            Some(cap) => format!("n ≤ {cap}"),
            None => "yes".to_string(),
        };
        let interleaved = if alg.interleaved { "yes" } else { "no" };
        println!("{:<30} {:<12} {}", alg.name, cap, interleaved);
    }
    println!();
    println!("Suites:");
    for suite in Suite::all() {
        println!("  {}", suite.name());
    }
}

/// Sizes 2, 4, 8, … up to and including `max_n`.
fn doubling_sizes(max_n: usize) -> Vec<usize> {
    let mut sizes = Vec::new();
    let mut n = 2;
    while n <= max_n {
        sizes.push(n);
        n *= 2;
    }
    sizes
}

fn cmd_check(max_n: usize, seed: u64) {
    let algorithms = catalog::all_algorithms();

    let mut workloads: Vec<(Suite, Workload)> = Vec::new();
    for &n in &doubling_sizes(max_n) {
        workloads.push((Suite::QueryOne, workload::query_one(n)));
        for alpha in [0.5, 2.0] {
            workloads.push((Suite::WorstCase, workload::worst_case(n, alpha)));
            workloads.push((Suite::Random, workload::random(n, alpha, seed)));
        }
    }

    let mut failures: Vec<String> = algorithms
        .par_iter()
        .flat_map(|alg| {
            let mut found = Vec::new();
            for (suite, w) in &workloads {
                if !alg.runs(*suite, w.n) {
                    continue;
                }
                let mut instance = alg.build(w.n);
                if let Err(failure) = w.check(instance.as_mut()) {
                    found.push(format!("{} on {} (n={}): {}", alg.name, w.name, w.n, failure));
                }
            }
            found
        })
        .collect();

    // Forest invariants, audited after every single operation; bounded
    // sizes since the audit itself is linear
    for (_, w) in workloads.iter().filter(|(_, w)| w.n <= 512) {
        if let Err(message) = audit_forest(w) {
            failures.push(message);
        }
    }

    if failures.is_empty() {
        println!(
            "OK: {} algorithms checked against {} workloads",
            algorithms.len(),
            workloads.len()
        );
    } else {
        for f in &failures {
            eprintln!("FAIL: {f}");
        }
        eprintln!("{} failure(s)", failures.len());
        std::process::exit(1);
    }
}

/// Drive an augmented forest through the workload, validating the whole
/// structure after every operation.
fn audit_forest(w: &Workload) -> Result<(), String> {
    let mut forest = AugmentedForest::new(w.n);
    for (index, op) in w.ops.iter().enumerate() {
        match *op {
            Op::Delete(i) => forest.delete(i),
            Op::Successor(i) => {
                forest.successor(i);
            }
        }
        forest
            .validate()
            .map_err(|e| format!("forest on {} (n={}) after op {}: {}", w.name, w.n, index, e))?;
    }
    Ok(())
}
