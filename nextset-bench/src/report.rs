/// Measurement records: CSV append, JSON, terminal table.
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

/// One timed (algorithm, workload, n) combination.
#[derive(Debug, Clone, Serialize)]
pub struct Measurement {
    pub algorithm: String,
    pub workload: String,
    pub n: usize,
    /// Best per-replay wall-clock seconds.
    pub seconds: f64,
}

impl Measurement {
    /// Render in the data-file format: quoted names, n, seconds.
    pub fn csv_line(&self) -> String {
        format!(
            "\"{}\", \"{}\", {}, {:.10e}",
            self.algorithm, self.workload, self.n, self.seconds
        )
    }
}

/// Append one measurement to the data file, creating it if needed.
pub fn append_csv(path: &Path, measurement: &Measurement) -> std::io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{}", measurement.csv_line())
}

/// Render all measurements as JSON.
pub fn to_json(measurements: &[Measurement]) -> String {
    serde_json::to_string_pretty(measurements)
        .unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"))
}

/// Print a terminal table of all measurements.
pub fn print_table(measurements: &[Measurement]) {
    println!(
        "{:<30} {:<18} {:>10} {:>14}",
        "Algorithm", "Workload", "n", "Seconds"
    );
    println!("{}", "-".repeat(75));
    for m in measurements {
        println!(
            "{:<30} {:<18} {:>10} {:>14.4e}",
            m.algorithm, m.workload, m.n, m.seconds
        );
    }
    println!("{}", "-".repeat(75));
    println!("Total: {} measurements", measurements.len());
}
