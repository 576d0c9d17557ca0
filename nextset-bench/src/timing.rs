/// Best-of-N timing with auto-scaling repeat counts.
use std::time::Instant;

use nextset::set::SuccessorSet;

use crate::workload::Workload;

/// Timing parameters.
#[derive(Debug, Clone)]
pub struct TimingConfig {
    /// Wall-clock seconds a trial must accumulate before it counts.
    pub min_test_time: f64,
    /// Repeat count the first trial starts from.
    pub min_repeats: usize,
    /// Number of trials; the best per-replay time wins.
    pub best_of: usize,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            min_test_time: 1.0,
            min_repeats: 5,
            best_of: 3,
        }
    }
}

/// Time one algorithm on one workload; returns best seconds per replay.
///
/// Each trial replays the workload `repeats` times, doubling `repeats`
/// until the trial exceeds the minimum test time; the learned count
/// carries over to later trials. Short workloads are thereby repeated
/// enough for the clock to resolve them.
pub fn time_workload(
    alg: &mut dyn SuccessorSet,
    workload: &Workload,
    config: &TimingConfig,
) -> f64 {
    let mut best = f64::INFINITY;
    let mut fold = 0usize;
    let mut repeats = config.min_repeats.max(1);
    for _ in 0..config.best_of {
        let start = Instant::now();
        let mut done = 0;
        let seconds = loop {
            while done < repeats {
                fold ^= workload.replay(alg);
                done += 1;
            }
            let elapsed = start.elapsed().as_secs_f64();
            if elapsed >= config.min_test_time {
                break elapsed;
            }
            repeats *= 2;
        };
        best = best.min(seconds / done as f64);
    }
    std::hint::black_box(fold);
    best
}
