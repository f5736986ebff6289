//! Simulation report generation.

use serde::Serialize;

use super::config::SimConfig;
use super::runner::{RunOutcome, RunStats};

/// Aggregated results from multiple simulated sessions.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub num_runs: u32,
    pub cast_fraction: f64,
    pub reel_interval_ms: Option<u64>,

    // Outcome counts
    pub successes: u32,
    pub no_bite: u32,
    pub line_broke: u32,
    pub cancelled: u32,
    pub timed_out: u32,

    // Aggregated stats
    pub bite_rate: f64,
    pub avg_time_to_bite_ms: f64,
    pub avg_fight_ms: f64,
    pub avg_reels: f64,
    pub avg_bursts: f64,

    // Individual run stats for detailed analysis
    #[serde(skip)]
    pub run_stats: Vec<RunStats>,
}

impl SimReport {
    /// Create a new report from completed run stats.
    pub fn from_runs(runs: Vec<RunStats>, config: &SimConfig) -> Self {
        let num_runs = runs.len() as u32;
        let count = |outcome: RunOutcome| runs.iter().filter(|r| r.outcome == outcome).count() as u32;

        let bitten: Vec<&RunStats> = runs.iter().filter(|r| r.time_to_bite_ms.is_some()).collect();
        let bitten_count = bitten.len().max(1) as f64;

        let avg_time_to_bite_ms = bitten
            .iter()
            .filter_map(|r| r.time_to_bite_ms)
            .map(|ms| ms as f64)
            .sum::<f64>()
            / bitten_count;
        let avg_fight_ms = bitten.iter().map(|r| r.fight_ms as f64).sum::<f64>() / bitten_count;
        let avg_reels = bitten.iter().map(|r| r.reels as f64).sum::<f64>() / bitten_count;
        let avg_bursts = bitten.iter().map(|r| r.bursts as f64).sum::<f64>() / bitten_count;

        Self {
            num_runs,
            cast_fraction: config.cast_fraction,
            reel_interval_ms: config.reel_interval_ms,
            successes: count(RunOutcome::Success),
            no_bite: count(RunOutcome::NoBite),
            line_broke: count(RunOutcome::LineBroke),
            cancelled: count(RunOutcome::Cancelled),
            timed_out: count(RunOutcome::TimedOut),
            bite_rate: bitten.len() as f64 / num_runs.max(1) as f64,
            avg_time_to_bite_ms,
            avg_fight_ms,
            avg_reels,
            avg_bursts,
            run_stats: runs,
        }
    }

    fn pct(&self, n: u32) -> f64 {
        n as f64 / self.num_runs.max(1) as f64 * 100.0
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                 FISHING SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        let reel = match self.reel_interval_ms {
            Some(ms) => format!("every {}ms", ms),
            None => "never".to_string(),
        };
        report.push_str(&format!(
            "Runs: {} total, cast at {:.0}% of range, reel {}\n\n",
            self.num_runs,
            self.cast_fraction * 100.0,
            reel
        ));

        report.push_str("── OUTCOMES ─────────────────────────────────────────────────────\n");
        for (label, n) in [
            ("Landed", self.successes),
            ("No bite", self.no_bite),
            ("Line broke", self.line_broke),
            ("Cancelled", self.cancelled),
            ("Timed out", self.timed_out),
        ] {
            let pct = self.pct(n);
            let bar: String = "█".repeat((pct / 5.0) as usize);
            report.push_str(&format!("  {:<11} {:>5} {:>5.1}% {}\n", label, n, pct, bar));
        }
        report.push('\n');

        report.push_str("── TIMING ───────────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Bite Rate:           {:.1}%\n",
            self.bite_rate * 100.0
        ));
        report.push_str(&format!(
            "  Avg Time to Bite:    {:.0}ms\n",
            self.avg_time_to_bite_ms
        ));
        report.push_str(&format!("  Avg Fight:           {:.0}ms\n", self.avg_fight_ms));
        report.push_str(&format!("  Avg Reels:           {:.1}\n", self.avg_reels));
        report.push_str(&format!("  Avg Bursts:          {:.2}\n", self.avg_bursts));

        report
    }

    /// Generate a JSON report.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
