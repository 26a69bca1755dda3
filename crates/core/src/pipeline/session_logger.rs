use std::collections::HashMap;
use std::time::Instant;

/// Cross-cutting logger for live session events.
///
/// Keeps the capture loop free of any particular output mechanism; the CLI
/// reports through the `log` crate, tests discard everything.
pub trait SessionLogger: Send {
    /// Called once per presented frame.
    fn frame(&mut self, index: usize);

    /// Record how long a named loop stage took for one frame.
    fn timing(&mut self, stage: &str, duration_ms: f64);

    /// Record a point-in-time metric (e.g. faces found in a frame).
    fn metric(&mut self, name: &str, value: f64);

    /// Log a human-readable status message.
    fn info(&mut self, message: &str);

    /// Emit an end-of-session summary. Default: no-op.
    fn summary(&self) {}
}

/// Silent logger that discards all events.
pub struct NullSessionLogger;

impl SessionLogger for NullSessionLogger {
    fn frame(&mut self, _index: usize) {}
    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
    fn metric(&mut self, _name: &str, _value: f64) {}
    fn info(&mut self, _message: &str) {}
}

/// Sample count and sum for one named stage or metric.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RunningTotal {
    pub count: u64,
    pub total: f64,
}

impl RunningTotal {
    fn add(&mut self, value: f64) {
        self.count += 1;
        self.total += value;
    }

    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.total / self.count as f64
        }
    }
}

/// Aggregates per-stage timings and metrics into running totals and reports
/// them when the session ends. Memory use does not grow with session length.
///
/// Every `report_every` frames a debug record with the running frame
/// count is emitted.
pub struct SummarySessionLogger {
    report_every: usize,
    timings: HashMap<String, RunningTotal>,
    metrics: HashMap<String, RunningTotal>,
    start_time: Instant,
    frames: usize,
}

impl SummarySessionLogger {
    pub fn new(report_every: usize) -> Self {
        Self {
            report_every: report_every.max(1),
            timings: HashMap::new(),
            metrics: HashMap::new(),
            start_time: Instant::now(),
            frames: 0,
        }
    }

    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Returns the formatted summary string, or `None` if no frame was shown.
    pub fn summary_string(&self) -> Option<String> {
        if self.frames == 0 {
            return None;
        }

        let elapsed_ms = self.start_time.elapsed().as_secs_f64() * 1000.0;
        let frames = self.frames;
        let mut lines = Vec::new();

        lines.push(format!(
            "Session summary ({frames} frames, {:.1}s total):",
            elapsed_ms / 1000.0
        ));

        let mut stages: Vec<_> = self.timings.iter().collect();
        stages.sort_by(|a, b| a.0.cmp(b.0));
        for (stage, stats) in stages {
            let total_ms = stats.total;
            let avg_ms = stats.mean();
            let pct = if elapsed_ms > 0.0 {
                total_ms / elapsed_ms * 100.0
            } else {
                0.0
            };
            lines.push(format!(
                "  {stage:10}: avg {avg_ms:6.1}ms  total {total_ms:7.0}ms  ({pct:4.1}%)"
            ));
        }

        let mut metrics: Vec<_> = self.metrics.iter().collect();
        metrics.sort_by(|a, b| a.0.cmp(b.0));
        for (name, stats) in metrics {
            lines.push(format!("  {name}: avg {:.1}", stats.mean()));
        }

        if elapsed_ms > 0.0 {
            let fps = frames as f64 / (elapsed_ms / 1000.0);
            lines.push(format!("  Throughput: {fps:.1} fps"));
        }

        Some(lines.join("\n"))
    }

    pub fn timing_totals(&self, stage: &str) -> Option<RunningTotal> {
        self.timings.get(stage).copied()
    }

    pub fn metric_totals(&self, name: &str) -> Option<RunningTotal> {
        self.metrics.get(name).copied()
    }
}

impl Default for SummarySessionLogger {
    fn default() -> Self {
        Self::new(100)
    }
}

impl SessionLogger for SummarySessionLogger {
    fn frame(&mut self, index: usize) {
        self.frames += 1;
        if self.frames % self.report_every == 0 {
            log::debug!("Presented {} frames (last index {index})", self.frames);
        }
    }

    fn timing(&mut self, stage: &str, duration_ms: f64) {
        if let Some(stats) = self.timings.get_mut(stage) {
            stats.add(duration_ms);
        } else {
            self.timings
                .entry(stage.to_string())
                .or_default()
                .add(duration_ms);
        }
    }

    fn metric(&mut self, name: &str, value: f64) {
        if let Some(stats) = self.metrics.get_mut(name) {
            stats.add(value);
        } else {
            self.metrics.entry(name.to_string()).or_default().add(value);
        }
    }

    fn info(&mut self, message: &str) {
        log::info!("{message}");
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n\n{text}");
        }
    }
}
