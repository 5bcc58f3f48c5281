use anyhow::Context;
use fusioncore::ScanReport;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

/// Prints per-cycle results and optionally appends them to a log file.
pub struct ReportWriter {
    json: bool,
    log_path: Option<PathBuf>,
}

impl ReportWriter {
    pub fn new(json: bool, log_path: Option<PathBuf>) -> Self {
        Self { json, log_path }
    }

    pub fn write_cycle(&self, index: usize, report: &ScanReport) -> anyhow::Result<()> {
        if self.json {
            println!(
                "{}",
                report.to_json().context("serializing scan report")?
            );
        } else {
            println!("{}", render_cycle(index, report));
        }

        if let Some(path) = &self.log_path {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
            let mut file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening report log {}", path.display()))?;
            writeln!(file, "{}", log_line(index, report))
                .with_context(|| format!("appending to {}", path.display()))?;
        }
        Ok(())
    }

    pub fn status(&self, message: &str) {
        if !self.json {
            println!("[replay] {}", message);
        }
    }
}

/// Human-readable block: header, one line per target, summary.
pub fn render_cycle(index: usize, report: &ScanReport) -> String {
    let mut out = format!(
        "--- Cycle {}: {} targets ({:.3} ms) ---\n",
        index + 1,
        report.targets.len(),
        report.metrics.processing_time_ms
    );
    for target in &report.targets {
        out.push_str(&format!("{}  [{}]\n", target, target.description));
    }
    out.push_str(&format!(
        "summary: {} avg_conf={:.3} tracked={}",
        report.summary, report.metrics.average_confidence, report.velocities_updated
    ));
    out
}

pub fn log_line(index: usize, report: &ScanReport) -> String {
    format!(
        "cycle={} {} avg_conf={:.3} time_ms={:.3}",
        index + 1,
        report.summary,
        report.metrics.average_confidence,
        report.metrics.processing_time_ms
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use fusioncore::{ScanReadings, TargetDetector};

    fn sample_report() -> ScanReport {
        let detector = TargetDetector::new();
        let readings = ScanReadings {
            radar: vec![vec![0.0, 0.0, 0.0, 0.9]],
            thermal: vec![vec![1.0, 0.0, 0.0, 40.0]],
            ..Default::default()
        };
        detector.scan_with_dt(&readings, 1.0)
    }

    #[test]
    fn render_lists_every_target() {
        let text = render_cycle(0, &sample_report());
        assert!(text.starts_with("--- Cycle 1: 1 targets"));
        assert!(text.contains("Radar detection + Thermal"));
        assert!(text.contains("fused=1"));
    }

    #[test]
    fn writer_appends_log_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("replay.log");
        let writer = ReportWriter::new(false, Some(path.clone()));
        let report = sample_report();

        writer.write_cycle(0, &report).unwrap();
        writer.write_cycle(1, &report).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with("cycle=2 targets=1"));
    }
}
