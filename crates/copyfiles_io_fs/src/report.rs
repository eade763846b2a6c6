//! Flatten-run report model and mutable report builder.

use std::collections::BTreeMap;
use std::fmt;

/// Aggregate counters and diagnostics for one `flatten_tree` run.
#[derive(Debug, Default, Clone)]
pub struct ReportCopy {
    /// Number of file entries produced by the walk.
    pub cnt_scanned: u64,
    /// Number of files written to the destination.
    pub cnt_copied: u64,
    /// Number of entries not written (dry run).
    pub cnt_skipped: u64,
    /// Total bytes written across all copies.
    pub n_bytes_copied: u64,
    /// Non-fatal conditions seen during the walk.
    pub warnings: Vec<String>,
}

impl ReportCopy {
    /// Number of collected warnings.
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// Machine-readable counters.
    pub fn to_dict(&self) -> BTreeMap<String, u64> {
        let mut dict_counts = BTreeMap::new();
        dict_counts.insert("cnt_scanned".to_string(), self.cnt_scanned);
        dict_counts.insert("cnt_copied".to_string(), self.cnt_copied);
        dict_counts.insert("cnt_skipped".to_string(), self.cnt_skipped);
        dict_counts.insert("n_bytes_copied".to_string(), self.n_bytes_copied);
        dict_counts.insert("cnt_warnings".to_string(), self.warning_count() as u64);
        dict_counts
    }

    /// Human-readable one-line summary.
    pub fn format(&self, prefix: &str) -> String {
        let dict_counts = self.to_dict();
        format!(
            "{prefix} scanned={} copied={} skipped={} bytes={} warnings={}",
            dict_counts["cnt_scanned"],
            dict_counts["cnt_copied"],
            dict_counts["cnt_skipped"],
            dict_counts["n_bytes_copied"],
            dict_counts["cnt_warnings"]
        )
    }
}

impl fmt::Display for ReportCopy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format("[COPY]"))
    }
}

/// Mutable accumulator for flatten statistics.
#[derive(Debug, Default, Clone)]
pub struct ReportCopyBuilder {
    cnt_scanned: u64,
    cnt_copied: u64,
    cnt_skipped: u64,
    n_bytes_copied: u64,
    warnings: Vec<String>,
}

impl ReportCopyBuilder {
    pub fn add_scanned(&mut self) {
        self.cnt_scanned += 1;
    }

    /// Record one committed copy of `n_bytes` bytes.
    pub fn add_copied(&mut self, n_bytes: u64) {
        self.cnt_copied += 1;
        self.n_bytes_copied += n_bytes;
    }

    pub fn add_skipped(&mut self) {
        self.cnt_skipped += 1;
    }

    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }

    /// Finalize builder into immutable report.
    pub fn build(self) -> ReportCopy {
        ReportCopy {
            cnt_scanned: self.cnt_scanned,
            cnt_copied: self.cnt_copied,
            cnt_skipped: self.cnt_skipped,
            n_bytes_copied: self.n_bytes_copied,
            warnings: self.warnings,
        }
    }
}
