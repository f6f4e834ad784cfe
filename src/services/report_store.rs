// Report Storage Service
// Flat append-only JSON file of analysis reports. Whole-file load,
// append, rewrite — guarded by a process-local mutex. IDs are
// sequential integers starting at 1; existing reports are never
// updated or deleted.

use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing::{error, info};

use crate::models::{NewReport, Report};

pub struct ReportStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl ReportStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            lock: Mutex::new(()),
        }
    }

    /// All stored reports. A missing or unreadable file yields an empty
    /// list; corruption is logged, not surfaced.
    pub fn list(&self) -> Vec<Report> {
        let _guard = self.lock.lock().unwrap_or_else(|p| p.into_inner());
        self.load_unlocked()
    }

    /// Append a report, assigning the next sequential id and the current
    /// timestamp. Returns the stored record.
    pub fn save(&self, report: NewReport) -> Result<Report> {
        let _guard = self.lock.lock().unwrap_or_else(|p| p.into_inner());

        let mut reports = self.load_unlocked();
        let id = reports.iter().map(|r| r.id).max().unwrap_or(0) + 1;

        let stored = Report {
            id,
            report_type: report.report_type,
            text: report.text,
            text1: report.text1,
            text2: report.text2,
            result: report.result,
            date: chrono::Local::now().to_rfc3339(),
        };
        reports.push(stored.clone());

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create data dir {}", parent.display()))?;
        }
        let content =
            serde_json::to_string_pretty(&reports).context("failed to serialize reports")?;
        fs::write(&self.path, content)
            .with_context(|| format!("failed to write {}", self.path.display()))?;

        info!(id, report_type = %stored.report_type, "report saved");
        Ok(stored)
    }

    fn load_unlocked(&self) -> Vec<Report> {
        if !self.path.exists() {
            return Vec::new();
        }
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) => {
                error!(path = %self.path.display(), error = %e, "failed to read reports file");
                return Vec::new();
            }
        };
        match serde_json::from_str(&content) {
            Ok(reports) => reports,
            Err(e) => {
                error!(path = %self.path.display(), error = %e, "failed to parse reports file");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AnalysisResult, SimilarityResult};

    fn store_in(dir: &tempfile::TempDir) -> ReportStore {
        ReportStore::new(dir.path().join("data").join("reports.json"))
    }

    #[test]
    fn test_ids_are_sequential_from_one() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let result = AnalysisResult::empty_text();
        let first = store
            .save(NewReport::ai_detection("one".to_string(), &result))
            .unwrap();
        let second = store
            .save(NewReport::ai_detection("two".to_string(), &result))
            .unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[test]
    fn test_ids_survive_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports.json");

        let result = AnalysisResult::empty_text();
        ReportStore::new(path.clone())
            .save(NewReport::ai_detection("one".to_string(), &result))
            .unwrap();

        // A fresh store over the same file continues the sequence.
        let reopened = ReportStore::new(path);
        let next = reopened
            .save(NewReport::ai_detection("two".to_string(), &result))
            .unwrap();
        assert_eq!(next.id, 2);
        assert_eq!(reopened.list().len(), 2);
    }

    #[test]
    fn test_similarity_report_shape() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let result = SimilarityResult {
            cosine_similarity: 1.0,
            jaccard_similarity: 1.0,
            tfidf_similarity: 0.0,
            average_similarity: 2.0 / 3.0,
        };
        let stored = store
            .save(NewReport::similarity("a".to_string(), "b".to_string(), &result))
            .unwrap();
        assert_eq!(stored.report_type, "similarity_analysis");
        assert_eq!(stored.text1.as_deref(), Some("a"));
        assert_eq!(stored.text2.as_deref(), Some("b"));
        assert!(stored.text.is_none());
        assert!(!stored.date.is_empty());
    }

    #[test]
    fn test_missing_file_lists_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert!(store.list().is_empty());
    }

    #[test]
    fn test_corrupt_file_lists_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports.json");
        fs::write(&path, "{not json").unwrap();
        let store = ReportStore::new(path);
        assert!(store.list().is_empty());
    }
}
