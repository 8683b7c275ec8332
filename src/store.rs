//! Application state container for the viewer.
//!
//! One owned instance per viewer session, injected into consumers; not a
//! module-level global. Holds the current report, the selected file/case,
//! and the sanitized graph derived from that selection.

use serde::{Deserialize, Serialize};

use crate::analysis::AnalysisReport;
use crate::error::{CasegraphError, Result};
use crate::graph::{sanitize_graph, GraphData};

/// Upload/analysis progress as surfaced in the sidebar status badge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisStatus {
    #[default]
    Idle,
    Analyzing,
    Complete,
    Error,
}

/// Owns the current analysis state: report, selection, and the derived
/// graph. The graph slot is only ever replaced wholesale, so a reader never
/// observes a partially updated, invariant-violating graph.
#[derive(Debug, Clone, Default)]
pub struct AnalysisStore {
    report: Option<AnalysisReport>,
    cur_file: usize,
    cur_case: usize,
    graph: GraphData,
    status: AnalysisStatus,
}

impl AnalysisStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a freshly parsed report. Selection always resets to file 0,
    /// case 0; an index left over from a previous upload must never be
    /// applied to a new report.
    pub fn set_report(&mut self, report: AnalysisReport) {
        self.cur_file = 0;
        self.cur_case = 0;
        self.graph = match report.case(0, 0) {
            Ok(case) => sanitize_graph(&case.raw_graph()),
            Err(_) => {
                log::info!("Report has no cases; graph cleared");
                GraphData::default()
            }
        };
        self.report = Some(report);
        self.status = AnalysisStatus::Complete;
    }

    /// Switch to another file/case and re-derive the graph. On a bad index
    /// the previous selection and graph stay in place.
    pub fn select_case(&mut self, file: usize, case: usize) -> Result<()> {
        let selected = match self.report.as_ref() {
            Some(report) => report.case(file, case)?,
            None => return Err(CasegraphError::FileNotFound(file)),
        };
        let graph = sanitize_graph(&selected.raw_graph());
        log::debug!(
            "Selected file {} case {}: {}",
            file,
            case,
            graph.stats()
        );
        self.cur_file = file;
        self.cur_case = case;
        self.graph = graph;
        Ok(())
    }

    pub fn set_status(&mut self, status: AnalysisStatus) {
        self.status = status;
    }

    /// Read-only view for the rendering pass.
    pub fn graph(&self) -> &GraphData {
        &self.graph
    }

    pub fn status(&self) -> AnalysisStatus {
        self.status
    }

    pub fn report(&self) -> Option<&AnalysisReport> {
        self.report.as_ref()
    }

    /// Current (file, case) selection.
    pub fn selection(&self) -> (usize, usize) {
        (self.cur_file, self.cur_case)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn two_case_report() -> AnalysisReport {
        AnalysisReport::from_value(&json!({
            "status": "success",
            "data": [{
                "filename": "a.pdf",
                "cases": [
                    {
                        "case_id": "1",
                        "headline": "first",
                        "ai_analysis": {
                            "entities": [{"id": "e1", "label": "A"}],
                            "relationships": []
                        }
                    },
                    {
                        "case_id": "2",
                        "headline": "second",
                        "ai_analysis": {
                            "entities": [{"id": "x"}, {"id": "y"}],
                            "relationships": [
                                {"id": "r1", "source": "x", "target": "y"},
                                {"id": "r2", "source": "x", "target": "gone"}
                            ]
                        }
                    }
                ]
            }]
        }))
        .unwrap()
    }

    #[test]
    fn test_initial_state() {
        let store = AnalysisStore::new();
        assert_eq!(store.status(), AnalysisStatus::Idle);
        assert!(store.graph().is_empty());
        assert!(store.report().is_none());
    }

    #[test]
    fn test_set_report_derives_first_case() {
        let mut store = AnalysisStore::new();
        store.set_report(two_case_report());
        assert_eq!(store.status(), AnalysisStatus::Complete);
        assert_eq!(store.selection(), (0, 0));
        assert_eq!(store.graph().entities.len(), 1);
    }

    #[test]
    fn test_set_report_resets_stale_selection() {
        let mut store = AnalysisStore::new();
        store.set_report(two_case_report());
        store.select_case(0, 1).unwrap();
        assert_eq!(store.selection(), (0, 1));
        // A new upload must not inherit the case index from the old one
        store.set_report(two_case_report());
        assert_eq!(store.selection(), (0, 0));
        assert_eq!(store.graph().entities.len(), 1);
    }

    #[test]
    fn test_select_case_sanitizes() {
        let mut store = AnalysisStore::new();
        store.set_report(two_case_report());
        store.select_case(0, 1).unwrap();
        let graph = store.graph();
        assert_eq!(graph.entities.len(), 2);
        // r2's target does not resolve
        assert_eq!(graph.relationships.len(), 1);
        assert_eq!(graph.relationships[0]["id"], json!("r1"));
    }

    #[test]
    fn test_select_case_out_of_range_keeps_state() {
        let mut store = AnalysisStore::new();
        store.set_report(two_case_report());
        assert!(store.select_case(0, 9).is_err());
        assert_eq!(store.selection(), (0, 0));
        assert_eq!(store.graph().entities.len(), 1);
    }

    #[test]
    fn test_select_case_without_report() {
        let mut store = AnalysisStore::new();
        assert!(store.select_case(0, 0).is_err());
    }

    #[test]
    fn test_empty_report_clears_graph() {
        let mut store = AnalysisStore::new();
        store.set_report(two_case_report());
        store.set_report(AnalysisReport::default());
        assert!(store.graph().is_empty());
        assert_eq!(store.status(), AnalysisStatus::Complete);
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let s = serde_json::to_string(&AnalysisStatus::Analyzing).unwrap();
        assert_eq!(s, "\"analyzing\"");
    }
}
