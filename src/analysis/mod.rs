//! Analysis response parsing: the envelope the analyze endpoint returns.
//!
//! The service replies `{status, data: [{filename, cases: [...]}]}`, but the
//! nesting and key names drift in practice (`data` sometimes arrives as a
//! single object, and a case's `ai_analysis` keeps its graph under varying
//! keys). This module is the only layer allowed to signal failure; once a
//! report exists, everything downstream is total.

use serde::Serialize;
use serde_json::{json, Value};

use crate::error::{CasegraphError, Result};

/// A parsed analyze response: one entry per uploaded file.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AnalysisReport {
    pub files: Vec<FileAnalysis>,
}

/// Analysis results for a single uploaded document.
#[derive(Debug, Clone, Serialize)]
pub struct FileAnalysis {
    pub filename: String,
    pub cases: Vec<CaseAnalysis>,
}

/// One extracted case within a document.
#[derive(Debug, Clone, Serialize)]
pub struct CaseAnalysis {
    pub case_id: String,
    pub headline: String,
    /// Raw model output for this case; sanitized on selection, never here.
    pub ai_analysis: Value,
}

impl AnalysisReport {
    /// Parse the response envelope. Fails only on a missing/garbled envelope
    /// or an explicit error status; malformed individual cases degrade to
    /// empty analysis instead.
    pub fn from_value(raw: &Value) -> Result<Self> {
        let obj = raw
            .as_object()
            .ok_or_else(|| CasegraphError::Parse("response is not a JSON object".to_string()))?;

        if let Some(status) = obj.get("status").and_then(Value::as_str) {
            if status != "success" {
                let message = obj
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or("no message");
                return Err(CasegraphError::Parse(format!(
                    "analysis failed (status {status}): {message}"
                )));
            }
        }

        // `data` is documented as an array of per-file results, but the
        // backend has been seen returning a bare object for single uploads.
        let files = match obj.get("data") {
            Some(Value::Array(items)) => items.iter().map(parse_file).collect(),
            Some(file @ Value::Object(_)) => vec![parse_file(file)],
            _ => {
                return Err(CasegraphError::Parse(
                    "response has no data field".to_string(),
                ))
            }
        };

        Ok(AnalysisReport { files })
    }

    /// Case lookup with bounds reported as typed errors.
    pub fn case(&self, file: usize, case: usize) -> Result<&CaseAnalysis> {
        let file_analysis = self
            .files
            .get(file)
            .ok_or(CasegraphError::FileNotFound(file))?;
        file_analysis
            .cases
            .get(case)
            .ok_or(CasegraphError::CaseNotFound { file, case })
    }
}

fn parse_file(raw: &Value) -> FileAnalysis {
    let filename = raw
        .get("filename")
        .and_then(Value::as_str)
        .unwrap_or("unknown")
        .to_string();
    let cases = match raw.get("cases") {
        Some(Value::Array(items)) => items.iter().map(parse_case).collect(),
        _ => {
            log::warn!("File entry '{}' has no cases array", filename);
            Vec::new()
        }
    };
    FileAnalysis { filename, cases }
}

fn parse_case(raw: &Value) -> CaseAnalysis {
    // case_id doubles as the page number upstream, so it may be numeric
    let case_id = match raw.get("case_id") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    };
    let headline = raw
        .get("headline")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let ai_analysis = raw.get("ai_analysis").cloned().unwrap_or(Value::Null);
    CaseAnalysis {
        case_id,
        headline,
        ai_analysis,
    }
}

impl CaseAnalysis {
    /// Extract the `{entities, relationships}` slice from the model output,
    /// resolving the key aliases seen in the wild: nodes/edges (graph
    /// payloads), relations (extraction payloads), and a nested
    /// `graph_data` object. Missing or garbled analysis yields an empty
    /// slice for the sanitizer to confirm.
    pub fn raw_graph(&self) -> Value {
        let scope = match self.ai_analysis.get("graph_data") {
            // Prefer the nested graph when it actually holds node data
            Some(gd @ Value::Object(_)) if gd.get("nodes").is_some() => gd,
            _ => &self.ai_analysis,
        };
        let entities = first_of(scope, &["entities", "nodes"]);
        let relationships = first_of(scope, &["relationships", "edges", "relations"]);
        json!({
            "entities": entities,
            "relationships": relationships,
        })
    }
}

fn first_of(scope: &Value, keys: &[&str]) -> Value {
    keys.iter()
        .find_map(|key| scope.get(*key))
        .cloned()
        .unwrap_or(Value::Null)
}
