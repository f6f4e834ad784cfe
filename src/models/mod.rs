// Veritext Data Models
// Wire and storage types shared by the analysis core, the report store,
// and the HTTP layer. Field names are the API contract; keep them stable.

use serde::{Deserialize, Serialize};

// ============ AI Detection ============

/// Component scores reported alongside an AI-detection verdict,
/// each scaled to [0, 100] and rounded to one decimal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ScoreDetails {
    pub pattern_score: f64,
    pub structure_score: f64,
    pub style_score: f64,
}

/// Result of a single AI-likelihood analysis.
///
/// Invariant: `is_ai_generated == (ai_probability > 50.0)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub ai_probability: f64,
    pub is_ai_generated: bool,
    pub confidence: f64,
    pub message: String,
    pub details: ScoreDetails,
    /// Set only on the neutral fallback record produced when analysis
    /// itself faulted; the endpoint still answers 200 with this payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AnalysisResult {
    /// Fixed result for blank input. Bypasses all scorers.
    pub fn empty_text() -> Self {
        Self {
            ai_probability: 0.0,
            is_ai_generated: false,
            confidence: 0.0,
            message: "Empty text provided".to_string(),
            details: ScoreDetails::default(),
            error: None,
        }
    }

    /// Neutral fallback when analysis could not run to completion.
    pub fn indeterminate(error: String) -> Self {
        Self {
            ai_probability: 50.0,
            is_ai_generated: false,
            confidence: 0.0,
            message: "Unable to determine".to_string(),
            details: ScoreDetails {
                pattern_score: 50.0,
                structure_score: 50.0,
                style_score: 50.0,
            },
            error: Some(error),
        }
    }
}

// ============ Similarity ============

/// Result of a two-text similarity comparison. All scores are in [0, 1].
///
/// Invariant: `average_similarity` is the arithmetic mean of the other three.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityResult {
    pub cosine_similarity: f64,
    pub jaccard_similarity: f64,
    pub tfidf_similarity: f64,
    pub average_similarity: f64,
}

// ============ Reports ============

/// A stored analysis report. `text` is set for AI-detection reports,
/// `text1`/`text2` for similarity reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub id: u64,
    #[serde(rename = "type")]
    pub report_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text2: Option<String>,
    pub result: serde_json::Value,
    pub date: String,
}

/// A report as submitted to the store, before id/date assignment.
#[derive(Debug, Clone)]
pub struct NewReport {
    pub report_type: String,
    pub text: Option<String>,
    pub text1: Option<String>,
    pub text2: Option<String>,
    pub result: serde_json::Value,
}

impl NewReport {
    pub fn ai_detection(text: String, result: &AnalysisResult) -> Self {
        Self {
            report_type: "ai_detection".to_string(),
            text: Some(text),
            text1: None,
            text2: None,
            result: serde_json::to_value(result).unwrap_or_default(),
        }
    }

    pub fn similarity(text1: String, text2: String, result: &SimilarityResult) -> Self {
        Self {
            report_type: "similarity_analysis".to_string(),
            text: None,
            text1: Some(text1),
            text2: Some(text2),
            result: serde_json::to_value(result).unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indeterminate_is_neutral() {
        let r = AnalysisResult::indeterminate("boom".to_string());
        assert_eq!(r.ai_probability, 50.0);
        assert!(!r.is_ai_generated);
        assert_eq!(r.confidence, 0.0);
        assert_eq!(r.details.pattern_score, 50.0);
        assert_eq!(r.message, "Unable to determine");
    }

    #[test]
    fn test_error_field_omitted_when_absent() {
        let r = AnalysisResult::empty_text();
        let json = serde_json::to_string(&r).unwrap();
        assert!(!json.contains("\"error\""));
        assert!(json.contains("\"ai_probability\":0.0"));
    }

    #[test]
    fn test_report_type_serializes_as_type() {
        let report = Report {
            id: 1,
            report_type: "ai_detection".to_string(),
            text: Some("hello".to_string()),
            text1: None,
            text2: None,
            result: serde_json::json!({}),
            date: "2026-01-01T00:00:00Z".to_string(),
        };
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"type\":\"ai_detection\""));
        assert!(!json.contains("text1"));
    }
}
