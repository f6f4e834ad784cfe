// AI-Likelihood Aggregation
// Combines the pattern, structure, and style scores into the final
// verdict. Weights are fixed at 0.4 pattern, 0.3 structure, 0.3 style.

use tracing::debug;

use super::{patterns, structure};
use crate::models::{AnalysisResult, ScoreDetails};

const PATTERN_WEIGHT: f64 = 0.4;
const STRUCTURE_WEIGHT: f64 = 0.3;
const STYLE_WEIGHT: f64 = 0.3;

/// Analyze a text for AI-generation likelihood.
///
/// Blank input short-circuits to the fixed empty-text result without
/// touching any scorer. Otherwise the three component scores are
/// combined, scaled to a percentage, and paired with a
/// dispersion-derived confidence.
pub fn analyze_text(text: &str) -> AnalysisResult {
    if text.trim().is_empty() {
        return AnalysisResult::empty_text();
    }

    let pattern = patterns::pattern_score(text);
    let structure = structure::structure_score(text);
    let style = structure::style_score(text);

    let final_score = PATTERN_WEIGHT * pattern + STRUCTURE_WEIGHT * structure + STYLE_WEIGHT * style;
    let ai_probability = round1(final_score * 100.0).clamp(0.0, 100.0);
    let confidence = confidence_from_scores(&[pattern, structure, style]);
    let is_ai_generated = ai_probability > 50.0;

    debug!(
        pattern,
        structure, style, ai_probability, confidence, "text analyzed"
    );

    AnalysisResult {
        ai_probability,
        is_ai_generated,
        confidence,
        message: generate_message(ai_probability, confidence),
        details: ScoreDetails {
            pattern_score: round1(pattern * 100.0),
            structure_score: round1(structure * 100.0),
            style_score: round1(style * 100.0),
        },
        error: None,
    }
}

/// Confidence from the dispersion of the component scores: tight
/// agreement means high confidence. Uses the sample standard deviation;
/// a single measurement yields a fixed 50.0.
fn confidence_from_scores(scores: &[f64]) -> f64 {
    if scores.len() < 2 {
        return 50.0;
    }
    let mean = scores.iter().sum::<f64>() / scores.len() as f64;
    let variance =
        scores.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / (scores.len() - 1) as f64;
    let std_dev = variance.sqrt();
    (100.0 - std_dev * 50.0).clamp(0.0, 100.0)
}

fn generate_message(probability: f64, confidence: f64) -> String {
    if confidence < 50.0 {
        return "Low confidence in analysis".to_string();
    }
    if probability < 30.0 {
        "Likely human-written".to_string()
    } else if probability < 70.0 {
        "Uncertain - could be either human or AI".to_string()
    } else {
        "Likely AI-generated".to_string()
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services;

    fn init() {
        services::initialize().expect("resources should load");
    }

    #[test]
    fn test_empty_text_short_circuits() {
        init();
        for input in ["", "   ", "\n\t"] {
            let result = analyze_text(input);
            assert_eq!(result.ai_probability, 0.0);
            assert_eq!(result.confidence, 0.0);
            assert!(!result.is_ai_generated);
            assert_eq!(result.details.pattern_score, 0.0);
            assert_eq!(result.message, "Empty text provided");
        }
    }

    #[test]
    fn test_neutral_text_sits_on_the_boundary() {
        init();
        // No lexicon markers, avg sentence length 12 (in [10,20)),
        // diversity 11/24 (in [0.4,0.6)): all components are 0.5.
        let sentence = "The quick brown fox jumps over a lazy dog near the river.";
        let text = format!("{sentence} {sentence}");
        let result = analyze_text(&text);
        assert_eq!(result.details.pattern_score, 50.0);
        assert_eq!(result.details.structure_score, 50.0);
        assert_eq!(result.details.style_score, 50.0);
        assert_eq!(result.ai_probability, 50.0);
        // zero dispersion -> full confidence; 50.0 is strictly not AI
        assert_eq!(result.confidence, 100.0);
        assert!(!result.is_ai_generated);
        assert_eq!(result.message, "Uncertain - could be either human or AI");
    }

    #[test]
    fn test_probability_bounds_and_verdict_invariant() {
        init();
        let samples = [
            "However, the analysis demonstrates the methodology. Furthermore, research suggests results.",
            "I think it's kinda neat, honestly. You know, basically it just works, sort of.",
            "word. word. word.",
            "a",
        ];
        for text in samples {
            let result = analyze_text(text);
            assert!((0.0..=100.0).contains(&result.ai_probability), "{text}");
            assert_eq!(result.is_ai_generated, result.ai_probability > 50.0, "{text}");
            assert!((0.0..=100.0).contains(&result.confidence), "{text}");
        }
    }

    #[test]
    fn test_ai_leaning_text_scores_above_neutral() {
        init();
        let text = "However, the analysis demonstrates a robust methodology, and the results \
                    ultimately support the conclusion that the data is consistent. Furthermore, \
                    research suggests the study design strengthens every finding considerably.";
        let result = analyze_text(text);
        assert!(result.ai_probability > 50.0, "got {}", result.ai_probability);
        assert!(result.is_ai_generated);
    }

    #[test]
    fn test_confidence_formula() {
        // identical scores -> zero deviation -> 100
        assert_eq!(confidence_from_scores(&[0.5, 0.5, 0.5]), 100.0);
        // single measurement -> fixed 50
        assert_eq!(confidence_from_scores(&[0.7]), 50.0);
        // maximal spread of bounded scores stays above the clamp floor
        let c = confidence_from_scores(&[0.0, 1.0, 0.0]);
        assert!(c > 0.0 && c < 100.0);
    }

    #[test]
    fn test_message_thresholds() {
        assert_eq!(generate_message(10.0, 80.0), "Likely human-written");
        assert_eq!(generate_message(50.0, 80.0), "Uncertain - could be either human or AI");
        assert_eq!(generate_message(85.0, 80.0), "Likely AI-generated");
        // low confidence overrides the probability bands
        assert_eq!(generate_message(85.0, 40.0), "Low confidence in analysis");
    }
}
