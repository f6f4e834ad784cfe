// Structure & Style Scoring
// Sentence-length and lexical-diversity heuristics over raw text.
// Both are pure functions; degenerate inputs score a neutral 0.5.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;
use tracing::warn;

use crate::services::preprocessing::ResourceError;

struct StructureRegexes {
    sentence: Regex,
    word: Regex,
}

static REGEXES: OnceLock<Result<StructureRegexes, ResourceError>> = OnceLock::new();

fn compile(pattern: &str) -> Result<Regex, ResourceError> {
    Regex::new(pattern).map_err(|e| ResourceError::BadPattern {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })
}

fn load_regexes() -> Result<StructureRegexes, ResourceError> {
    Ok(StructureRegexes {
        sentence: compile(r"[.!?]+")?,
        word: compile(r"\b\w+\b")?,
    })
}

pub fn initialize() -> Result<(), ResourceError> {
    REGEXES
        .get_or_init(load_regexes)
        .as_ref()
        .map(|_| ())
        .map_err(|e| e.clone())
}

fn regexes() -> Option<&'static StructureRegexes> {
    REGEXES.get_or_init(load_regexes).as_ref().ok()
}

/// Average-sentence-length heuristic in [0, 1]. Longer sentences lean AI:
/// `<10 -> 0.3`, `<20 -> 0.5`, else `0.7`; no sentences or no words -> 0.5.
pub fn structure_score(text: &str) -> f64 {
    let Some(res) = regexes() else {
        warn!("structure regexes unavailable, returning neutral score");
        return 0.5;
    };

    let sentence_count = res
        .sentence
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .count();
    let lowered = text.to_lowercase();
    let word_count = res.word.find_iter(&lowered).count();

    if sentence_count == 0 || word_count == 0 {
        return 0.5;
    }

    let avg_sentence_length = word_count as f64 / sentence_count as f64;
    if avg_sentence_length < 10.0 {
        0.3
    } else if avg_sentence_length < 20.0 {
        0.5
    } else {
        0.7
    }
}

/// Lexical-diversity heuristic in [0, 1]. Higher unique-word ratio leans
/// AI: `<0.4 -> 0.3`, `<0.6 -> 0.5`, else `0.7`; no words -> 0.5.
pub fn style_score(text: &str) -> f64 {
    let Some(res) = regexes() else {
        warn!("structure regexes unavailable, returning neutral score");
        return 0.5;
    };

    let lowered = text.to_lowercase();
    let words: Vec<&str> = res.word.find_iter(&lowered).map(|m| m.as_str()).collect();
    if words.is_empty() {
        return 0.5;
    }

    let unique: HashSet<&str> = words.iter().copied().collect();
    let word_diversity = unique.len() as f64 / words.len() as f64;
    if word_diversity < 0.4 {
        0.3
    } else if word_diversity < 0.6 {
        0.5
    } else {
        0.7
    }
}
