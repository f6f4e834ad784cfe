// Pattern Scoring
// Regex lexicons for stylistic register: discourse connectives and
// academic meta-vocabulary lean AI, first-person hedges and verbal
// contractions lean human. Matching is whole-word, case-insensitive,
// against the raw (unpreprocessed) text.

use std::sync::OnceLock;

use regex::Regex;
use tracing::warn;

use crate::services::preprocessing::ResourceError;

const AI_PATTERNS: &[&str] = &[
    r"\b(however|moreover|furthermore|therefore|thus|consequently)\b",
    r"\b(in conclusion|to summarize|in summary|ultimately)\b",
    r"\b(it is worth noting|it should be noted|research suggests)\b",
    r"\b(analysis|research|study|data|results|methodology)\b",
    r"\b(firstly|secondly|finally|in addition|furthermore)\b",
];

const HUMAN_PATTERNS: &[&str] = &[
    r"\b(i think|i feel|in my opinion|i believe)\b",
    r"\b(kind of|sort of|basically|literally|actually)\b",
    r"\b(like|you know|well|anyway|honestly)\b",
    r"\b(maybe|probably|possibly|perhaps|seems)\b",
    r"\b(gonna|wanna|gotta|kinda|sorta)\b",
];

pub struct PatternLexicon {
    ai: Vec<Regex>,
    human: Vec<Regex>,
}

static LEXICON: OnceLock<Result<PatternLexicon, ResourceError>> = OnceLock::new();

fn compile_list(patterns: &[&str]) -> Result<Vec<Regex>, ResourceError> {
    patterns
        .iter()
        .map(|p| {
            Regex::new(p).map_err(|e| ResourceError::BadPattern {
                pattern: p.to_string(),
                message: e.to_string(),
            })
        })
        .collect()
}

fn load_lexicon() -> Result<PatternLexicon, ResourceError> {
    Ok(PatternLexicon {
        ai: compile_list(AI_PATTERNS)?,
        human: compile_list(HUMAN_PATTERNS)?,
    })
}

/// Compile both lexicons. Fatal at startup if any pattern is invalid.
pub fn initialize() -> Result<(), ResourceError> {
    LEXICON
        .get_or_init(load_lexicon)
        .as_ref()
        .map(|_| ())
        .map_err(|e| e.clone())
}

fn lexicon() -> Option<&'static PatternLexicon> {
    LEXICON.get_or_init(load_lexicon).as_ref().ok()
}

/// Score stylistic register in [0, 1]: 1.0 all-AI markers, 0.0 all-human,
/// exactly 0.5 when neither list matches (undecided, not zero). Degrades
/// to 0.5 if the lexicon is unavailable.
pub fn pattern_score(text: &str) -> f64 {
    let Some(lex) = lexicon() else {
        warn!("pattern lexicon unavailable, returning neutral score");
        return 0.5;
    };

    let lowered = text.to_lowercase();
    let ai_matches: usize = lex.ai.iter().map(|re| re.find_iter(&lowered).count()).sum();
    let human_matches: usize = lex
        .human
        .iter()
        .map(|re| re.find_iter(&lowered).count())
        .sum();

    let total = ai_matches + human_matches;
    if total == 0 {
        return 0.5;
    }
    (ai_matches as f64 / total as f64).clamp(0.0, 1.0)
}
