// Text Preprocessing Pipeline
// Normalization, tokenization, stopword removal, and lemmatization.
// Every stage degrades instead of failing: downstream scorers assume
// `preprocess` never returns an empty string for non-empty input.

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use regex::Regex;
use stop_words::{get, LANGUAGE};
use thiserror::Error;
use tracing::warn;

/// Failure to load process-wide linguistic data. Fatal at startup;
/// the engine cannot score text without these.
#[derive(Debug, Clone, Error)]
pub enum ResourceError {
    #[error("stopword list is empty")]
    EmptyStopwords,
    #[error("failed to compile pattern '{pattern}': {message}")]
    BadPattern { pattern: String, message: String },
}

// Stopwords come from the crate's NLTK corpus (~180 entries). The larger
// merged ISO list also drops content-adjacent words, which shifts every
// similarity score.

/// Read-only linguistic data shared by all analysis calls.
pub struct LinguisticResources {
    stop_words: HashSet<String>,
    lemma_exceptions: HashMap<&'static str, &'static str>,
    word_re: Regex,
}

static RESOURCES: OnceLock<Result<LinguisticResources, ResourceError>> = OnceLock::new();

/// Irregular forms the suffix rules would mangle. Consulted before any rule.
const LEMMA_EXCEPTIONS: &[(&str, &str)] = &[
    ("men", "man"),
    ("women", "woman"),
    ("children", "child"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("geese", "goose"),
    ("mice", "mouse"),
    ("lice", "louse"),
    ("oxen", "ox"),
    ("people", "person"),
    ("wolves", "wolf"),
    ("knives", "knife"),
    ("leaves", "leaf"),
    ("lives", "life"),
    ("wives", "wife"),
    ("shelves", "shelf"),
    ("halves", "half"),
    ("loaves", "loaf"),
    ("thieves", "thief"),
    ("calves", "calf"),
    ("elves", "elf"),
    ("scarves", "scarf"),
    ("analyses", "analysis"),
    ("crises", "crisis"),
    ("theses", "thesis"),
    ("indices", "index"),
    ("matrices", "matrix"),
    ("phenomena", "phenomenon"),
    ("criteria", "criterion"),
    ("news", "news"),
    ("series", "series"),
    ("species", "species"),
];

fn load_resources() -> Result<LinguisticResources, ResourceError> {
    let stop_words: HashSet<String> = get(LANGUAGE::English)
        .into_iter()
        .map(|w| w.to_lowercase())
        .collect();
    if stop_words.is_empty() {
        return Err(ResourceError::EmptyStopwords);
    }

    let word_pattern = r"[a-z0-9]+";
    let word_re = Regex::new(word_pattern).map_err(|e| ResourceError::BadPattern {
        pattern: word_pattern.to_string(),
        message: e.to_string(),
    })?;

    Ok(LinguisticResources {
        stop_words,
        lemma_exceptions: LEMMA_EXCEPTIONS.iter().copied().collect(),
        word_re,
    })
}

/// Load stopwords and the lemma lexicon. Call once at startup; returns
/// the load error so the process can refuse to start without them.
pub fn initialize() -> Result<(), ResourceError> {
    RESOURCES
        .get_or_init(load_resources)
        .as_ref()
        .map(|_| ())
        .map_err(|e| e.clone())
}

fn resources() -> Option<&'static LinguisticResources> {
    RESOURCES.get_or_init(load_resources).as_ref().ok()
}

/// Normalize raw text: lowercase, keep only ASCII letters, whitespace and
/// `. , ! ?`, collapse whitespace runs, trim.
pub fn clean_text(text: &str) -> String {
    let lowered = text.to_lowercase();
    let filtered: String = lowered
        .chars()
        .filter(|c| c.is_ascii_alphabetic() || c.is_whitespace() || matches!(c, '.' | ',' | '!' | '?'))
        .collect();
    filtered.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split text into lowercase word tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    match resources() {
        Some(res) => res
            .word_re
            .find_iter(&lowered)
            .map(|m| m.as_str().to_string())
            .collect(),
        None => {
            warn!("linguistic resources unavailable, tokenizing by whitespace");
            lowered.split_whitespace().map(|s| s.to_string()).collect()
        }
    }
}

/// Drop tokens whose lowercase form is in the English stopword set.
pub fn remove_stopwords(tokens: Vec<String>) -> Vec<String> {
    match resources() {
        Some(res) => tokens
            .into_iter()
            .filter(|t| !res.stop_words.contains(&t.to_lowercase()))
            .collect(),
        None => {
            warn!("stopword set unavailable, keeping all tokens");
            tokens
        }
    }
}

/// Reduce each token to its base form: irregular lexicon first, then
/// ordered suffix rules. Unknown tokens pass through unchanged.
pub fn lemmatize(tokens: Vec<String>) -> Vec<String> {
    match resources() {
        Some(res) => tokens
            .into_iter()
            .map(|t| lemmatize_token(res, &t))
            .collect(),
        None => {
            warn!("lemma lexicon unavailable, passing tokens through");
            tokens
        }
    }
}

fn lemmatize_token(res: &LinguisticResources, token: &str) -> String {
    if let Some(base) = res.lemma_exceptions.get(token) {
        return (*base).to_string();
    }

    let n = token.len();
    if token.ends_with("ies") && n > 4 {
        return format!("{}y", &token[..n - 3]);
    }
    if (token.ends_with("ches") || token.ends_with("shes")) && n > 5 {
        return token[..n - 2].to_string();
    }
    if (token.ends_with("ses") || token.ends_with("xes") || token.ends_with("zes")) && n > 4 {
        return token[..n - 2].to_string();
    }
    // "glass", "focus", "basis" — the trailing s is not a plural marker
    if token.ends_with("ss") || token.ends_with("us") || token.ends_with("is") {
        return token.to_string();
    }
    if token.ends_with('s') && n > 3 {
        return token[..n - 1].to_string();
    }
    token.to_string()
}

/// Full pipeline: clean, tokenize, drop stopwords, lemmatize, re-join.
///
/// Fallback chain: empty cleaning output falls back to the original text,
/// empty tokenization to whitespace splitting, and an all-stopword result
/// to the original input — so non-empty input always yields non-empty
/// output.
pub fn preprocess(text: &str) -> String {
    if text.trim().is_empty() {
        return text.to_string();
    }

    let cleaned = clean_text(text);
    let cleaned = if cleaned.trim().is_empty() {
        warn!("text became empty after cleaning, using original text");
        text.to_string()
    } else {
        cleaned
    };

    let tokens = tokenize(&cleaned);
    let tokens = if tokens.is_empty() {
        warn!("no tokens generated, using simple split");
        cleaned
            .to_lowercase()
            .split_whitespace()
            .map(|s| s.to_string())
            .collect()
    } else {
        tokens
    };

    let tokens = lemmatize(remove_stopwords(tokens));

    let processed = tokens.join(" ");
    if processed.trim().is_empty() {
        warn!("processing resulted in empty text, using original");
        return text.to_string();
    }
    processed
}

/// `preprocess`, but returning the token stream instead of joined text.
pub fn preprocess_tokens(text: &str) -> Vec<String> {
    preprocess(text)
        .split_whitespace()
        .map(|s| s.to_string())
        .collect()
}
