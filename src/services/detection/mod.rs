// Detection Module
// AI-likelihood heuristics organized into specialized submodules:
// - patterns: lexicon-based stylistic register scoring
// - structure: sentence-length and lexical-diversity scoring
// - detector: weighted aggregation into the final verdict

pub mod detector;
pub mod patterns;
pub mod structure;

pub use detector::analyze_text;
pub use patterns::pattern_score;
pub use structure::{structure_score, style_score};

use crate::services::preprocessing::ResourceError;

/// Compile the detection regexes. Fatal at startup if any fails.
pub fn initialize() -> Result<(), ResourceError> {
    patterns::initialize()?;
    structure::initialize()
}
