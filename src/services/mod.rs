// Veritext Core Services

pub mod detection;
pub mod file_extractor;
pub mod preprocessing;
pub mod report_store;
pub mod similarity;
pub mod vectorizer;

pub use detection::analyze_text;
pub use file_extractor::{allowed_file, extract_text, ExtractError, UploadStore};
pub use preprocessing::{clean_text, lemmatize, preprocess, remove_stopwords, tokenize, ResourceError};
pub use report_store::ReportStore;

/// Load all process-wide linguistic resources: the stopword set, the
/// lemma lexicon, and the compiled detection patterns. Call once at
/// startup; a failure here is fatal — the engine cannot score text
/// without them.
pub fn initialize() -> Result<(), ResourceError> {
    preprocessing::initialize()?;
    detection::initialize()
}
