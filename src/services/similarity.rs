// Similarity Engine
// Jaccard, cosine, and TF-IDF cosine over preprocessed token streams,
// plus their composite average. Each metric preprocesses its inputs
// itself so the three can be verified independently.

use std::collections::HashSet;

use tracing::debug;

use super::preprocessing::preprocess_tokens;
use super::vectorizer::{cosine, Vocabulary};
use crate::models::SimilarityResult;

/// Set-overlap ratio of the two token streams: |intersection| / |union|.
/// 0.0 when the union is empty.
pub fn jaccard_similarity(text1: &str, text2: &str) -> f64 {
    let set1: HashSet<String> = preprocess_tokens(text1).into_iter().collect();
    let set2: HashSet<String> = preprocess_tokens(text2).into_iter().collect();

    let intersection = set1.intersection(&set2).count();
    let union = set1.union(&set2).count();
    if union == 0 {
        return 0.0;
    }
    intersection as f64 / union as f64
}

/// Cosine over raw term-frequency vectors on the shared vocabulary.
pub fn cosine_similarity(text1: &str, text2: &str) -> f64 {
    let tokens1 = preprocess_tokens(text1);
    let tokens2 = preprocess_tokens(text2);

    let vocabulary = Vocabulary::build(&[&tokens1, &tokens2]);
    if vocabulary.is_empty() {
        return 0.0;
    }
    let v1 = vocabulary.term_frequencies(&tokens1);
    let v2 = vocabulary.term_frequencies(&tokens2);
    cosine(&v1, &v2)
}

/// Cosine over term-frequency vectors weighted by the two-document IDF.
/// Terms shared by both texts weigh zero, so two identical texts score
/// 0.0 on this metric.
pub fn tfidf_similarity(text1: &str, text2: &str) -> f64 {
    let tokens1 = preprocess_tokens(text1);
    let tokens2 = preprocess_tokens(text2);

    let vocabulary = Vocabulary::build(&[&tokens1, &tokens2]);
    if vocabulary.is_empty() {
        return 0.0;
    }
    let idf = vocabulary.idf_weights(&tokens1, &tokens2);
    let weighted = |tf: Vec<f64>| -> Vec<f64> {
        tf.into_iter().zip(idf.iter()).map(|(f, w)| f * w).collect()
    };
    let v1 = weighted(vocabulary.term_frequencies(&tokens1));
    let v2 = weighted(vocabulary.term_frequencies(&tokens2));
    cosine(&v1, &v2)
}

/// Comprehensive similarity analysis: all three metrics plus their mean.
pub fn analyze(text1: &str, text2: &str) -> SimilarityResult {
    let cosine = cosine_similarity(text1, text2);
    let jaccard = jaccard_similarity(text1, text2);
    let tfidf = tfidf_similarity(text1, text2);

    debug!(cosine, jaccard, tfidf, "similarity analyzed");

    SimilarityResult {
        cosine_similarity: cosine,
        jaccard_similarity: jaccard,
        tfidf_similarity: tfidf,
        average_similarity: (cosine + jaccard + tfidf) / 3.0,
    }
}
