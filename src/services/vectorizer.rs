// Vocabulary and Frequency Vectors
// Builds a shared vocabulary over one or two token streams and the
// aligned term-count vectors the similarity metrics operate on.

use std::collections::{HashMap, HashSet};

/// Vocabulary of one or two token streams plus a term -> index map so
/// vector fills are O(1) per token.
pub struct Vocabulary {
    terms: Vec<String>,
    index: HashMap<String, usize>,
}

impl Vocabulary {
    /// Union of distinct tokens across the streams, in first-seen order.
    /// The order is arbitrary but fixed for the lifetime of the value, so
    /// every vector built from it is aligned.
    pub fn build(streams: &[&[String]]) -> Self {
        let mut terms = Vec::new();
        let mut index = HashMap::new();
        for stream in streams {
            for token in *stream {
                if !index.contains_key(token) {
                    index.insert(token.clone(), terms.len());
                    terms.push(token.clone());
                }
            }
        }
        Self { terms, index }
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Term counts for one stream, one entry per vocabulary term.
    pub fn term_frequencies(&self, stream: &[String]) -> Vec<f64> {
        let mut vector = vec![0.0; self.terms.len()];
        for token in stream {
            if let Some(&i) = self.index.get(token) {
                vector[i] += 1.0;
            }
        }
        vector
    }

    /// Per-term IDF over exactly the two given streams: `ln(2/df)` with
    /// df in {1, 2}. Shared terms weigh zero; terms unique to one side
    /// all get the same positive weight. Not corpus IDF.
    pub fn idf_weights(&self, stream1: &[String], stream2: &[String]) -> Vec<f64> {
        let set1: HashSet<&String> = stream1.iter().collect();
        let set2: HashSet<&String> = stream2.iter().collect();
        self.terms
            .iter()
            .map(|term| {
                let mut df = 0.0_f64;
                if set1.contains(term) {
                    df += 1.0;
                }
                if set2.contains(term) {
                    df += 1.0;
                }
                if df == 0.0 {
                    0.0
                } else {
                    (2.0 / df).ln()
                }
            })
            .collect()
    }
}

/// Convenience wrapper: vocabulary plus one aligned count vector per stream.
pub fn vectorize(streams: &[&[String]]) -> (Vocabulary, Vec<Vec<f64>>) {
    let vocabulary = Vocabulary::build(streams);
    let vectors = streams
        .iter()
        .map(|s| vocabulary.term_frequencies(s))
        .collect();
    (vocabulary, vectors)
}

/// Standard vector cosine; 0.0 when either norm is zero.
pub fn cosine(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}
