use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

use anyhow::{bail, Context, Result};
use regex::Regex;
use serde::Deserialize;

/// Token pattern the vectorizer was trained with: runs of two or more word
/// characters.
static RE_TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\w\w+\b").unwrap());

#[derive(Debug, Deserialize)]
struct VectorizerArtifact {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f32>,
}

/// Pretrained TF-IDF vectorizer. The vocabulary and per-term IDF weights are
/// exported by the training pipeline; this side only applies them.
#[derive(Debug)]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f32>,
}

impl TfidfVectorizer {
    /// Loads the vectorizer from its JSON artifact. Any load or validation
    /// failure here is startup-fatal.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read vectorizer artifact {}", path.display()))?;
        let artifact: VectorizerArtifact = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse vectorizer artifact {}", path.display()))?;
        Self::from_parts(artifact.vocabulary, artifact.idf)
    }

    /// Builds a vectorizer from its constituent tables, validating that every
    /// vocabulary index addresses an IDF weight.
    pub fn from_parts(vocabulary: HashMap<String, usize>, idf: Vec<f32>) -> Result<Self> {
        for (term, &index) in &vocabulary {
            if index >= idf.len() {
                bail!(
                    "vocabulary term {term:?} has index {index} outside the {}-dim IDF table",
                    idf.len()
                );
            }
        }
        Ok(Self { vocabulary, idf })
    }

    /// The fixed output dimension, determined by the pretrained vocabulary.
    pub fn dimension(&self) -> usize {
        self.idf.len()
    }

    /// Maps a normalized text to a fixed-length TF-IDF vector: term counts
    /// over the vocabulary, weighted by IDF, L2-normalized. Out-of-vocabulary
    /// tokens are silently ignored. A text with no in-vocabulary tokens maps
    /// to the zero vector.
    pub fn transform(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.idf.len()];

        let lowered = text.to_lowercase();
        for token in RE_TOKEN.find_iter(&lowered) {
            if let Some(&index) = self.vocabulary.get(token.as_str()) {
                vector[index] += 1.0;
            }
        }

        for (value, idf) in vector.iter_mut().zip(&self.idf) {
            *value *= idf;
        }

        let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            for value in &mut vector {
                *value /= norm;
            }
        }

        vector
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sample() -> TfidfVectorizer {
        let vocabulary = HashMap::from([
            ("python".to_string(), 0),
            ("backend".to_string(), 1),
            ("engineer".to_string(), 2),
        ]);
        TfidfVectorizer::from_parts(vocabulary, vec![1.0, 2.0, 1.5]).unwrap()
    }

    #[test]
    fn transform_counts_and_weights_terms() {
        let v = sample();
        // "python" twice at idf 1.0, "backend" once at idf 2.0.
        let out = v.transform("python python backend");
        let norm = (2.0f32 * 2.0 + 2.0 * 2.0).sqrt();
        assert!((out[0] - 2.0 / norm).abs() < 1e-6);
        assert!((out[1] - 2.0 / norm).abs() < 1e-6);
        assert_eq!(out[2], 0.0);
    }

    #[test]
    fn transform_lowercases_input() {
        let v = sample();
        let out = v.transform("Python ENGINEER");
        assert!(out[0] > 0.0);
        assert!(out[2] > 0.0);
    }

    #[test]
    fn out_of_vocabulary_tokens_are_ignored() {
        let v = sample();
        assert_eq!(v.transform("haskell kubernetes"), vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn output_is_l2_normalized() {
        let v = sample();
        let out = v.transform("python backend engineer");
        let norm = out.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[test]
    fn empty_text_maps_to_zero_vector() {
        let v = sample();
        assert_eq!(v.transform(""), vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn short_tokens_do_not_match() {
        // The token pattern requires at least two word characters.
        let v = sample();
        assert_eq!(v.transform("a b c"), vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn load_reads_json_artifact() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"vocabulary": {{"python": 0, "rust": 1}}, "idf": [1.2, 3.4]}}"#
        )
        .unwrap();
        let v = TfidfVectorizer::load(file.path()).unwrap();
        assert_eq!(v.dimension(), 2);
        assert!(v.transform("rust")[1] > 0.0);
    }

    #[test]
    fn load_rejects_out_of_bounds_vocabulary_index() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"vocabulary": {{"python": 5}}, "idf": [1.0]}}"#).unwrap();
        assert!(TfidfVectorizer::load(file.path()).is_err());
    }

    #[test]
    fn load_fails_on_missing_file() {
        assert!(TfidfVectorizer::load(Path::new("/nonexistent/vectorizer.json")).is_err());
    }
}
