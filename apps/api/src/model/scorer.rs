use std::path::Path;

use anyhow::{ensure, Context, Result};
use candle_core::{DType, Device, Tensor};
use candle_nn::{Linear, Module, VarBuilder};
use serde::Deserialize;

/// Architecture description shipped alongside the weights. The CV and JD
/// vectors are concatenated, so the first layer sees `2 * input_dim` values.
#[derive(Debug, Clone, Deserialize)]
pub struct ScorerConfig {
    pub input_dim: usize,
    pub hidden_dims: Vec<usize>,
}

/// Pretrained feed-forward similarity model: concatenated vector pair through
/// ReLU hidden layers (`fc0`, `fc1`, ...) into a single sigmoid output.
pub struct SimilarityScorer {
    config: ScorerConfig,
    hidden: Vec<Linear>,
    output: Linear,
    device: Device,
}

impl SimilarityScorer {
    /// Loads the model from a safetensors weights file and its JSON config.
    /// Any failure here is startup-fatal; requests never observe a
    /// half-loaded model.
    pub fn load(weights_path: &Path, config_path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(config_path)
            .with_context(|| format!("failed to read model config {}", config_path.display()))?;
        let config: ScorerConfig = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse model config {}", config_path.display()))?;

        let device = Device::Cpu;
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, &device)
                .with_context(|| {
                    format!("failed to load model weights {}", weights_path.display())
                })?
        };
        Self::from_builder(config, vb)
    }

    /// Assembles the layer stack from a `VarBuilder`. Split out from `load`
    /// so tests can supply freshly initialized weights via a `VarMap`.
    pub fn from_builder(config: ScorerConfig, vb: VarBuilder) -> Result<Self> {
        ensure!(config.input_dim > 0, "model input_dim must be non-zero");

        let device = vb.device().clone();
        let mut hidden = Vec::with_capacity(config.hidden_dims.len());
        let mut in_dim = config.input_dim * 2;
        for (i, &out_dim) in config.hidden_dims.iter().enumerate() {
            hidden.push(candle_nn::linear(in_dim, out_dim, vb.pp(format!("fc{i}")))?);
            in_dim = out_dim;
        }
        let output = candle_nn::linear(in_dim, 1, vb.pp("out"))?;

        Ok(Self {
            config,
            hidden,
            output,
            device,
        })
    }

    /// The per-input vector dimension the model expects. Must match the
    /// vectorizer's output dimension; checked once at startup.
    pub fn input_dim(&self) -> usize {
        self.config.input_dim
    }

    /// Scores a vector pair. Returns a scalar in [0, 1].
    pub fn predict(&self, cv_vector: &[f32], jd_vector: &[f32]) -> Result<f32> {
        ensure!(
            cv_vector.len() == self.config.input_dim && jd_vector.len() == self.config.input_dim,
            "expected two {}-dim vectors, got {} and {}",
            self.config.input_dim,
            cv_vector.len(),
            jd_vector.len()
        );

        let width = cv_vector.len() + jd_vector.len();
        let input = Tensor::from_iter(
            cv_vector.iter().chain(jd_vector.iter()).copied(),
            &self.device,
        )?
        .reshape((1, width))?;

        let mut x = input;
        for layer in &self.hidden {
            x = layer.forward(&x)?.relu()?;
        }
        let logit = self.output.forward(&x)?;
        let score = candle_nn::ops::sigmoid(&logit)?
            .squeeze(0)?
            .squeeze(0)?
            .to_scalar::<f32>()?;

        Ok(score.clamp(0.0, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use candle_nn::VarMap;

    fn fresh_scorer(input_dim: usize, hidden_dims: Vec<usize>) -> SimilarityScorer {
        let varmap = VarMap::new();
        let vb = VarBuilder::from_varmap(&varmap, DType::F32, &Device::Cpu);
        SimilarityScorer::from_builder(
            ScorerConfig {
                input_dim,
                hidden_dims,
            },
            vb,
        )
        .unwrap()
    }

    #[test]
    fn prediction_is_within_unit_interval() {
        let scorer = fresh_scorer(4, vec![8, 4]);
        let a = vec![0.5, 0.1, 0.0, 0.9];
        let b = vec![0.2, 0.2, 0.7, 0.0];
        let score = scorer.predict(&a, &b).unwrap();
        assert!((0.0..=1.0).contains(&score), "score out of range: {score}");
    }

    #[test]
    fn prediction_is_deterministic_for_fixed_weights() {
        let scorer = fresh_scorer(3, vec![6]);
        let a = vec![1.0, 0.0, 0.5];
        let b = vec![0.0, 1.0, 0.5];
        assert_eq!(
            scorer.predict(&a, &b).unwrap(),
            scorer.predict(&a, &b).unwrap()
        );
    }

    #[test]
    fn zero_vectors_still_score() {
        let scorer = fresh_scorer(4, vec![8]);
        let zeros = vec![0.0; 4];
        let score = scorer.predict(&zeros, &zeros).unwrap();
        assert!((0.0..=1.0).contains(&score));
    }

    #[test]
    fn mismatched_vector_length_is_rejected() {
        let scorer = fresh_scorer(4, vec![8]);
        assert!(scorer.predict(&[0.0; 3], &[0.0; 4]).is_err());
    }

    #[test]
    fn no_hidden_layers_is_a_valid_architecture() {
        let scorer = fresh_scorer(2, vec![]);
        let score = scorer.predict(&[1.0, 0.0], &[0.0, 1.0]).unwrap();
        assert!((0.0..=1.0).contains(&score));
    }

    #[test]
    fn load_fails_on_missing_weights() {
        let mut config = tempfile::NamedTempFile::new().unwrap();
        use std::io::Write;
        write!(config, r#"{{"input_dim": 4, "hidden_dims": [8]}}"#).unwrap();
        assert!(SimilarityScorer::load(
            Path::new("/nonexistent/model.safetensors"),
            config.path()
        )
        .is_err());
    }
}
