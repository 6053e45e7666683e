use std::sync::Arc;

use crate::model::scorer::SimilarityScorer;
use crate::model::vectorizer::TfidfVectorizer;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Both artifacts are loaded once at startup and never mutated afterwards,
/// so concurrent in-flight requests read them without synchronization.
#[derive(Clone)]
pub struct AppState {
    pub vectorizer: Arc<TfidfVectorizer>,
    pub scorer: Arc<SimilarityScorer>,
}
