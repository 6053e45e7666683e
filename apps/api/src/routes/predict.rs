//! POST /predict — scores an uploaded resume against an uploaded job
//! description and returns a 0–100 similarity percentage.

use axum::extract::{Multipart, State};
use axum::Json;
use bytes::Bytes;
use serde::Serialize;

use crate::errors::AppError;
use crate::pipeline::extract::extract;
use crate::pipeline::normalize::normalize;
use crate::pipeline::sniff::sniff;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub similarity_score: f64,
}

struct UploadedFile {
    filename: String,
    data: Bytes,
}

pub async fn handle_predict(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<PredictResponse>, AppError> {
    let mut cv: Option<UploadedFile> = None;
    let mut job_description: Option<UploadedFile> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Pipeline(e.to_string()))?
    {
        let name = field.name().map(str::to_owned);
        let filename = field
            .file_name()
            .map(str::to_owned)
            .unwrap_or_else(|| "<unnamed>".to_string());
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Pipeline(e.to_string()))?;

        match name.as_deref() {
            Some("cv") => cv = Some(UploadedFile { filename, data }),
            Some("job_description") => job_description = Some(UploadedFile { filename, data }),
            // Unknown fields are drained and ignored.
            _ => {}
        }
    }

    let cv = cv.ok_or(AppError::MissingInput)?;
    let job_description = job_description.ok_or(AppError::MissingInput)?;

    let cv_text = read_and_preprocess(&cv)?;
    let jd_text = read_and_preprocess(&job_description)?;

    // The two transforms share no state and are independent.
    let cv_vector = state.vectorizer.transform(&cv_text);
    let jd_vector = state.vectorizer.transform(&jd_text);

    let score = state
        .scorer
        .predict(&cv_vector, &jd_vector)
        .map_err(|e| AppError::Pipeline(e.to_string()))?;

    Ok(Json(PredictResponse {
        similarity_score: round2(f64::from(score) * 100.0),
    }))
}

/// Sniff → extract → normalize. Every upload yields exactly one normalized
/// string or fails the whole request; there are no partial results.
fn read_and_preprocess(file: &UploadedFile) -> Result<String, AppError> {
    let detected = sniff(&file.data);
    let raw = extract(detected, &file.data).map_err(|e| e.into_app_error(&file.filename))?;
    Ok(normalize(&raw))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
