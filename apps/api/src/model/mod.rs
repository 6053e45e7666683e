//! Pretrained artifacts consumed by the predict flow: the TF-IDF vectorizer
//! and the neural similarity scorer. Both load once at startup and are held
//! read-only for the process lifetime.

pub mod scorer;
pub mod vectorizer;
