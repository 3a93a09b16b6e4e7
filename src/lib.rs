//! udpatterns: syntactic pattern classification over dependency trees
//!
//! Classifies Universal Dependencies sentences against a fixed catalogue
//! of syntactic patterns and extracts the governor/dependent pairs that
//! instantiate them. Core implementation in Rust with Python bindings.

pub mod classifier; // First-match sentence classification
pub mod config; // Analysis settings (JSON)
pub mod corpus; // Sequential and parallel runs over many sentences
pub mod export; // CSV tables for downstream tools
pub mod extractor; // Exhaustive governor/dependent pair extraction
pub mod index; // Per-sentence inverted indices
pub mod pattern; // The pattern catalogue
pub mod tree; // Token and sentence data structures

// Python bindings
#[cfg(feature = "pyo3")]
pub mod python;

// Re-exports for convenience
pub use classifier::{
    ClassificationRecord, Rule, classify, classify_in, classify_sentences, retain_classified,
};
pub use config::{AnalysisConfig, ConfigError};
pub use corpus::{Analysis, Corpus, Summary};
pub use export::ExportError;
pub use extractor::{PairRecord, extract_from, extract_pairs, extract_pairs_in};
pub use index::SentenceIndex;
pub use pattern::{CATALOGUE, Governor, Labels, Pair, Pattern, Representative};
pub use tree::{Sentence, Token, TokenId, TreeError};
