//! Text-to-skills analysis core.
//!
//! Everything under this module is pure and synchronous: the vocabulary and
//! its compiled patterns are built once, then every call works on borrowed
//! input text.

pub mod analyzer;
pub mod extractor;
pub mod metadata;
pub mod normalizer;
pub mod scoring;
pub mod vocabulary;

pub use analyzer::{analyze, AnalysisResult};
pub use metadata::{EducationLevel, ExperienceLevel};
