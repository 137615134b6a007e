//! Seed-driven prompt composition library.
//!
//! This crate assembles image-generation prompts from categorical attributes:
//! - Per-field directives (`disabled`, `random`, comma lists, literals)
//! - A seeded selector resolving directives against vocabularies
//! - A composer stitching the resolved values in a fixed order
//! - A splitter deriving the T5 / CLIP-L / CLIP-G segments
//!
//! Given the same vocabularies, seed and request, generation is fully
//! reproducible.

/// Prompt composition: vocabularies, directives, selection and generation.
pub mod model;

/// Error type shared by the whole crate.
pub mod error;

/// I/O utilities (vocabulary files, path helpers).
///
/// Not exposed
pub(crate) mod io;

pub use error::PromptError;
pub use model::generator::Generator;
pub use model::request::PromptRequest;
pub use model::splitter::PromptOutput;
pub use model::vocabulary::{Category, Vocabulary, VocabularySet};
