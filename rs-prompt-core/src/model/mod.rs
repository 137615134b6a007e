//! Top-level module for prompt composition.
//!
//! This module provides:
//! - Attribute categories and their vocabularies (`Category`, `VocabularySet`)
//! - Per-field directives (`FieldDirective`)
//! - Generation input (`PromptRequest`)
//! - Seeded directive resolution (`Selector`)
//! - The composer (`Generator`) and the segment splitter

/// High-level prompt generator.
///
/// Resolves every field of a request in a fixed order and assembles the
/// composed, marker-bearing text.
pub mod generator;

/// Categories, vocabularies and vocabulary loading.
pub mod vocabulary;

/// Parsing of raw field text into `disabled` / `random` / list / literal.
pub mod directive;

/// Generation input: seed, free text and raw field directives.
pub mod request;

/// Seeded resolution of directives against vocabularies.
pub mod selector;

/// Splitting of composed text into the prompt and its T5 / CLIP segments.
pub mod splitter;
