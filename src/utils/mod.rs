//! Utils module - Shared utilities and helpers
//!
//! Used across layers; nothing in here depends on `cli` or `display`.

/// Conversions from transport errors into domain errors
pub mod error_helpers;

/// Logger initialisation
pub mod logging;

/// Width-aware padding and truncation
pub mod text;

/// Input validation and sanitization utilities
pub mod validation;
