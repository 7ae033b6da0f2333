//! Core layer: report definitions, payload normalization and the session
//! that drives one login/fetch run at a time.

pub mod auth;
pub mod normalizer;
pub mod report;
pub mod services;
pub mod session;
