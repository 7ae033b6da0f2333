//! Storage layer
//!
//! Configuration file management. Credentials are read from the
//! environment only and never persisted.

use crate::error::StorageError;

pub mod config;
pub mod credentials;

type Result<T> = std::result::Result<T, StorageError>;
