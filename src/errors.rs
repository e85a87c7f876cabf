//! Error Types
//!
//! This module defines the error types used throughout the crate.
//!
//! # Overview
//!
//! The main error type [`ShapeshiftError`] covers all failure modes including:
//! - Scene graph lookups (stale handles, missing components)
//! - Degenerate curve input
//! - Configuration and colour parsing
//! - Manifest I/O and serialization
//!
//! # Usage
//!
//! All public APIs return [`Result<T>`] which is an alias for `std::result::Result<T, ShapeshiftError>`.
//!
//! ```rust,ignore
//! use shapeshifter::errors::{ShapeshiftError, Result};
//!
//! fn build() -> Result<()> {
//!     // Operations that may fail return Result
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// The main error type for the crate.
///
/// Each variant provides specific context about what went wrong.
#[derive(Error, Debug)]
pub enum ShapeshiftError {
    // ========================================================================
    // Scene Graph Errors
    // ========================================================================
    /// A node handle did not resolve to a live node.
    #[error("Node not found: {0}")]
    NodeNotFound(String),

    /// A node exists but lacks the component an operation needs.
    #[error("Node '{node}' has no {component} component")]
    MissingComponent {
        /// Name of the node that was queried
        node: String,
        /// Kind of component that was expected
        component: &'static str,
    },

    // ========================================================================
    // Geometry Errors
    // ========================================================================
    /// The curve cannot be used as a motion path.
    #[error("Degenerate curve: {0}")]
    DegenerateCurve(String),

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// A hex colour string could not be parsed.
    #[error("Invalid hex colour '{0}'")]
    InvalidColor(String),

    /// Configuration values are out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ========================================================================
    // I/O Errors
    // ========================================================================
    /// File I/O error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parse or write error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Alias for `Result<T, ShapeshiftError>`.
pub type Result<T> = std::result::Result<T, ShapeshiftError>;
