//! Deepmerge - CLI tool for deep-merging layered configuration documents.
//!
//! This library provides the core functionality for deepmerge, including:
//! - The deep-merge engine (object recursion, array union, reserved keys)
//! - JSON and TOML document parsing and layer cascade
//! - Command-line `KEY=VALUE` overrides
//! - Rendering merged documents as JSON or TOML
//!
//! # Example
//!
//! ```
//! use deepmerge_cli::merge::merge;
//! use serde_json::json;
//!
//! let defaults = json!({"video": {"width": 640, "codecs": ["vp8"]}, "muted": false});
//! let user = json!({"video": {"width": 1280, "codecs": ["h264", "vp8"]}});
//!
//! let merged = merge(&[defaults, user]).unwrap();
//! assert_eq!(
//!     merged,
//!     json!({"video": {"width": 1280, "codecs": ["vp8", "h264"]}, "muted": false})
//! );
//! ```

pub mod config;
pub mod error;
pub mod merge;
pub mod render;

pub use error::{MergeError, Result};
