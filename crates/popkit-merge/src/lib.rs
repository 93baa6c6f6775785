//! popkit Merge - Structural reconciler
//!
//! Merges a *priority* option tree over a *base* tree. Priority wins on
//! scalar conflicts, mappings merge key by key, and arrays of records merge
//! element by element, pairing records through an identity field instead of
//! by index.
//!
//! # Example
//! ```rust
//! use popkit_merge::{merge_config, MergeOptions};
//! use serde_json::json;
//!
//! let merged = merge_config(
//!     &json!([{ "id": 1, "x": "new" }]),
//!     &json!([{ "id": 1, "x": "old", "y": 5 }, { "id": 2, "x": "keep" }]),
//!     &MergeOptions::default(),
//! );
//! assert_eq!(merged, json!([{ "id": 1, "x": "new", "y": 5 }, { "id": 2, "x": "keep" }]));
//! ```
//!
//! Merging never fails: mismatched shapes degrade to whichever side has
//! the expected shape, so partially assembled trees are fine as input.

mod node;
mod reconcile;

pub use node::{MergeNode, Identity};
pub use reconcile::{merge_config, merge_mappings, merge_sequences, dedupe_by_identity};

/// Field used to pair array records when none is configured
pub const DEFAULT_IDENTITY_KEY: &str = "id";

/// Merge configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOptions {
    /// Field whose value identifies a record inside an array
    pub identity_key: String,
    /// Keep priority-only mapping keys and base-only array records at the
    /// top level; nested merges always keep them
    pub append_unmatched: bool,
}

impl MergeOptions {
    /// Options pairing array records by `key`
    pub fn keyed_by(key: impl Into<String>) -> Self {
        Self {
            identity_key: key.into(),
            ..Self::default()
        }
    }

    /// Set whether unmatched items are appended
    pub fn append_unmatched(mut self, append: bool) -> Self {
        self.append_unmatched = append;
        self
    }

    /// Options handed to merges below the top level
    pub(crate) fn nested(&self) -> MergeOptions {
        MergeOptions {
            append_unmatched: true,
            ..self.clone()
        }
    }
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            identity_key: DEFAULT_IDENTITY_KEY.to_string(),
            append_unmatched: true,
        }
    }
}
