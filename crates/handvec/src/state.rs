//! Portable recognizer state.
//!
//! The state document carries the recognizer configuration and the class
//! table — and nothing else. Item memory is never serialized: its entries
//! are a pure function of dimension and key, so any compatible
//! implementation re-derives them on demand. The document is shaped for
//! a standard structured text encoding (JSON via serde); field names are
//! part of the wire contract.
//!
//! The class table is an insertion-ordered map. Order is behavior, not
//! cosmetics: prediction ties resolve to the earliest-inserted class, so
//! a round-trip that reordered classes would change labels on tied
//! queries.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::classes::GestureClass;
use crate::error::{HandvecError, Result};

/// Serialized form of one gesture class.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClassState {
    /// Unbinarized prototype accumulator, exactly `dim` values.
    pub prototype: Vec<f32>,
    /// Number of examples accumulated into the prototype.
    pub example_count: u32,
}

/// Complete portable recognizer state.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecognizerState {
    /// Hypervector dimension.
    pub dim: usize,
    /// Quantizer bin count.
    pub num_bins: usize,
    /// Decision threshold for prediction labels.
    pub threshold: f32,
    /// Class table keyed by canonical (uppercase) name, in class
    /// insertion order.
    pub classes: IndexMap<String, ClassState>,
}

impl RecognizerState {
    /// Validate internal consistency.
    ///
    /// Checks the constraints that serde's shape checking cannot express:
    /// positive dimension, at least two bins, canonical (uppercase) class
    /// names, and per-class prototype lengths matching `dim`.
    pub fn validate(&self) -> Result<()> {
        if self.dim == 0 {
            return Err(HandvecError::invalid_state("dim must be positive"));
        }
        if self.num_bins < 2 {
            return Err(HandvecError::invalid_state("numBins must be at least 2"));
        }
        for (name, class) in &self.classes {
            if *name != name.to_uppercase() {
                return Err(HandvecError::invalid_state(format!(
                    "class name {name:?} is not canonical uppercase"
                )));
            }
            if class.prototype.len() != self.dim {
                return Err(HandvecError::invalid_state(format!(
                    "class {name}: prototype length {} does not match dim {}",
                    class.prototype.len(),
                    self.dim
                )));
            }
        }
        Ok(())
    }

    /// Rebuild the class table as insertion-ready classes, preserving
    /// the document's class order.
    pub fn into_classes(self) -> Vec<GestureClass> {
        self.classes
            .into_iter()
            .map(|(name, class)| GestureClass {
                name,
                prototype: class.prototype,
                example_count: class.example_count,
            })
            .collect()
    }

    /// Serialize to a JSON string.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("state serialization cannot fail")
    }

    /// Parse and validate a JSON state document.
    pub fn from_json(json: &str) -> Result<Self> {
        let state: RecognizerState = serde_json::from_str(json)
            .map_err(|e| HandvecError::invalid_state(e.to_string()))?;
        state.validate()?;
        Ok(state)
    }
}
