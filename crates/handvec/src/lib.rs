//! Few-shot hand gesture recognition with hyperdimensional computing.
//!
//! Encodes 21-point hand landmark frames into high-dimensional bipolar
//! vectors, learns gesture classes from a handful of examples, and
//! classifies live frames by nearest-prototype cosine similarity.
//!
//! # Pipeline
//!
//! ```text
//! landmarks[21] → features[48] → bin indices → item vectors → bundle → HV
//!                                                    ↙              ↘
//!                                        add_example(name, hv)   predict(hv)
//! ```
//!
//! The crate is synchronous and allocation-bounded: the item memory holds at
//! most `48 · num_bins` vectors, plus one prototype accumulator per learned
//! class. A single [`GestureRecognizer`] instance must not receive
//! concurrent calls; parallel streams use independent instances.
//!
//! # Example
//!
//! ```
//! use handvec::{GestureRecognizer, Landmark, RecognizerConfig};
//!
//! let mut rec = GestureRecognizer::with_config(RecognizerConfig {
//!     dim: 1_000,
//!     ..RecognizerConfig::default()
//! });
//!
//! let pose = [Landmark::new(0.5, 0.5, 0.0); 21];
//! let hv = rec.encode(&pose).unwrap();
//! rec.add_example("fist", &hv);
//!
//! let prediction = rec.predict(&hv);
//! assert_eq!(prediction.label.as_deref(), Some("FIST"));
//! ```

pub mod classes;
pub mod encoder;
pub mod error;
pub mod features;
pub mod item_memory;
pub mod landmark;
pub mod quantizer;
pub mod recognizer;
pub mod rng;
pub mod state;

pub use classes::{ClassStore, Prediction};
pub use error::{HandvecError, Result};
pub use landmark::Landmark;
pub use recognizer::{GestureRecognizer, RecognizerConfig};
pub use state::RecognizerState;

/// A bipolar hypervector: every element is exactly `-1` or `+1`.
pub type Hypervector = Vec<i8>;
