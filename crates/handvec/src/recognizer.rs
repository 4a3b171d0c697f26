//! The recognizer façade.
//!
//! [`GestureRecognizer`] wires the pipeline together and owns all mutable
//! state: the item memory and the class store. It is synchronous and
//! single-threaded; a caller that wants parallel streams creates
//! independent instances, which share nothing.

use crate::classes::{ClassStore, Prediction};
use crate::encoder;
use crate::error::{HandvecError, Result};
use crate::item_memory::ItemMemory;
use crate::landmark::{Landmark, LANDMARK_COUNT};
use crate::state::{ClassState, RecognizerState};
use crate::Hypervector;

/// Recognizer construction parameters.
///
/// All three tuning knobs are fixed for the life of the instance and
/// travel with exported state. `seed` is the base for the recognizer's
/// reproducible random stream; item vectors derive their own per-key
/// seeds so that exported state stays portable across instances
/// regardless of it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RecognizerConfig {
    /// Hypervector dimension.
    pub dim: usize,
    /// Quantizer bin count (at least 2).
    pub num_bins: usize,
    /// Minimum cosine similarity for a prediction to carry a label.
    pub threshold: f32,
    /// Base seed for reproducible draws.
    pub seed: u32,
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        Self {
            dim: 10_000,
            num_bins: 16,
            threshold: 0.25,
            seed: 42,
        }
    }
}

/// Few-shot gesture recognizer.
pub struct GestureRecognizer {
    config: RecognizerConfig,
    memory: ItemMemory,
    store: ClassStore,
}

impl Default for GestureRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureRecognizer {
    /// Construct with the default configuration
    /// (D = 10,000, 16 bins, threshold 0.25, seed 42).
    pub fn new() -> Self {
        Self::with_config(RecognizerConfig::default())
    }

    /// Construct with an explicit configuration.
    pub fn with_config(config: RecognizerConfig) -> Self {
        Self {
            config,
            memory: ItemMemory::new(config.dim),
            store: ClassStore::new(),
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &RecognizerConfig {
        &self.config
    }

    /// Encode a 21-landmark frame into a bipolar hypervector.
    ///
    /// Pure with respect to learned classes; the only mutation is lazy
    /// materialization inside the item memory. A frame with the wrong
    /// landmark count is rejected; a geometrically degenerate frame
    /// encodes the all-zero feature vector and will match nothing above
    /// threshold.
    pub fn encode(&mut self, landmarks: &[Landmark]) -> Result<Hypervector> {
        if landmarks.len() != LANDMARK_COUNT {
            return Err(HandvecError::InvalidLandmarkCount {
                got: landmarks.len(),
            });
        }
        Ok(encoder::encode_landmarks(
            landmarks,
            self.config.num_bins,
            &mut self.memory,
        ))
    }

    /// Accumulate an example under a gesture name (case-insensitive).
    /// Returns the class's new example count.
    pub fn add_example(&mut self, name: &str, hv: &Hypervector) -> u32 {
        self.store.add_example(name, hv)
    }

    /// Classify a hypervector against the learned classes.
    pub fn predict(&self, hv: &Hypervector) -> Prediction {
        self.store.predict(hv, self.config.threshold)
    }

    /// Learned class names in insertion order.
    pub fn get_class_names(&self) -> Vec<String> {
        self.store.names()
    }

    /// Example count for a class, 0 if absent. Case-insensitive.
    pub fn get_example_count(&self, name: &str) -> u32 {
        self.store.example_count(name)
    }

    /// Forget every learned class. Item memory and configuration are
    /// preserved, so encodings before and after are identical.
    pub fn clear_all(&mut self) {
        self.store.clear();
    }

    /// Remove one class by name. Returns whether it existed.
    pub fn remove_gesture(&mut self, name: &str) -> bool {
        self.store.remove(name)
    }

    /// Snapshot the recognizer as a portable state document.
    pub fn export(&self) -> RecognizerState {
        let classes = self
            .store
            .iter()
            .map(|c| {
                (
                    c.name.clone(),
                    ClassState {
                        prototype: c.prototype.clone(),
                        example_count: c.example_count,
                    },
                )
            })
            .collect();
        RecognizerState {
            dim: self.config.dim,
            num_bins: self.config.num_bins,
            threshold: self.config.threshold,
            classes,
        }
    }

    /// Replace configuration and classes from a state document.
    ///
    /// Validation happens before any mutation, so a rejected document
    /// leaves the recognizer exactly as it was. On success the item
    /// memory is reset; entries re-derive lazily against the imported
    /// dimension. Classes are restored in the document's order, which
    /// [`export`](Self::export) writes in insertion order — so tie-break
    /// behavior survives a round trip.
    pub fn import(&mut self, state: RecognizerState) -> Result<()> {
        state.validate()?;

        self.config.dim = state.dim;
        self.config.num_bins = state.num_bins;
        self.config.threshold = state.threshold;

        if self.memory.dim() != state.dim {
            self.memory = ItemMemory::new(state.dim);
        } else {
            self.memory.reset();
        }
        self.store.replace(state.into_classes());
        Ok(())
    }

    /// Export as a JSON document.
    pub fn export_json(&self) -> String {
        self.export().to_json()
    }

    /// Import from a JSON document. Invalid documents leave the
    /// recognizer untouched.
    pub fn import_json(&mut self, json: &str) -> Result<()> {
        let state = RecognizerState::from_json(json)?;
        self.import(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmark::WRIST;
    use crate::rng::SeededRng;

    /// Small dimension keeps the scenario tests fast; similarity contrasts
    /// at D = 2048 are already far beyond noise.
    fn test_config() -> RecognizerConfig {
        RecognizerConfig {
            dim: 2_048,
            ..RecognizerConfig::default()
        }
    }

    /// Stylized open hand (fingers straight, spread along x).
    fn open_hand() -> Vec<Landmark> {
        let mut lm = vec![Landmark::default(); LANDMARK_COUNT];
        lm[WRIST] = Landmark::new(0.5, 0.9, 0.0);
        let xs = [0.38, 0.44, 0.50, 0.56, 0.62];
        for f in 0..5 {
            let base = 1 + 4 * f;
            for j in 0..4 {
                lm[base + j] = Landmark::new(xs[f], 0.72 - 0.07 * j as f32, -0.01 * j as f32);
            }
        }
        lm
    }

    /// Stylized fist (fingertips folded back toward the knuckles).
    fn fist() -> Vec<Landmark> {
        let mut lm = open_hand();
        for f in 0..5 {
            let base = 1 + 4 * f;
            let knuckle = lm[base];
            lm[base + 2] = Landmark::new(knuckle.x, knuckle.y + 0.02, 0.03);
            lm[base + 3] = Landmark::new(knuckle.x, knuckle.y + 0.05, 0.05);
        }
        lm
    }

    /// Stylized peace sign: index and middle extended, the rest folded.
    fn peace() -> Vec<Landmark> {
        let mut lm = open_hand();
        for f in [0usize, 3, 4] {
            let base = 1 + 4 * f;
            let knuckle = lm[base];
            lm[base + 2] = Landmark::new(knuckle.x, knuckle.y + 0.02, 0.03);
            lm[base + 3] = Landmark::new(knuckle.x, knuckle.y + 0.05, 0.05);
        }
        lm
    }

    /// Jitter every coordinate by up to ±amount, deterministically.
    fn jitter(pose: &[Landmark], seed: u32, amount: f32) -> Vec<Landmark> {
        let mut rng = SeededRng::new(seed);
        pose.iter()
            .map(|l| {
                let mut d = || (rng.next_unit() as f32 * 2.0 - 1.0) * amount;
                Landmark::new(l.x + d(), l.y + d(), l.z + d())
            })
            .collect()
    }

    #[test]
    fn test_wrong_landmark_count_rejected() {
        let mut rec = GestureRecognizer::with_config(test_config());
        let short = vec![Landmark::default(); 20];
        assert!(matches!(
            rec.encode(&short),
            Err(HandvecError::InvalidLandmarkCount { got: 20 })
        ));
        // Rejection leaves no learned state behind.
        assert!(rec.get_class_names().is_empty());
    }

    #[test]
    fn test_encode_is_pure() {
        let mut rec = GestureRecognizer::with_config(test_config());
        let a = rec.encode(&fist()).unwrap();
        let b = rec.encode(&fist()).unwrap();
        assert_eq!(a, b);
        assert!(a.iter().all(|&x| x == 1 || x == -1));
    }

    #[test]
    fn test_two_recognizers_encode_identically() {
        let mut a = GestureRecognizer::with_config(test_config());
        let mut b = GestureRecognizer::with_config(test_config());
        assert_eq!(a.encode(&peace()).unwrap(), b.encode(&peace()).unwrap());
    }

    #[test]
    fn test_single_class_single_example() {
        let mut rec = GestureRecognizer::with_config(test_config());
        let hv = rec.encode(&fist()).unwrap();
        assert_eq!(rec.add_example("FIST", &hv), 1);

        let p = rec.predict(&hv);
        assert_eq!(p.label.as_deref(), Some("FIST"));
        assert_eq!(p.similarity("FIST"), Some(1.0));
        assert_eq!(p.confidence, 1.0);
    }

    #[test]
    fn test_label_follows_threshold() {
        let mut rec = GestureRecognizer::with_config(test_config());
        let hv = rec.encode(&fist()).unwrap();
        rec.add_example("FIST", &hv);

        let q = rec.encode(&open_hand()).unwrap();
        let p = rec.predict(&q);
        // Whatever the score, the labelling decision must track the
        // threshold exactly, and the map still reports the class.
        assert_eq!(
            p.label.is_none(),
            p.confidence < rec.config().threshold,
            "label/threshold mismatch at confidence {}",
            p.confidence
        );
        assert!(p.similarity("FIST").is_some());
    }

    #[test]
    fn test_two_classes_nearest_wins() {
        let mut rec = GestureRecognizer::with_config(test_config());

        for i in 0..5 {
            let hv = rec.encode(&jitter(&fist(), 100 + i, 0.004)).unwrap();
            rec.add_example("FIST", &hv);
            let hv = rec.encode(&jitter(&peace(), 200 + i, 0.004)).unwrap();
            rec.add_example("PEACE", &hv);
        }

        let query = rec.encode(&jitter(&peace(), 999, 0.004)).unwrap();
        let p = rec.predict(&query);
        assert_eq!(p.label.as_deref(), Some("PEACE"));
        assert!(
            p.similarity("PEACE").unwrap() > p.similarity("FIST").unwrap(),
            "peace {:?} vs fist {:?}",
            p.similarity("PEACE"),
            p.similarity("FIST")
        );
    }

    #[test]
    fn test_case_folding_end_to_end() {
        let mut rec = GestureRecognizer::with_config(test_config());
        let hv = rec.encode(&fist()).unwrap();
        rec.add_example("thumbs_up", &hv);

        assert_eq!(rec.get_example_count("THUMBS_UP"), 1);
        assert_eq!(rec.get_class_names(), vec!["THUMBS_UP".to_string()]);
        assert!(rec.remove_gesture("Thumbs_Up"));
        assert!(!rec.remove_gesture("Thumbs_Up"));
    }

    #[test]
    fn test_clear_preserves_item_memory() {
        let mut rec = GestureRecognizer::with_config(test_config());
        let before = rec.encode(&fist()).unwrap();
        rec.add_example("FIST", &before);

        rec.clear_all();
        let p = rec.predict(&before);
        assert_eq!(p.label, None);
        assert!(p.similarities.is_empty());
        assert_eq!(p.confidence, 0.0);

        // Encodings are unchanged by forgetting classes.
        assert_eq!(rec.encode(&fist()).unwrap(), before);
    }

    #[test]
    fn test_export_import_round_trip() {
        let mut rec = GestureRecognizer::with_config(test_config());
        for i in 0..3 {
            let hv = rec.encode(&jitter(&fist(), i, 0.004)).unwrap();
            rec.add_example("FIST", &hv);
        }
        for i in 0..5 {
            let hv = rec.encode(&jitter(&peace(), 40 + i, 0.004)).unwrap();
            rec.add_example("PEACE", &hv);
        }
        let hv = rec.encode(&open_hand()).unwrap();
        rec.add_example("OPEN", &hv);

        let mut restored = GestureRecognizer::new();
        restored.import(rec.export()).unwrap();

        assert_eq!(restored.config(), rec.config());
        assert_eq!(restored.get_example_count("FIST"), 3);
        assert_eq!(restored.get_example_count("PEACE"), 5);

        // Held-out queries classify identically, bit for bit.
        for seed in 0..10u32 {
            let pose = jitter(&peace(), 5_000 + seed, 0.01);
            let q = rec.encode(&pose).unwrap();
            assert_eq!(q, restored.encode(&pose).unwrap());

            let a = rec.predict(&q);
            let b = restored.predict(&q);
            assert_eq!(a.label, b.label);
            assert_eq!(a.confidence, b.confidence);
            assert_eq!(a.similarities.len(), b.similarities.len());
            for (name, sim) in &a.similarities {
                assert_eq!(b.similarity(name), Some(*sim), "class {name}");
            }
        }
    }

    #[test]
    fn test_round_trip_preserves_tie_break_order() {
        let mut rec = GestureRecognizer::with_config(test_config());
        let hv = rec.encode(&fist()).unwrap();
        // Deliberately insert against alphabetical order with identical
        // prototypes, so only insertion order can decide the tie.
        rec.add_example("BETA", &hv);
        rec.add_example("ALPHA", &hv);
        assert_eq!(rec.predict(&hv).label.as_deref(), Some("BETA"));

        let mut restored = GestureRecognizer::new();
        restored.import(rec.export()).unwrap();
        assert_eq!(restored.get_class_names(), vec!["BETA".to_string(), "ALPHA".to_string()]);
        assert_eq!(restored.predict(&hv).label.as_deref(), Some("BETA"));

        // Same through the JSON encoding.
        let mut from_json = GestureRecognizer::new();
        from_json.import_json(&rec.export_json()).unwrap();
        assert_eq!(from_json.predict(&hv).label.as_deref(), Some("BETA"));
    }

    #[test]
    fn test_import_rejects_non_canonical_class_name() {
        let mut rec = GestureRecognizer::with_config(test_config());
        let hv = rec.encode(&fist()).unwrap();
        rec.add_example("FIST", &hv);

        let json = r#"{"dim": 4, "numBins": 16, "threshold": 0.25,
            "classes": {"fist": {"prototype": [0, 0, 0, 0], "exampleCount": 1}}}"#;
        assert!(rec.import_json(json).is_err());

        // The rejected document must not disturb existing state.
        assert_eq!(rec.config().dim, 2_048);
        assert_eq!(rec.get_example_count("FIST"), 1);
    }

    #[test]
    fn test_import_json_round_trip() {
        let mut rec = GestureRecognizer::with_config(test_config());
        let hv = rec.encode(&fist()).unwrap();
        rec.add_example("FIST", &hv);

        let json = rec.export_json();
        let mut restored = GestureRecognizer::new();
        restored.import_json(&json).unwrap();

        let q = restored.encode(&fist()).unwrap();
        let p = restored.predict(&q);
        assert_eq!(p.label.as_deref(), Some("FIST"));
    }

    #[test]
    fn test_failed_import_leaves_recognizer_untouched() {
        let mut rec = GestureRecognizer::with_config(test_config());
        let hv = rec.encode(&fist()).unwrap();
        rec.add_example("FIST", &hv);

        let mut bad = rec.export();
        bad.classes.get_mut("FIST").unwrap().prototype.pop();
        assert!(rec.import(bad).is_err());

        // Classes and config survive the rejected import.
        assert_eq!(rec.get_example_count("FIST"), 1);
        assert_eq!(rec.config().dim, 2_048);
        assert_eq!(rec.predict(&hv).label.as_deref(), Some("FIST"));
    }

    #[test]
    fn test_import_switches_dimension() {
        let mut small = GestureRecognizer::with_config(RecognizerConfig {
            dim: 512,
            ..RecognizerConfig::default()
        });
        let hv = small.encode(&fist()).unwrap();
        small.add_example("FIST", &hv);

        let mut rec = GestureRecognizer::with_config(test_config());
        rec.import(small.export()).unwrap();
        assert_eq!(rec.config().dim, 512);

        let q = rec.encode(&fist()).unwrap();
        assert_eq!(q.len(), 512);
        assert_eq!(rec.predict(&q).label.as_deref(), Some("FIST"));
    }

    #[test]
    fn test_degenerate_pose_never_labels() {
        let mut rec = GestureRecognizer::with_config(test_config());
        let hv = rec.encode(&fist()).unwrap();
        rec.add_example("FIST", &hv);

        let collapsed = vec![Landmark::new(0.4, 0.6, 0.0); LANDMARK_COUNT];
        let q = rec.encode(&collapsed).unwrap();
        let p = rec.predict(&q);
        assert!(
            p.confidence < rec.config().threshold,
            "degenerate pose scored {}",
            p.confidence
        );
        assert_eq!(p.label, None);
    }
}
