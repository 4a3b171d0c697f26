//! Gesture class store: prototype accumulators and nearest-prototype search.
//!
//! Each class keeps the unbinarized component-wise sum of every example
//! hypervector added under its name. Prototypes are deliberately never
//! renormalized: cosine similarity already divides by the prototype norm,
//! and keeping the raw sum lets additional examples sharpen the prototype
//! while diluting any single outlier.
//!
//! Classes are identified by uppercase name, matched case-insensitively at
//! the API boundary, and iterated in insertion order. Insertion order is
//! observable: prediction ties resolve to the earliest-inserted class.

use crate::Hypervector;

/// Norms below this are treated as zero when computing cosine similarity.
const NORM_EPS: f64 = 1e-8;

/// One learned gesture class.
#[derive(Clone, Debug)]
pub struct GestureClass {
    /// Canonical (uppercase) class name.
    pub name: String,
    /// Unbinarized sum of all example hypervectors.
    pub prototype: Vec<f32>,
    /// Number of examples accumulated into the prototype.
    pub example_count: u32,
}

/// Outcome of a prediction.
#[derive(Clone, Debug, Default)]
pub struct Prediction {
    /// Best class name, or `None` when the store is empty or the best
    /// similarity falls below the decision threshold.
    pub label: Option<String>,
    /// Cosine similarity per class, in class insertion order.
    pub similarities: Vec<(String, f32)>,
    /// Similarity of the best class (0.0 for an empty store).
    pub confidence: f32,
}

impl Prediction {
    /// Look up a class's similarity by name, case-insensitively.
    pub fn similarity(&self, name: &str) -> Option<f32> {
        let canonical = name.to_uppercase();
        self.similarities
            .iter()
            .find(|(n, _)| *n == canonical)
            .map(|&(_, s)| s)
    }
}

/// Insertion-ordered collection of gesture classes.
#[derive(Clone, Debug, Default)]
pub struct ClassStore {
    classes: Vec<GestureClass>,
}

impl ClassStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of classes.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Whether no classes have been learned.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Classes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &GestureClass> {
        self.classes.iter()
    }

    /// Class names in insertion order.
    pub fn names(&self) -> Vec<String> {
        self.classes.iter().map(|c| c.name.clone()).collect()
    }

    /// Example count for a class, 0 if absent. Case-insensitive.
    pub fn example_count(&self, name: &str) -> u32 {
        let canonical = name.to_uppercase();
        self.classes
            .iter()
            .find(|c| c.name == canonical)
            .map_or(0, |c| c.example_count)
    }

    /// Accumulate an example hypervector into a class, creating the class
    /// on first use. Returns the class's new example count.
    pub fn add_example(&mut self, name: &str, hv: &Hypervector) -> u32 {
        let canonical = name.to_uppercase();
        let class = match self.classes.iter_mut().find(|c| c.name == canonical) {
            Some(class) => class,
            None => {
                self.classes.push(GestureClass {
                    name: canonical,
                    prototype: vec![0.0; hv.len()],
                    example_count: 0,
                });
                self.classes.last_mut().expect("class just pushed")
            }
        };

        for (p, &x) in class.prototype.iter_mut().zip(hv.iter()) {
            *p += x as f32;
        }
        class.example_count += 1;
        class.example_count
    }

    /// Replace the entire class table. Used by state import.
    pub fn replace(&mut self, classes: Vec<GestureClass>) {
        self.classes = classes;
    }

    /// Remove a class by name. Returns whether it existed. Case-insensitive.
    pub fn remove(&mut self, name: &str) -> bool {
        let canonical = name.to_uppercase();
        match self.classes.iter().position(|c| c.name == canonical) {
            Some(i) => {
                self.classes.remove(i);
                true
            }
            None => false,
        }
    }

    /// Drop every class.
    pub fn clear(&mut self) {
        self.classes.clear();
    }

    /// Nearest-prototype classification.
    ///
    /// Scores the query against every class by cosine similarity and keeps
    /// the running maximum under strict `>`, so equal scores resolve to the
    /// earliest-inserted class. A best score below `threshold` withholds the
    /// label but still reports all similarities; equality with the
    /// threshold is enough to label.
    pub fn predict(&self, hv: &Hypervector, threshold: f32) -> Prediction {
        if self.classes.is_empty() {
            return Prediction::default();
        }

        let mut similarities = Vec::with_capacity(self.classes.len());
        let mut best: Option<(usize, f32)> = None;

        for (i, class) in self.classes.iter().enumerate() {
            let sim = cosine(hv, &class.prototype);
            similarities.push((class.name.clone(), sim));
            if best.map_or(true, |(_, b)| sim > b) {
                best = Some((i, sim));
            }
        }

        let (best_idx, best_sim) = best.expect("store is non-empty");
        let label = if best_sim < threshold {
            None
        } else {
            Some(self.classes[best_idx].name.clone())
        };

        Prediction {
            label,
            similarities,
            confidence: best_sim,
        }
    }
}

/// Cosine similarity between a bipolar query and a prototype accumulator.
///
/// Accumulates in `f64` so the 10k-element dot products stay exact, and
/// returns 0 when either vector's norm vanishes.
pub fn cosine(hv: &Hypervector, prototype: &[f32]) -> f32 {
    let mut dot = 0.0f64;
    let mut norm_p = 0.0f64;
    for (&x, &p) in hv.iter().zip(prototype.iter()) {
        let p = p as f64;
        dot += x as f64 * p;
        norm_p += p * p;
    }
    // Every element of a bipolar vector is ±1, so its norm is √D.
    let norm_hv = (hv.len() as f64).sqrt();
    let norm = norm_hv * norm_p.sqrt();
    if norm < NORM_EPS {
        return 0.0;
    }
    (dot / norm) as f32
}
