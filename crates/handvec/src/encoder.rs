//! Pose encoding: bundle item vectors and binarize.
//!
//! One frame encodes as the superposition of 48 item vectors, one per
//! feature. The sum lives in a widened `i32` accumulator (48 terms of ±1
//! per dimension can never overflow it) and binarizes by sign, with the
//! tie rule `>= 0 → +1`. The tie rule is part of the wire contract:
//! serialized state is only portable across implementations that break
//! ties the same way.

use crate::features::{self, FEATURE_COUNT};
use crate::item_memory::ItemMemory;
use crate::landmark::Landmark;
use crate::quantizer;
use crate::Hypervector;

/// Encode a feature vector against an item memory.
///
/// The item memory's dimension decides the output length. This is the
/// shared back half of the pipeline; [`encode_landmarks`] is the full
/// frame-to-hypervector path.
pub fn encode_features(
    features: &[f32; FEATURE_COUNT],
    num_bins: usize,
    memory: &mut ItemMemory,
) -> Hypervector {
    let mut acc = vec![0i32; memory.dim()];

    for (i, &value) in features.iter().enumerate() {
        let bin = quantizer::quantize_feature(i, value, num_bins);
        let item = memory.get(i, bin);
        for (a, &x) in acc.iter_mut().zip(item.iter()) {
            *a += x as i32;
        }
    }

    binarize(&acc)
}

/// Encode a full 21-landmark frame.
pub fn encode_landmarks(
    landmarks: &[Landmark],
    num_bins: usize,
    memory: &mut ItemMemory,
) -> Hypervector {
    let features = features::extract(landmarks);
    encode_features(&features, num_bins, memory)
}

/// Sign-binarize an accumulator: `>= 0` maps to `+1`, negative to `-1`.
pub fn binarize(acc: &[i32]) -> Hypervector {
    acc.iter().map(|&a| if a >= 0 { 1 } else { -1 }).collect()
}
