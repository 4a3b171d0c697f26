//! Pose-invariant geometric feature extraction.
//!
//! Converts a 21-landmark hand frame into 48 scalar features that are
//! invariant to hand position and scale: every distance is divided by the
//! wrist-to-middle-knuckle span, heights and spreads are measured relative
//! to the wrist and palm center, and finger curl is expressed as a
//! normalized joint angle.
//!
//! The feature layout is positional and stable — the quantizer's range
//! table is indexed by feature position, and serialized recognizer state
//! is only meaningful against the exact same ordering:
//!
//! | Index  | Count | Feature                                              |
//! |--------|-------|------------------------------------------------------|
//! | 0–4    | 5     | fingertip distance to wrist                          |
//! | 5–9    | 5     | fingertip distance to palm center                    |
//! | 10–14  | 5     | fingertip height above wrist (upward positive)       |
//! | 15–19  | 5     | fingertip lateral offset from palm center            |
//! | 20–24  | 5     | finger curl angle at the PIP/IP joint, radians / π   |
//! | 25–34  | 10    | pairwise fingertip distances, (i, j) with i < j      |
//! | 35–38  | 4     | thumb tip to index/middle/ring/pinky tips            |
//! | 39–43  | 5     | fingertip depth relative to wrist                    |
//! | 44–47  | 4     | adjacent knuckle distances                           |

use crate::landmark::{
    centroid, Landmark, FINGERTIPS, LANDMARK_COUNT, MCPS, MIDDLE_MCP, PALM_ANCHORS, PIPS, WRIST,
};

/// Number of features produced per frame.
pub const FEATURE_COUNT: usize = 48;

/// Below this wrist-to-middle-knuckle span the frame is treated as
/// degenerate and all features collapse to zero.
const MIN_HAND_SIZE: f32 = 1e-6;

/// Joint segments shorter than this produce a curl angle of zero.
const MIN_SEGMENT: f32 = 1e-8;

/// Extract the 48-feature vector from a full hand frame.
///
/// `landmarks` must hold exactly [`LANDMARK_COUNT`] entries; the caller
/// (the recognizer façade) enforces this. A degenerate frame — all points
/// collapsed so the hand span vanishes — yields an all-zero vector rather
/// than an error, so a downstream encode still proceeds and simply matches
/// nothing above threshold.
pub fn extract(landmarks: &[Landmark]) -> [f32; FEATURE_COUNT] {
    debug_assert_eq!(landmarks.len(), LANDMARK_COUNT);

    let mut features = [0.0f32; FEATURE_COUNT];

    let wrist = landmarks[WRIST];
    let hand_size = landmarks[MIDDLE_MCP].distance(&wrist);
    if hand_size < MIN_HAND_SIZE {
        return features;
    }

    let palm = centroid(landmarks, &PALM_ANCHORS);
    let mut k = 0;

    // Fingertip distances to the wrist.
    for &tip in &FINGERTIPS {
        features[k] = landmarks[tip].distance(&wrist) / hand_size;
        k += 1;
    }

    // Fingertip distances to the palm center.
    for &tip in &FINGERTIPS {
        features[k] = landmarks[tip].distance(&palm) / hand_size;
        k += 1;
    }

    // Height above the wrist. Image y grows downward, so wrist.y - tip.y
    // is positive for a raised finger.
    for &tip in &FINGERTIPS {
        features[k] = (wrist.y - landmarks[tip].y) / hand_size;
        k += 1;
    }

    // Lateral spread from the palm center.
    for &tip in &FINGERTIPS {
        features[k] = (landmarks[tip].x - palm.x) / hand_size;
        k += 1;
    }

    // Curl angle at each finger's middle joint.
    for f in 0..FINGERTIPS.len() {
        features[k] = curl_angle(
            &landmarks[MCPS[f]],
            &landmarks[PIPS[f]],
            &landmarks[FINGERTIPS[f]],
        ) / std::f32::consts::PI;
        k += 1;
    }

    // Pairwise fingertip distances, upper triangle.
    for i in 0..FINGERTIPS.len() {
        for j in (i + 1)..FINGERTIPS.len() {
            features[k] = landmarks[FINGERTIPS[i]].distance(&landmarks[FINGERTIPS[j]]) / hand_size;
            k += 1;
        }
    }

    // Thumb opposition: thumb tip to every other fingertip.
    let thumb = landmarks[FINGERTIPS[0]];
    for &tip in &FINGERTIPS[1..] {
        features[k] = thumb.distance(&landmarks[tip]) / hand_size;
        k += 1;
    }

    // Depth relative to the wrist.
    for &tip in &FINGERTIPS {
        features[k] = (landmarks[tip].z - wrist.z) / hand_size;
        k += 1;
    }

    // Knuckle spacing across the palm.
    for w in MCPS.windows(2) {
        features[k] = landmarks[w[0]].distance(&landmarks[w[1]]) / hand_size;
        k += 1;
    }

    debug_assert_eq!(k, FEATURE_COUNT);
    features
}

/// Angle at joint `pip` formed by the segments toward `mcp` and `tip`,
/// in radians. Zero-length segments yield zero.
fn curl_angle(mcp: &Landmark, pip: &Landmark, tip: &Landmark) -> f32 {
    let to_mcp = mcp.sub(pip);
    let to_tip = tip.sub(pip);
    let len_mcp = to_mcp.length();
    let len_tip = to_tip.length();
    if len_mcp < MIN_SEGMENT || len_tip < MIN_SEGMENT {
        return 0.0;
    }
    (to_mcp.dot(&to_tip) / (len_mcp * len_tip)).clamp(-1.0, 1.0).acos()
}
