//! Hand landmark geometry.
//!
//! Landmarks follow the MediaPipe hand topology: index 0 is the wrist, and
//! each finger contributes four joints (MCP, PIP/IP, DIP, TIP) in order from
//! thumb to pinky. Coordinates are normalized image coordinates: `x` and `y`
//! in `[0, 1]`, `z` relative depth in the same units as `x`. The recognizer
//! never validates the coordinate range, only the landmark count.

use serde::{Deserialize, Serialize};

/// Number of landmarks in a hand frame.
pub const LANDMARK_COUNT: usize = 21;

/// Wrist landmark index.
pub const WRIST: usize = 0;
/// Middle-finger MCP, the anchor for the hand-size measure.
pub const MIDDLE_MCP: usize = 9;

/// Fingertip indices, thumb to pinky.
pub const FINGERTIPS: [usize; 5] = [4, 8, 12, 16, 20];
/// Knuckle (MCP) indices, thumb to pinky.
pub const MCPS: [usize; 5] = [1, 5, 9, 13, 17];
/// PIP (IP for the thumb) indices, thumb to pinky.
pub const PIPS: [usize; 5] = [2, 6, 10, 14, 18];

/// Landmark indices whose centroid approximates the palm center
/// (the four non-thumb knuckles).
pub const PALM_ANCHORS: [usize; 4] = [5, 9, 13, 17];

/// A single 3D hand keypoint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Component-wise difference `self - other`.
    pub fn sub(&self, other: &Landmark) -> Landmark {
        Landmark {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }

    /// Dot product.
    pub fn dot(&self, other: &Landmark) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Euclidean norm.
    pub fn length(&self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Euclidean distance to another landmark.
    pub fn distance(&self, other: &Landmark) -> f32 {
        self.sub(other).length()
    }
}

/// Component-wise mean of the landmarks at the given indices.
pub fn centroid(landmarks: &[Landmark], indices: &[usize]) -> Landmark {
    let mut acc = Landmark::default();
    for &i in indices {
        acc.x += landmarks[i].x;
        acc.y += landmarks[i].y;
        acc.z += landmarks[i].z;
    }
    let n = indices.len() as f32;
    Landmark {
        x: acc.x / n,
        y: acc.y / n,
        z: acc.z / n,
    }
}
