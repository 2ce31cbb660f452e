use std::fmt;
use std::ops::Index;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// Gain slots
// ---------------------------------------------------------------------------

/// One of the three PID gain slots, in positional order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GainIndex {
    Proportional,
    Integral,
    Derivative,
}

impl GainIndex {
    pub const ALL: [GainIndex; 3] = [
        GainIndex::Proportional,
        GainIndex::Integral,
        GainIndex::Derivative,
    ];

    pub fn position(self) -> usize {
        match self {
            GainIndex::Proportional => 0,
            GainIndex::Integral => 1,
            GainIndex::Derivative => 2,
        }
    }

    /// Next slot in cyclic order, and whether the cycle wrapped back to `p`.
    pub fn next(self) -> (GainIndex, bool) {
        match self {
            GainIndex::Proportional => (GainIndex::Integral, false),
            GainIndex::Integral => (GainIndex::Derivative, false),
            GainIndex::Derivative => (GainIndex::Proportional, true),
        }
    }
}

impl TryFrom<usize> for GainIndex {
    type Error = Error;

    fn try_from(n: usize) -> Result<Self> {
        GainIndex::ALL.get(n).copied().ok_or(Error::GainIndex(n))
    }
}

// ---------------------------------------------------------------------------
// Gain vector (p, i, d)
// ---------------------------------------------------------------------------

/// Proportional, integral and derivative gains.
///
/// Serialized as a plain `[p, i, d]` array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct GainVector {
    k: Vector3<f64>,
}

impl GainVector {
    pub fn new(p: f64, i: f64, d: f64) -> Self {
        Self { k: Vector3::new(p, i, d) }
    }

    pub fn zeros() -> Self {
        Self { k: Vector3::zeros() }
    }

    pub fn p(&self) -> f64 {
        self.k.x
    }

    pub fn i(&self) -> f64 {
        self.k.y
    }

    pub fn d(&self) -> f64 {
        self.k.z
    }

    pub fn get(&self, idx: GainIndex) -> f64 {
        self.k[idx.position()]
    }

    /// Positional lookup; indices past 2 are a caller bug and are reported,
    /// never clamped.
    pub fn try_get(&self, n: usize) -> Result<f64> {
        self.k.get(n).copied().ok_or(Error::GainIndex(n))
    }

    pub fn set(&mut self, idx: GainIndex, value: f64) {
        self.k[idx.position()] = value;
    }

    pub fn add(&mut self, idx: GainIndex, delta: f64) {
        self.k[idx.position()] += delta;
    }

    pub fn scale(&mut self, idx: GainIndex, factor: f64) {
        self.k[idx.position()] *= factor;
    }

    pub fn sum(&self) -> f64 {
        self.k.sum()
    }

    pub fn is_non_negative(&self) -> bool {
        self.k.iter().all(|v| *v >= 0.0)
    }

    pub fn is_finite(&self) -> bool {
        self.k.iter().all(|v| v.is_finite())
    }

    pub fn to_array(&self) -> [f64; 3] {
        [self.k.x, self.k.y, self.k.z]
    }
}

impl Default for GainVector {
    fn default() -> Self {
        Self::zeros()
    }
}

impl Index<GainIndex> for GainVector {
    type Output = f64;

    fn index(&self, idx: GainIndex) -> &f64 {
        &self.k[idx.position()]
    }
}

impl From<[f64; 3]> for GainVector {
    fn from(v: [f64; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl From<GainVector> for [f64; 3] {
    fn from(g: GainVector) -> Self {
        g.to_array()
    }
}

impl fmt::Display for GainVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.6}, {:.6}, {:.6}]", self.p(), self.i(), self.d())
    }
}
