//! Analysis configuration snapshot
//!
//! Captured once when an analysis starts and never re-read, so every
//! batch and pattern of one analysis sees the same orb and edge harmonic.

use crate::harmonics::CIRCLE;
use crate::{Error, Result};
use serde::Serialize;

/// Default primal orb divisor: 360 / 30 = 12°
pub const DEFAULT_ORBS_DIVISOR: u32 = 30;

/// Default highest harmonic examined
pub const DEFAULT_EDGE_HARMONIC: u32 = 108;

/// Immutable numeric settings of one analysis
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnalysisConfig {
    primal_orb: f64,
    edge_harmonic: u32,
    half_orbs_for_doubles: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            primal_orb: CIRCLE / f64::from(DEFAULT_ORBS_DIVISOR),
            edge_harmonic: DEFAULT_EDGE_HARMONIC,
            half_orbs_for_doubles: true,
        }
    }
}

impl AnalysisConfig {
    /// Validate and build a configuration.
    ///
    /// The primal orb must be a positive finite number of degrees and the
    /// edge harmonic at least 1.
    pub fn new(primal_orb: f64, edge_harmonic: u32, half_orbs_for_doubles: bool) -> Result<Self> {
        if !primal_orb.is_finite() || primal_orb <= 0.0 {
            return Err(Error::InvalidInput(format!(
                "primal orb must be a positive number of degrees, got {}",
                primal_orb
            )));
        }
        if edge_harmonic == 0 {
            return Err(Error::InvalidInput(
                "edge harmonic must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            primal_orb,
            edge_harmonic,
            half_orbs_for_doubles,
        })
    }

    /// Build from an orb divisor: primal orb = 360 / divisor
    pub fn from_divisor(
        orbs_divisor: u32,
        edge_harmonic: u32,
        half_orbs_for_doubles: bool,
    ) -> Result<Self> {
        if orbs_divisor == 0 {
            return Err(Error::InvalidInput(
                "orbs divisor must be at least 1".to_string(),
            ));
        }
        Self::new(
            CIRCLE / f64::from(orbs_divisor),
            edge_harmonic,
            half_orbs_for_doubles,
        )
    }

    pub fn primal_orb(&self) -> f64 {
        self.primal_orb
    }

    pub fn edge_harmonic(&self) -> u32 {
        self.edge_harmonic
    }

    pub fn half_orbs_for_doubles(&self) -> bool {
        self.half_orbs_for_doubles
    }

    /// Orb in force for a group of points: halved across charts when the
    /// half-orb policy is on.
    pub fn orb_for(&self, spans_charts: bool) -> f64 {
        if spans_charts && self.half_orbs_for_doubles {
            self.primal_orb / 2.0
        } else {
            self.primal_orb
        }
    }
}
