use serde::{Deserialize, Serialize};

use crate::error::{ShapeError, ShapeResult};

/// How decoded circle radii are checked.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RadiusPolicy {
    /// Accept any value, including negative and NaN radii.
    #[default]
    Permissive,
    /// Refuse negative radii. NaN and infinities pass.
    RejectNegative,
    /// Radius must be finite and >= 0.
    RequireFinite,
}

impl RadiusPolicy {
    pub fn check(self, r: f64) -> ShapeResult<()> {
        let ok = match self {
            RadiusPolicy::Permissive => true,
            RadiusPolicy::RejectNegative => r >= 0.0 || r.is_nan(),
            RadiusPolicy::RequireFinite => r.is_finite() && r >= 0.0,
        };
        if ok {
            Ok(())
        } else {
            Err(ShapeError::InvalidRadius(r))
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeConfig {
    pub radius_policy: RadiusPolicy,
}

impl ShapeConfig {
    pub fn with_radius_policy(mut self, policy: RadiusPolicy) -> Self {
        self.radius_policy = policy;
        self
    }
}
