use serde::{Deserialize, Serialize};

use crate::error::{QuadratureError, QuadratureResult};

/// Default target for the global relative error. Anything much smaller lets
/// roundoff accumulate faster than the estimate improves.
pub const DEFAULT_EPSILON: f64 = f64::EPSILON * 16.;

/// Controls for the adaptive driver.
///
/// `epsilon` is scaled by the calibration estimate and the interval length to
/// give the acceptable error per unit length. `max_depth` caps the number of
/// bisections, so at most `2^(max_depth - 1)` leaf steps are taken; `None` leaves
/// the recursion bounded only by floating-point resolution.
///
/// An `epsilon` of zero is accepted but only a leaf with an exactly zero
/// error estimate passes it. Without `max_depth` nearly every leaf is then
/// bisected to resolution, which costs hundreds of thousands of steps even
/// for smooth integrands. The same holds for any `epsilon` that puts the
/// allowance below the roundoff of the estimate, as happens when the
/// integral cancels to far less than the magnitude of the integrand.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuadratureSettings {
    pub epsilon: f64,
    pub max_depth: Option<u32>,
}

impl Default for QuadratureSettings {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            max_depth: None,
        }
    }
}

impl QuadratureSettings {
    pub fn with_epsilon(self, epsilon: f64) -> Self {
        Self { epsilon, ..self }
    }

    pub fn with_max_depth(self, max_depth: u32) -> Self {
        Self {
            max_depth: Some(max_depth),
            ..self
        }
    }

    pub fn validate(&self) -> QuadratureResult<()> {
        if self.epsilon.is_nan() || self.epsilon < 0. {
            Err(QuadratureError::InvalidEpsilon(self.epsilon))?;
        }

        if self.max_depth == Some(0) {
            Err(QuadratureError::ZeroMaxDepth)?;
        }

        Ok(())
    }

    pub(crate) fn depth_limit(&self) -> u32 {
        self.max_depth.unwrap_or(u32::MAX)
    }
}
