//! Adaptive Gauss-Kronrod quadrature for one-dimensional integrals over
//! finite, semi-infinite and infinite intervals.
//!
//! ```
//! use adaptive_quad::{integrate, QuadratureSettings};
//!
//! let normal = |t: f64| (-0.5 * t * t).exp() / (2. * std::f64::consts::PI).sqrt();
//! let settings = QuadratureSettings::default();
//! let (value, info) = integrate(normal, f64::NEG_INFINITY, f64::INFINITY, &settings).unwrap();
//!
//! assert!((value - 1.).abs() < 1e-15);
//! assert!(!info.is_unreliable);
//! ```

pub mod adaptive;
pub mod error;
pub mod integral;
pub mod kronrod;
pub mod range;
pub mod settings;
pub mod substitution;

pub use adaptive::{integrate, quadrature, QuadratureInfo};
pub use error::{QuadratureError, QuadratureResult};
pub use integral::{AdaptiveQuadrature, Integral, IntegrationStep};
pub use kronrod::GaussKronrod7x15;
pub use range::{integrate_over_range, quadrature_over_range};
pub use settings::QuadratureSettings;
