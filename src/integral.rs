use crate::adaptive::{quadrature, QuadratureInfo};
use crate::error::QuadratureResult;
use crate::kronrod::GaussKronrod7x15;
use crate::range::quadrature_over_range;
use crate::settings::QuadratureSettings;

/// A rule pair evaluated over one finite interval.
///
/// Returns `(accurate, poor)`: the driver uses the first as the estimate and
/// the distance between the two as the local error.
pub trait IntegrationStep {
    fn estimate<F>(&self, f: &F, a: f64, b: f64) -> (f64, f64)
    where
        F: Fn(f64) -> f64;
}

pub trait Integral {
    fn integrate<F>(&self, f: F, support: (f64, f64)) -> QuadratureResult<(f64, QuadratureInfo)>
    where
        F: Fn(f64) -> f64;

    fn integrate_over_range<F>(
        &self,
        f: F,
        breakpoints: &[f64],
    ) -> QuadratureResult<(f64, QuadratureInfo)>
    where
        F: Fn(f64) -> f64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AdaptiveQuadrature<S = GaussKronrod7x15> {
    pub step: S,
    pub settings: QuadratureSettings,
}

impl AdaptiveQuadrature {
    pub fn new(settings: QuadratureSettings) -> Self {
        Self {
            step: GaussKronrod7x15,
            settings,
        }
    }
}

impl<S> Integral for AdaptiveQuadrature<S>
where
    S: IntegrationStep,
{
    fn integrate<F>(&self, f: F, support: (f64, f64)) -> QuadratureResult<(f64, QuadratureInfo)>
    where
        F: Fn(f64) -> f64,
    {
        let (a, b) = support;
        quadrature(&self.step, &f, a, b, &self.settings)
    }

    fn integrate_over_range<F>(
        &self,
        f: F,
        breakpoints: &[f64],
    ) -> QuadratureResult<(f64, QuadratureInfo)>
    where
        F: Fn(f64) -> f64,
    {
        quadrature_over_range(&self.step, &f, breakpoints, &self.settings)
    }
}
