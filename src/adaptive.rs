//! Adaptive bisection driver.
//!
//! Each call runs twice over the (possibly substituted) finite domain: a
//! single-step calibration pass whose estimate sets the acceptable error per
//! unit length, then the accurate pass which bisects every sub-interval whose
//! Kronrod/Gauss disagreement exceeds that allowance.

use serde::Serialize;

use crate::error::{QuadratureError, QuadratureResult};
use crate::integral::IntegrationStep;
use crate::kronrod::GaussKronrod7x15;
use crate::settings::QuadratureSettings;
use crate::substitution::{from_negative_infinity, to_infinity, whole_line, Substitution};

/// Diagnostics of one integration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuadratureInfo {
    /// Leaf steps accepted into the final sum.
    pub steps: usize,
    /// Sum of the leaf error estimates; a diagnostic, not a bound.
    pub error_estimate: f64,
    /// Deepest recursion level reached, starting at 1.
    pub depth: u32,
    /// Some leaf could not be bisected further before meeting the tolerance.
    pub is_unreliable: bool,
    /// Per sub-range results, filled in only by range integration.
    pub points: Vec<(f64, QuadratureInfo)>,
}

impl QuadratureInfo {
    fn from_statistics(statistics: Statistics, error_estimate: f64) -> Self {
        Self {
            steps: statistics.steps,
            error_estimate,
            depth: statistics.depth,
            is_unreliable: statistics.is_unreliable,
            points: Vec::new(),
        }
    }
}

/// Accumulator owned by a single recursion tree.
#[derive(Debug, Clone, Copy)]
struct Statistics {
    steps: usize,
    depth: u32,
    is_unreliable: bool,
}

impl Statistics {
    fn new() -> Self {
        Self {
            steps: 0,
            depth: 1,
            is_unreliable: false,
        }
    }
}

struct Driver<'a, S, F> {
    step: &'a S,
    f: &'a F,
    max_depth: u32,
    acceptable_unit_error: f64,
}

impl<S, F> Driver<'_, S, F>
where
    S: IntegrationStep,
    F: Fn(f64) -> f64,
{
    /// Returns `(estimate, error)` over `[a, b]`, either orientation.
    fn solve(&self, a: f64, b: f64, depth: u32, statistics: &mut Statistics) -> (f64, f64) {
        let (current, poor) = self.step.estimate(self.f, a, b);
        let error = (poor - current).abs();

        if depth >= self.max_depth {
            statistics.steps += 1;
            return (current, error);
        }

        if error <= self.acceptable_unit_error * (b - a).abs() {
            statistics.steps += 1;
            return (current, error);
        }

        let mid = (a + b) / 2.;
        if is_degenerate(a, mid, b) {
            // Cannot bisect any further: most likely a discontinuity.
            statistics.is_unreliable = true;
            let error = if error.is_nan() { 0. } else { error };
            let current = if current.is_finite() { current } else { 0. };
            return (current, error);
        }

        let depth = depth + 1;
        statistics.depth = statistics.depth.max(depth);

        let (left, left_error) = self.solve(a, mid, depth, statistics);
        let (right, right_error) = self.solve(mid, b, depth, statistics);

        (left + right, left_error + right_error)
    }
}

/// True when `mid` is not strictly inside the interval in the orientation
/// the bounds were given.
fn is_degenerate(a: f64, mid: f64, b: f64) -> bool {
    if a <= b {
        a >= mid || mid >= b
    } else {
        a <= mid || mid <= b
    }
}

/// Calibrates the unit error with one step, then runs the accurate pass.
fn calibrated_solve<S, F>(
    step: &S,
    f: &F,
    a: f64,
    b: f64,
    settings: &QuadratureSettings,
) -> (f64, QuadratureInfo)
where
    S: IntegrationStep,
    F: Fn(f64) -> f64,
{
    let calibration = Driver {
        step,
        f,
        max_depth: 1,
        acceptable_unit_error: 0.,
    };
    let (rough, _) = calibration.solve(a, b, 1, &mut Statistics::new());

    let driver = Driver {
        step,
        f,
        max_depth: settings.depth_limit(),
        acceptable_unit_error: (settings.epsilon * rough / (b - a)).abs(),
    };
    let mut statistics = Statistics::new();
    let (value, error_estimate) = driver.solve(a, b, 1, &mut statistics);

    (value, QuadratureInfo::from_statistics(statistics, error_estimate))
}

/// Integrates `f` over `[a, b]` with an explicit step rule.
///
/// Either bound may be infinite and the bounds may be given in either order.
pub fn quadrature<S, F>(
    step: &S,
    f: &F,
    a: f64,
    b: f64,
    settings: &QuadratureSettings,
) -> QuadratureResult<(f64, QuadratureInfo)>
where
    S: IntegrationStep,
    F: Fn(f64) -> f64,
{
    settings.validate()?;

    if a.is_nan() {
        Err(QuadratureError::NanBound { position: 0 })?;
    }
    if b.is_nan() {
        Err(QuadratureError::NanBound { position: 1 })?;
    }

    if a == b {
        let empty = QuadratureInfo::from_statistics(Statistics::new(), 0.);
        return Ok((0., empty));
    }

    if a > b && !(a.is_finite() && b.is_finite()) {
        let (value, info) = quadrature(step, f, b, a, settings)?;
        return Ok((-value, info));
    }

    let substitution = Substitution::for_interval(a, b);
    let (lower, upper) = substitution.domain(a, b);

    let result = match substitution {
        Substitution::Identity => calibrated_solve(step, f, lower, upper, settings),
        Substitution::ToInfinity { lower: x0 } => {
            calibrated_solve(step, &to_infinity(f, x0), lower, upper, settings)
        }
        Substitution::FromNegativeInfinity { upper: x1 } => {
            calibrated_solve(step, &from_negative_infinity(f, x1), lower, upper, settings)
        }
        Substitution::WholeLine => calibrated_solve(step, &whole_line(f), lower, upper, settings),
    };

    Ok(result)
}

/// Integrates `f` over `[a, b]` with the G7/K15 rule.
///
/// ```
/// use adaptive_quad::{integrate, QuadratureSettings};
///
/// let settings = QuadratureSettings::default();
/// let (value, info) = integrate(|x: f64| x.sin(), 0., std::f64::consts::PI, &settings).unwrap();
/// assert!((value - 2.).abs() < 1e-15);
/// assert_eq!(info.depth, 2);
/// ```
pub fn integrate<F>(
    f: F,
    a: f64,
    b: f64,
    settings: &QuadratureSettings,
) -> QuadratureResult<(f64, QuadratureInfo)>
where
    F: Fn(f64) -> f64,
{
    quadrature(&GaussKronrod7x15, &f, a, b, settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use std::cell::Cell;
    use std::f64::consts::PI;

    const INF: f64 = f64::INFINITY;

    fn default_integrate<F: Fn(f64) -> f64>(f: F, a: f64, b: f64) -> (f64, QuadratureInfo) {
        integrate(f, a, b, &QuadratureSettings::default()).unwrap()
    }

    fn normal_density(t: f64) -> f64 {
        (-0.5 * t * t).exp() / (2. * PI).sqrt()
    }

    #[test]
    fn test_exp_single_step() {
        let (value, info) = default_integrate(f64::exp, 0., 1.);

        assert_relative_eq!(value, 1.7182818284590453, max_relative = 2. * f64::EPSILON);
        assert_eq!(info.steps, 1);
        assert_eq!(info.depth, 1);
        assert!(!info.is_unreliable);
        assert!(info.points.is_empty());
    }

    #[test]
    fn test_sine_default() {
        let (value, info) = default_integrate(f64::sin, 0., PI);

        assert_abs_diff_eq!(value, 2., epsilon = 1e-15);
        assert_eq!(info.depth, 2);
        assert_eq!(info.steps, 2);
        assert!(info.error_estimate < 1e-15);
    }

    #[test]
    fn test_sine_single_level() {
        let settings = QuadratureSettings::default().with_max_depth(1);
        let (value, info) = integrate(f64::sin, 0., PI, &settings).unwrap();

        assert_abs_diff_eq!(value, 2., epsilon = 1e-14);
        assert_eq!(info.depth, 1);
        assert_eq!(info.steps, 1);
        assert!(info.error_estimate > 1e-12);
    }

    #[test]
    fn test_max_depth_one_is_single_leaf() {
        let settings = QuadratureSettings::default()
            .with_epsilon(0.)
            .with_max_depth(1);

        let (_, info) = integrate(|x: f64| 1. / (1. + 100. * x * x), -3., 5., &settings).unwrap();

        assert_eq!(info.steps, 1);
        assert_eq!(info.depth, 1);
    }

    #[test]
    fn test_zero_epsilon_bisects_to_the_cap() {
        let settings = QuadratureSettings::default()
            .with_epsilon(0.)
            .with_max_depth(6);
        let f = |x: f64| x.exp() * (3. * x).sin();

        let (value, info) = integrate(f, 0., 1., &settings).unwrap();

        assert_eq!(info.depth, 6);
        assert!(info.steps > 16);
        assert!(info.steps <= 32);
        let exact = (1f64.exp() * (3f64.sin() - 3. * 3f64.cos()) + 3.) / 10.;
        assert_relative_eq!(value, exact, max_relative = 1e-14);
    }

    #[test]
    fn test_max_depth_caps_bisection() {
        let settings = QuadratureSettings::default()
            .with_epsilon(0.)
            .with_max_depth(4);

        let (_, info) = integrate(|x: f64| (20. * x).sin().abs(), 0., 3., &settings).unwrap();

        assert_eq!(info.depth, 4);
        assert!(info.steps <= 8);
    }

    #[test]
    fn test_normal_density_whole_line() {
        let (value, info) = default_integrate(normal_density, -INF, INF);

        assert_relative_eq!(value, 1., max_relative = 4. * f64::EPSILON);
        assert_eq!(info.steps, 32);
    }

    #[test]
    fn test_normal_density_tails() {
        let (lower, lower_info) = default_integrate(normal_density, -INF, 0.);
        let (upper, upper_info) = default_integrate(normal_density, 0., INF);

        assert_relative_eq!(lower, 0.5, max_relative = 4. * f64::EPSILON);
        assert_relative_eq!(upper, 0.5, max_relative = 4. * f64::EPSILON);
        assert_eq!(lower_info.steps, 16);
        assert_eq!(upper_info.steps, 16);
    }

    #[test]
    fn test_odd_function_whole_line() {
        let (value, info) = default_integrate(|t: f64| t * (-(t * t)).exp(), -INF, INF);

        assert_abs_diff_eq!(value, 0., epsilon = 1e-16);
        assert_eq!(info.steps, 1);
    }

    #[test]
    fn test_inverse_square_to_infinity() {
        let (value, info) = default_integrate(|t: f64| 1. / (t * t), 1., INF);

        assert_relative_eq!(value, 1., max_relative = 2. * f64::EPSILON);
        assert_eq!(info.steps, 1);
    }

    #[test]
    fn test_exp_from_negative_infinity() {
        let (value, info) = default_integrate(f64::exp, -INF, 0.);

        assert_relative_eq!(value, 1., max_relative = 4. * f64::EPSILON);
        assert_eq!(info.steps, 14);
    }

    #[test]
    fn test_decaying_exp_to_infinity() {
        let (value, info) = default_integrate(|x: f64| (-x).exp(), 0., INF);

        assert_relative_eq!(value, 1., max_relative = 4. * f64::EPSILON);
        assert_eq!(info.steps, 14);
        assert_eq!(info.depth, 7);
    }

    #[test]
    fn test_reversed_finite_interval() {
        let f = |x: f64| x.exp() * (3. * x).cos();

        let (forward, forward_info) = default_integrate(f, -1., 2.);
        let (backward, backward_info) = default_integrate(f, 2., -1.);

        assert_eq!(backward, -forward);
        assert_eq!(forward_info, backward_info);
    }

    #[test]
    fn test_reversed_identity_is_exact() {
        let (value, _) = default_integrate(|x: f64| x, 2., 0.);
        assert_eq!(value, -2.);
    }

    #[test]
    fn test_reversed_infinite_intervals() {
        let (forward, _) = default_integrate(normal_density, 0., INF);
        let (backward, _) = default_integrate(normal_density, INF, 0.);
        assert_eq!(backward, -forward);

        let (forward, _) = default_integrate(f64::exp, -INF, 0.);
        let (backward, _) = default_integrate(f64::exp, 0., -INF);
        assert_eq!(backward, -forward);

        let (forward, _) = default_integrate(normal_density, -INF, INF);
        let (backward, _) = default_integrate(normal_density, INF, -INF);
        assert_eq!(backward, -forward);
    }

    #[test]
    fn test_empty_intervals() {
        let calls = Cell::new(0usize);
        let f = |x: f64| {
            calls.set(calls.get() + 1);
            x
        };

        for bound in [1.5, INF, -INF] {
            let (value, info) = default_integrate(&f, bound, bound);
            assert_eq!(value, 0.);
            assert_eq!(info.steps, 0);
            assert_eq!(info.depth, 1);
            assert!(!info.is_unreliable);
        }
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_jump_discontinuity_resolves_by_bisection() {
        // Once the leaf straddling 0.3 is narrow enough, every node rounds onto
        // the same side of the jump and Gauss and Kronrod agree exactly.
        let jump = |x: f64| if x < 0.3 { 0. } else { 1. };

        let (value, info) = default_integrate(jump, 0., 1.);

        assert!(!info.is_unreliable);
        assert!(info.depth > 50);
        assert_abs_diff_eq!(value, 0.7, epsilon = 1e-12);
    }

    #[test]
    fn test_endpoint_pole_is_unreliable() {
        // The leaf touching t = 3 never meets the allowance and is bisected
        // until its midpoint collapses onto an endpoint.
        let settings = QuadratureSettings::default().with_epsilon(1e-4);
        let pole = |t: f64| 1. / (3. - t).sqrt();

        let (value, info) = integrate(pole, 0., 3., &settings).unwrap();

        assert!(info.is_unreliable);
        assert!(info.depth > 40);
        assert!(value.is_finite());
        assert_relative_eq!(value, 2. * 3f64.sqrt(), max_relative = 1e-3);
    }

    #[test]
    fn test_reversed_degenerate_interval() {
        // Adjacent doubles: the midpoint collapses onto an endpoint at once.
        let a = 1.;
        let b = 1. + f64::EPSILON;
        let settings = QuadratureSettings::default().with_epsilon(0.);
        let jump = |x: f64| if x < 1. { 0. } else { 1. };

        let (forward, forward_info) = integrate(jump, a, b, &settings).unwrap();
        let (backward, backward_info) = integrate(jump, b, a, &settings).unwrap();

        assert_eq!(backward, -forward);
        assert_eq!(forward_info.steps, 0);
        assert_eq!(backward_info.steps, 0);
        assert!(forward_info.is_unreliable);
        assert!(backward_info.is_unreliable);
        assert_eq!(forward_info.depth, 1);
        assert_eq!(backward_info.depth, 1);
    }

    #[test]
    fn test_is_degenerate_orientation() {
        let a = 1.;
        let b = 1. + f64::EPSILON;
        let mid = (a + b) / 2.;

        assert!(is_degenerate(a, mid, b));
        assert!(is_degenerate(b, mid, a));
        assert!(!is_degenerate(0., 0.5, 1.));
        assert!(!is_degenerate(1., 0.5, 0.));
        assert!(is_degenerate(2., 2., 2.));
    }

    #[test]
    fn test_non_finite_collapsed_interval_is_zeroed() {
        let a = 1.;
        let b = 1. + f64::EPSILON;
        let integrands: [fn(f64) -> f64; 2] = [|_| f64::INFINITY, |_| f64::NAN];

        for f in integrands {
            let (value, info) = default_integrate(f, a, b);

            assert_eq!(value, 0.);
            assert_eq!(info.error_estimate, 0.);
            assert_eq!(info.steps, 0);
            assert_eq!(info.depth, 1);
            assert!(info.is_unreliable);
        }
    }

    #[test]
    fn test_nan_bounds_are_rejected() {
        let settings = QuadratureSettings::default();

        assert_eq!(
            integrate(f64::exp, f64::NAN, 1., &settings),
            Err(QuadratureError::NanBound { position: 0 })
        );
        assert_eq!(
            integrate(f64::exp, 0., f64::NAN, &settings),
            Err(QuadratureError::NanBound { position: 1 })
        );
    }

    #[test]
    fn test_invalid_settings_are_rejected() {
        let settings = QuadratureSettings::default().with_max_depth(0);

        assert_eq!(
            integrate(f64::exp, 0., 1., &settings),
            Err(QuadratureError::ZeroMaxDepth)
        );
    }

    #[test]
    fn test_calibration_does_not_leak_statistics() {
        let settings = QuadratureSettings::default().with_max_depth(1);
        let (_, info) = integrate(f64::cos, 0., 7., &settings).unwrap();

        assert_eq!(info.steps, 1);
    }
}
