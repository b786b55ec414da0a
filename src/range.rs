//! Integration over a chain of breakpoints.

use crate::adaptive::{quadrature, QuadratureInfo};
use crate::error::{QuadratureError, QuadratureResult};
use crate::integral::IntegrationStep;
use crate::kronrod::GaussKronrod7x15;
use crate::settings::QuadratureSettings;

/// Integrates over `[p0, p1], [p1, p2], ...` and sums the pieces.
///
/// Breakpoints may be infinite and need not be sorted; every consecutive
/// pair is integrated in its own orientation. The returned info sums steps
/// and error estimates, takes the deepest recursion, and lists every piece in
/// `points`.
pub fn quadrature_over_range<S, F>(
    step: &S,
    f: &F,
    breakpoints: &[f64],
    settings: &QuadratureSettings,
) -> QuadratureResult<(f64, QuadratureInfo)>
where
    S: IntegrationStep,
    F: Fn(f64) -> f64,
{
    if breakpoints.len() < 2 {
        Err(QuadratureError::TooFewBreakpoints(breakpoints.len()))?;
    }

    if let Some(position) = breakpoints.iter().position(|p| p.is_nan()) {
        Err(QuadratureError::NanBound { position })?;
    }

    let mut value = 0.;
    let mut info = QuadratureInfo {
        steps: 0,
        error_estimate: 0.,
        depth: 0,
        is_unreliable: false,
        points: Vec::with_capacity(breakpoints.len() - 1),
    };

    for window in breakpoints.windows(2) {
        let (piece, piece_info) = quadrature(step, f, window[0], window[1], settings)?;

        value += piece;
        info.steps += piece_info.steps;
        info.error_estimate += piece_info.error_estimate;
        info.depth = info.depth.max(piece_info.depth);
        info.is_unreliable |= piece_info.is_unreliable;
        info.points.push((piece, piece_info));
    }

    Ok((value, info))
}

/// Integrates `f` across the breakpoints with the G7/K15 rule.
///
/// ```
/// use adaptive_quad::{integrate_over_range, QuadratureSettings};
///
/// let settings = QuadratureSettings::default();
/// let (value, info) = integrate_over_range(|x: f64| x, &[0., 1., 2.], &settings).unwrap();
/// assert!((value - 2.).abs() < 1e-15);
/// assert_eq!(info.points.len(), 2);
/// ```
pub fn integrate_over_range<F>(
    f: F,
    breakpoints: &[f64],
    settings: &QuadratureSettings,
) -> QuadratureResult<(f64, QuadratureInfo)>
where
    F: Fn(f64) -> f64,
{
    quadrature_over_range(&GaussKronrod7x15, &f, breakpoints, settings)
}
