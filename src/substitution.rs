//! Changes of variable mapping infinite intervals onto finite ones.
//!
//! Only the forward orientation is mapped here; reversed infinite bounds are
//! flipped by the caller, which then negates the result.

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Substitution {
    /// Both bounds finite.
    Identity,
    /// `[lower, +inf)` via `x = lower + t / (1 - t)` on `[0, 1]`.
    ToInfinity { lower: f64 },
    /// `(-inf, upper]` via `x = upper - (1 - t) / t` on `[0, 1]`.
    FromNegativeInfinity { upper: f64 },
    /// `(-inf, +inf)` via `x = t / (1 - t^2)` on `[-1, 1]`.
    WholeLine,
}

impl Substitution {
    /// Chooses the substitution for the forward interval `[a, b]`, `a <= b`.
    pub fn for_interval(a: f64, b: f64) -> Self {
        match (a.is_finite(), b.is_finite()) {
            (false, false) => Substitution::WholeLine,
            (true, false) => Substitution::ToInfinity { lower: a },
            (false, true) => Substitution::FromNegativeInfinity { upper: b },
            (true, true) => Substitution::Identity,
        }
    }

    /// Bounds of the integration domain after substitution.
    pub fn domain(&self, a: f64, b: f64) -> (f64, f64) {
        match self {
            Substitution::Identity => (a, b),
            Substitution::ToInfinity { .. } | Substitution::FromNegativeInfinity { .. } => (0., 1.),
            Substitution::WholeLine => (-1., 1.),
        }
    }
}

pub fn to_infinity<F>(f: &F, lower: f64) -> impl Fn(f64) -> f64 + '_
where
    F: Fn(f64) -> f64,
{
    move |t| {
        let one_over_one_minus_t = 1. / (1. - t);
        f(lower + t * one_over_one_minus_t) * one_over_one_minus_t * one_over_one_minus_t
    }
}

pub fn from_negative_infinity<F>(f: &F, upper: f64) -> impl Fn(f64) -> f64 + '_
where
    F: Fn(f64) -> f64,
{
    move |t| f(upper - (1. - t) / t) / (t * t)
}

pub fn whole_line<F>(f: &F) -> impl Fn(f64) -> f64 + '_
where
    F: Fn(f64) -> f64,
{
    move |t| {
        let t_squared = t * t;
        let one_over_one_minus_t_squared = 1. / (1. - t_squared);
        f(t * one_over_one_minus_t_squared)
            * (1. + t_squared)
            * one_over_one_minus_t_squared
            * one_over_one_minus_t_squared
    }
}
