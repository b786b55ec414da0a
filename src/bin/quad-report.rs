use serde::Serialize;
use std::error::Error;
use std::f64::consts::PI;
use std::io::Write;

use adaptive_quad::{integrate_over_range, QuadratureSettings};

struct Problem {
    title: &'static str,
    f: Box<dyn Fn(f64) -> f64>,
    breakpoints: Vec<f64>,
    exact: f64,
    settings: QuadratureSettings,
}

impl Problem {
    fn new(
        title: &'static str,
        f: impl Fn(f64) -> f64 + 'static,
        breakpoints: &[f64],
        exact: f64,
    ) -> Self {
        Problem {
            title,
            f: Box::new(f),
            breakpoints: breakpoints.to_vec(),
            exact,
            settings: QuadratureSettings::default(),
        }
    }

    fn with_epsilon(self, epsilon: f64) -> Self {
        Problem {
            settings: self.settings.with_epsilon(epsilon),
            ..self
        }
    }
}

#[derive(Serialize, Debug)]
struct ReportRow {
    title: &'static str,
    lower: f64,
    upper: f64,
    pieces: usize,
    value: f64,
    exact: f64,
    error: f64,
    #[serde(rename = "relative_error")]
    relative: f64,
    steps: usize,
    depth: u32,
    error_estimate: f64,
    unreliable: bool,
}

fn normal_density(t: f64) -> f64 {
    (-0.5 * t * t).exp() / (2. * PI).sqrt()
}

fn catalog() -> Vec<Problem> {
    const INF: f64 = f64::INFINITY;

    vec![
        Problem::new("normal distribution", normal_density, &[-INF, INF], 1.),
        Problem::new(
            "normal distribution sigma bands",
            normal_density,
            &[-INF, -3., -2., -1., 1., 2., 3., INF],
            1.,
        ),
        Problem::new(
            "normal distribution one sigma",
            normal_density,
            &[-1., 1.],
            0.682689492137086,
        ),
        Problem::new("e^t", f64::exp, &[0., 128.], 128f64.exp()),
        Problem::new("sin(t)", f64::sin, &[0., PI], 2.),
        Problem::new(
            "1 / sqrt(3 - t)",
            |t: f64| 1. / (3. - t).sqrt(),
            &[0., 3.],
            2. * 3f64.sqrt(),
        )
        .with_epsilon(1e-4),
        Problem::new(
            "1 / (x ln(x)^2)",
            |x: f64| 1. / (x * x.ln().powi(2)),
            &[2., INF],
            1. / 2f64.ln(),
        )
        .with_epsilon(1e-3),
        Problem::new(
            "1 / x^1.01",
            |x: f64| 1. / x.powf(1.01),
            &[2., INF],
            2f64.powf(-0.01) / 0.01,
        )
        .with_epsilon(1e-2),
        Problem::new("1 / (1 + x^2)", |x: f64| 1. / (1. + x * x), &[0., INF], PI / 2.),
        Problem::new("e^-x cos(x)", |x: f64| (-x).exp() * x.cos(), &[0., INF], 0.5),
        Problem::new("e^-x", |x: f64| (-x).exp(), &[0., INF], 1.),
    ]
}

fn main() -> Result<(), Box<dyn Error>> {
    let output: Box<dyn Write> = match std::env::args().nth(1) {
        Some(path) => Box::new(std::fs::File::create(path)?),
        None => Box::new(std::io::stdout()),
    };
    let mut writer = csv::Writer::from_writer(output);

    let problems = catalog();
    let mut unreliable = 0;

    for problem in &problems {
        let (value, info) =
            integrate_over_range(&problem.f, &problem.breakpoints, &problem.settings)?;

        if info.is_unreliable {
            unreliable += 1;
        }

        writer.serialize(ReportRow {
            title: problem.title,
            lower: problem.breakpoints[0],
            upper: problem.breakpoints[problem.breakpoints.len() - 1],
            pieces: info.points.len(),
            value,
            exact: problem.exact,
            error: problem.exact - value,
            relative: (problem.exact - value) / problem.exact,
            steps: info.steps,
            depth: info.depth,
            error_estimate: info.error_estimate,
            unreliable: info.is_unreliable,
        })?;
    }

    writer.flush()?;

    eprintln!(
        "{} problems integrated, {} flagged unreliable",
        problems.len(),
        unreliable
    );

    Ok(())
}
