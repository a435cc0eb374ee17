use serde::Serialize;
use std::error::Error;

use plotters::prelude::*;

use quadrature::{Fixed, Integral, Lobatto, Real, Simpson, PI};

struct Case {
    name: &'static str,
    f: fn(Real) -> Real,
    support: (Real, Real),
    exact: Real,
}

#[derive(Serialize, Debug)]
struct Estimate {
    case: String,
    method: &'static str,
    estimate: Real,
    #[serde(rename = "abs_error")]
    error: Real,
}

impl Estimate {
    fn new(case: &str, method: &'static str, estimate: Real, exact: Real) -> Self {
        Self {
            case: case.to_string(),
            method,
            estimate,
            error: (estimate - exact).abs(),
        }
    }
}

fn cases() -> Vec<Case> {
    vec![
        Case {
            name: "f(x)=sin(x), x=[0;pi]",
            f: |x| x.sin(),
            support: (0., PI),
            exact: -PI.cos() + (0. as Real).cos(),
        },
        Case {
            name: "f(x)=6x^2-8x+5, x=[1;4]",
            f: |x| 6. * x * x - 8. * x + 5.,
            // 2x^3 - 4x^2 + 5x
            support: (1., 4.),
            exact: (2. * 64. - 4. * 16. + 5. * 4.) - (2. - 4. + 5.),
        },
        Case {
            name: "f(x)=ln(x), x=[1;2]",
            f: |x| x.ln(),
            // x ln(x) - x
            support: (1., 2.),
            exact: (2. * (2. as Real).ln() - 2.) - (-1.),
        },
        Case {
            name: "f(x)=sqrt(x)+1/(3*sqrt(x)), x=[4;9]",
            f: |x| x.sqrt() + 1. / (3. * x.sqrt()),
            support: (4., 9.),
            exact: 40. / 3.,
        },
    ]
}

fn convergence_chart(path: &str) -> Result<(), Box<dyn Error>> {
    const FLOOR: Real = 1e-18;

    let f = |x: Real| x.ln();
    let exact = 2. * (2. as Real).ln() - 1.;
    let error = |area: Real| (area - exact).abs().max(FLOOR);

    let simpson_errors: Vec<(f64, f64)> = (0..=12u8)
        .map(|depth| {
            let area = Simpson::new(1e-15, depth).integrate(f, (1., 2.));
            (depth as f64, error(area))
        })
        .collect();

    let lobatto_errors: Vec<(f64, f64)> = (0..=4u8)
        .map(|depth| {
            let area = Lobatto::new(1e-15, depth).integrate(f, (1., 2.));
            (depth as f64, error(area))
        })
        .collect();

    let drawing_area = SVGBackend::new(path, (800, 600)).into_drawing_area();
    drawing_area.fill(&WHITE)?;

    let mut chart_context = ChartBuilder::on(&drawing_area)
        .caption("ln(x), x=[1;2]", ("sans-serif", 20))
        .margin(40)
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 40)
        .build_cartesian_2d(0f64..12f64, (FLOOR..1f64).log_scale())?;

    chart_context
        .configure_mesh()
        .x_labels(13)
        .y_labels(20)
        .x_desc("max_depth")
        .y_desc("|error|")
        .y_label_formatter(&|y| format!("{:.0e}", y))
        .axis_desc_style(("sans-serif", 15))
        .draw()?;

    chart_context
        .draw_series(LineSeries::new(simpson_errors, RED.filled()))?
        .label("Simpson")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &RED));

    chart_context
        .draw_series(LineSeries::new(lobatto_errors, BLUE.filled()))?
        .label("Lobatto")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &BLUE));

    chart_context
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    drawing_area.present()?;

    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let decimals: u8 = match std::env::args().nth(1) {
        Some(arg) => arg.parse()?,
        None => 20,
    };

    let simpson = Simpson::default();
    let lobatto = Lobatto::default();

    let mut estimates = Vec::new();

    for case in cases() {
        let by_simpson = simpson.integrate(case.f, case.support);
        let by_lobatto = lobatto.integrate(case.f, case.support);

        println!("\n{}", case.name);
        println!("Exact value: {}", Fixed(case.exact, decimals));
        println!("Simpson:     {}", Fixed(by_simpson, decimals));
        println!("Lobatto:     {}", Fixed(by_lobatto, decimals));

        estimates.push(Estimate::new(case.name, "simpson", by_simpson, case.exact));
        estimates.push(Estimate::new(case.name, "lobatto", by_lobatto, case.exact));
    }

    println!("\nf(x)=x^i, x=[0;1]");
    for i in 0..5 {
        let area = lobatto.integrate(|x| x.powi(i), (0., 1.));
        let name = format!("f(x)=x^{}, x=[0;1]", i);

        println!("x^{}: {}", i, Fixed(area, decimals));

        estimates.push(Estimate::new(&name, "lobatto", area, 1. / (i + 1) as Real));
    }

    std::fs::create_dir_all("results")?;
    let mut writer = csv::Writer::from_path("results/quadrature-demo.csv")?;
    for estimate in &estimates {
        writer.serialize(estimate)?;
    }
    writer.flush()?;

    std::fs::create_dir_all("plots")?;
    convergence_chart("plots/quadrature-convergence.svg")?;

    Ok(())
}
