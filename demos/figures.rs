//! Two gnuplot sessions: a replotted 2D figure, then a 2D and a 3D figure shown together.
//!
//! Run with `RUST_LOG=debug cargo run --example figures` to see every command.

use anyhow::Result;
use gnupipe::{show_all, Figure, FigureConfig, PlotCall};
use ndarray::Array1;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
    tracing::info!("Starting gnupipe demo");

    let config = FigureConfig::from_env().with_replot(true);
    Figure::scoped(config, |fig| -> Result<()> {
        fig.set("grid")?;
        fig.set("key outside top horizontal")?;
        fig.plot(PlotCall::expression("sin(x)").opt("dashtype", 0))?;
        fig.plot(
            PlotCall::xy(vec![0.0, 1.0], vec![0.0, 0.5])
                .opt("w", "lines")
                .line_color("red"),
        )?;
        fig.show()?;
        Ok(())
    })?;

    let mut fig1 = Figure::new()?;
    let mut fig2 = Figure::new()?;

    let x = Array1::linspace(-2.0, 2.0, 41);
    let y = x.mapv(|v: f64| v * v);
    fig1.plot(PlotCall::xy(&x, &y).with("linespoints").title("x**2"))?;

    fig2.set("hidden3d")?;
    fig2.set("isosamples 50")?;
    fig2.splot(PlotCall::expression("sin(x)*cos(y)"))?;

    show_all(&mut [&mut fig1, &mut fig2], true)?;

    fig1.close()?;
    fig2.close()?;
    tracing::info!("gnupipe demo finished");
    Ok(())
}
