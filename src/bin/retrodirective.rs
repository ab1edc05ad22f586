//! Retrodirective array scenarios from the command line.
//!
//! Runs the deformation comparison, the phase table, the AoA error curves or
//! the least-squares fit, prints the numbers and writes SVG plots.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use retrodirective_lib::{
    aoa_error::aoa_error_curve,
    fit::fit_inverse_sqrt,
    scenario::{Scenario, ScenarioConfig},
    series_chart::{ChartSet, SeriesChart},
    table::{phase_table, render_phase_table, tabulated_pattern},
};

const PLOT_SIZE: (u32, u32) = (800, 500);
// dB, where pattern nulls are drawn
const PLOT_FLOOR: f64 = -60.;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Scenario file (TOML). Built-in defaults are used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Directory SVG plots are written to
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Beam patterns of the deformed array with and without correction
    Compare,
    /// Received and conjugate phase per incident angle and element
    Table,
    /// Closed-form AoA error against SNR for several baselines
    AoaError,
    /// Least-squares fit of measured AoA error against SNR
    Fit,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    fmt().with_env_filter(env_filter).with_target(true).init();

    let config = match &args.config {
        Some(path) => ScenarioConfig::load(path)
            .with_context(|| format!("loading scenario {}", path.display()))?,
        None => ScenarioConfig::default(),
    };
    let scenario = Scenario::build(&config).context("invalid scenario")?;

    match args.command {
        Command::Compare => compare(&scenario, &args.out_dir),
        Command::Table => table(&scenario, &args.out_dir),
        Command::AoaError => aoa_error(&scenario, &args.out_dir),
        Command::Fit => fit(&scenario, &args.out_dir),
    }
}

fn write_plot(chart: &ChartSet, out_dir: &Path, name: &str) -> Result<()> {
    let path = out_dir.join(name);
    chart
        .write_svg(&path, PLOT_SIZE)
        .with_context(|| format!("writing {}", path.display()))?;
    info!(path = %path.display(), "wrote plot");
    Ok(())
}

fn compare(scenario: &Scenario, out_dir: &Path) -> Result<()> {
    let aoa = scenario.angle_of_arrival_deg;
    let out = scenario
        .link
        .compare(aoa, &scenario.deformation, &scenario.sweep)?;

    println!(
        "Received Phase (Without Correction): {:.4}",
        out.received_deformed.to_degrees()
    );
    println!(
        "Received Phase (With Correction): {:.4}",
        out.received_original.to_degrees()
    );
    println!(
        "Conjugate Phase (Without Correction): {:.4}",
        out.conjugate_without_correction.to_degrees()
    );
    println!(
        "Conjugate Phase (With Correction): {:.4}",
        out.conjugate_with_correction.to_degrees()
    );
    match (out.without_correction.peak_angle(), out.with_correction.peak_angle()) {
        (Some(without), Some(with)) => println!(
            "Beam peak: {:.3} deg without correction, {:.3} deg with correction",
            without, with
        ),
        _ => println!("Beam peak: pattern vanished across the sweep"),
    }

    let chart = ChartSet::new(
        "Antenna Deformation Correction Using Retrodirective Method",
        "Angle (degrees)",
        "Normalized Gain (dB)",
    )
    .with_series(SeriesChart::from_pattern("Without Correction", &out.without_correction))
    .with_series(SeriesChart::from_pattern("With Correction", &out.with_correction))
    .with_marker(format!("Expected Beam Direction ({}°)", aoa), aoa)
    .with_floor(PLOT_FLOOR);

    write_plot(&chart, out_dir, "deformation_correction.svg")
}

fn table(scenario: &Scenario, out_dir: &Path) -> Result<()> {
    let rows = phase_table(&scenario.link, &scenario.table_angles_deg);
    println!("{}", render_phase_table(&rows));

    let angle = match scenario.table_angles_deg.last() {
        Some(&angle) => angle,
        None => return Ok(()),
    };
    let pattern = tabulated_pattern(&scenario.link, &rows, angle, &scenario.sweep)?
        .context("tabulated angle missing from the table")?;

    let chart = ChartSet::new(
        format!("Beam Pattern for {}° Incident Angle", angle),
        "Angle (degrees)",
        "Normalized Gain (dB)",
    )
    .with_series(SeriesChart::from_pattern(
        format!("Beam Pattern for {}° Incident Angle", angle),
        &pattern,
    ))
    .with_marker(format!("Expected Beam Direction ({}°)", angle), angle)
    .with_floor(PLOT_FLOOR);

    write_plot(&chart, out_dir, "beam_pattern.svg")
}

fn aoa_error(scenario: &Scenario, out_dir: &Path) -> Result<()> {
    let curves = aoa_error_curve(&scenario.aoa_error_band, &scenario.baselines, &scenario.snr_db)?;

    let mut chart = ChartSet::new(
        "Error of Angle of Arrival vs SNR for Different Baselines",
        "SNR (dB)",
        "Error of AOA (degrees)",
    );
    for series in curves.iter() {
        println!(
            "Baseline {} m: {:.6}",
            series.baseline, series.error_deg
        );
        chart = chart.with_series(SeriesChart::from_aoa_error(series));
    }

    write_plot(&chart, out_dir, "aoa_error_vs_snr.svg")
}

fn fit(scenario: &Scenario, out_dir: &Path) -> Result<()> {
    let fit = fit_inverse_sqrt(&scenario.fit_snr_db, &scenario.fit_error_deg)?;
    println!("Fitted error = {:.6} / sqrt(SNR) + {:.6}", fit.a, fit.b);

    let x = scenario.fit_snr_db.iter().copied().collect::<ndarray::Array1<f64>>();
    let measured = scenario.fit_error_deg.iter().copied().collect();
    let fitted = x.mapv(|x| fit.evaluate(x));

    let chart = ChartSet::new(
        "Least Squares Fit of AOA Error vs SNR",
        "SNR (dB)",
        "Error of AOA (degrees)",
    )
    .with_series(SeriesChart::new("Experimental Data", x.clone(), measured))
    .with_series(SeriesChart::new("Least Squares Fit", x, fitted));

    write_plot(&chart, out_dir, "aoa_error_fit.svg")
}
