use anyhow::{ensure, Context};
use clap::Parser;
use ndarray::Array1;

use inverse_cdf_sampling::LightCurve;

/// Simulate photon arrival times from an exponentially decaying light curve.
#[derive(Parser, Debug)]
#[command(name = "light-curve", version, about)]
struct Args {
    /// Number of tabulated rate nodes
    #[arg(long, default_value_t = 100)]
    bins: usize,

    /// Length of the observation, nodes span [0, duration]
    #[arg(long, default_value_t = 100.0)]
    duration: f64,

    /// Decay constant of rate(t) = exp(-t / decay)
    #[arg(long, default_value_t = 20.0)]
    decay: f64,

    /// Number of arrival times to simulate
    #[arg(long, default_value_t = 10_000)]
    samples: usize,

    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Bins of the printed histogram
    #[arg(long, default_value_t = 10)]
    histogram_bins: usize,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    ensure!(args.histogram_bins > 0, "--histogram-bins must be positive");
    ensure!(args.decay > 0.0, "--decay must be positive");

    let times = Array1::linspace(0.0, args.duration, args.bins);
    let rates = times.mapv(|t: f64| (-t / args.decay).exp());
    let curve = LightCurve::new(times, rates).context("building light curve")?;

    let arrivals = curve
        .sample_times_seeded(args.samples, args.seed)
        .context("sampling arrival times")?;
    log::info!("simulated {} arrival times with seed {}", arrivals.len(), args.seed);

    if arrivals.is_empty() {
        println!("no samples drawn");
        return Ok(());
    }

    let lo = arrivals.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = arrivals.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let width = (hi - lo) / args.histogram_bins as f64;
    let mut hist = vec![0usize; args.histogram_bins];
    for t in arrivals.iter() {
        let bin = if width > 0.0 { ((t - lo) / width) as usize } else { 0 };
        hist[bin.min(args.histogram_bins - 1)] += 1;
    }

    let peak = hist.iter().copied().max().unwrap_or(1).max(1);
    for (i, count) in hist.iter().enumerate() {
        let start = lo + i as f64 * width;
        let bar = "#".repeat(count * 50 / peak);
        println!("{:>9.2} {:>7} {}", start, count, bar);
    }
    println!("mean arrival time: {:.3}", arrivals.sum() / arrivals.len() as f64);

    Ok(())
}
