use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use meetpoint::position::{OptionOverrides, Position, Summary};
use meetpoint::sample::{draw_cloud, CloudCfg, ReplayToken};
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

mod input;
mod provenance;

#[derive(Parser)]
#[command(name = "meetpoint")]
#[command(about = "Centers, tours and curve fits of planar point sets")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Summarize a point file and write the summary plus a provenance sidecar
    Run {
        /// Points as CSV (`x`,`y` columns) or JSON (`[[x, y], ...]`)
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out: PathBuf,
        #[command(flatten)]
        opts: OptionFlags,
    },
    /// Summarize a seeded random point cloud and print it
    Demo {
        #[arg(long, default_value_t = 32)]
        n: usize,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value_t = 0)]
        clusters: usize,
        #[command(flatten)]
        opts: OptionFlags,
    },
    /// Print a small provenance JSON block
    Report,
}

/// Option overrides; a JSON options file is applied first, flags on top.
#[derive(Args, Debug, Default)]
struct OptionFlags {
    /// JSON file with any subset of the position options
    #[arg(long)]
    options: Option<PathBuf>,
    /// Probe diagonal directions in the median search
    #[arg(long)]
    subsearch: bool,
    #[arg(long)]
    epsilon: Option<f64>,
    #[arg(long)]
    bounds: Option<f64>,
    #[arg(long)]
    start_index: Option<usize>,
    #[arg(long)]
    degree: Option<usize>,
}

impl OptionFlags {
    fn resolve(&self) -> Result<OptionOverrides> {
        let base = match &self.options {
            Some(path) => input::load_overrides(path)?,
            None => OptionOverrides::default(),
        };
        let flags = OptionOverrides {
            subsearch: self.subsearch.then_some(true),
            epsilon: self.epsilon,
            bounds: self.bounds,
            start_index: self.start_index,
            degree: self.degree,
        };
        Ok(base.merge(flags))
    }
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Run { input, out, opts } => run(&input, &out, &opts),
        Action::Demo {
            n,
            seed,
            clusters,
            opts,
        } => demo(n, seed, clusters, &opts),
        Action::Report => report(),
    }
}

fn summarize(position: &Position) -> Result<Summary> {
    let summary = position.summary().context("computing position summary")?;
    tracing::info!(
        n = summary.locations.len(),
        center_cost = summary.center_cost,
        median_cost = summary.median_cost,
        score = summary.score,
        "summary"
    );
    Ok(summary)
}

fn run(input: &Path, out: &Path, opts: &OptionFlags) -> Result<()> {
    tracing::info!(input = %input.display(), out = %out.display(), "run");
    let points = input::load_points(input)?;
    let overrides = opts.resolve()?;
    let position = Position::with_options(points, overrides)?;
    let summary = summarize(&position)?;

    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(out, serde_json::to_vec_pretty(&summary)?)
        .with_context(|| format!("writing {}", out.display()))?;

    let payload = provenance::Payload::new(serde_json::to_value(position.options())?)
        .with_input(input.to_string_lossy());
    let sidecar = provenance::write_sidecar(out, payload)?;
    tracing::info!(sidecar = %sidecar.display(), "provenance written");
    Ok(())
}

fn demo(n: usize, seed: u64, clusters: usize, opts: &OptionFlags) -> Result<()> {
    tracing::info!(n, seed, clusters, "demo");
    let cfg = CloudCfg {
        count: n,
        clusters,
        ..Default::default()
    };
    let points = draw_cloud(cfg, ReplayToken { seed, index: 0 });
    let position = Position::with_options(points, opts.resolve()?)?;
    let summary = summarize(&position)?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn report() -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&provenance::header())?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn flags_override_options_file() {
        let dir = tempdir().unwrap();
        let opts_path = dir.path().join("opts.json");
        std::fs::write(&opts_path, r#"{"epsilon": 0.01, "bounds": 4}"#).unwrap();
        let flags = OptionFlags {
            options: Some(opts_path),
            subsearch: true,
            epsilon: Some(1e-5),
            ..Default::default()
        };
        let o = flags.resolve().unwrap();
        assert_eq!(o.epsilon, Some(1e-5));
        assert_eq!(o.bounds, Some(4.0));
        assert_eq!(o.subsearch, Some(true));
        assert_eq!(o.degree, None);
    }

    #[test]
    fn run_writes_summary_and_sidecar() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("pts.json");
        std::fs::write(&input, "[[1, 2], [5, 6.6], [-7, 8.1], [3.1, -1.7]]").unwrap();
        let out = dir.path().join("out/summary.json");
        run(&input, &out, &OptionFlags::default()).unwrap();

        let summary: Summary = serde_json::from_slice(&std::fs::read(&out).unwrap()).unwrap();
        assert_eq!(summary.median, meetpoint::Point::new(0.525, 3.75));
        assert!((summary.score - 0.06535988277952172).abs() < 1e-12);
        assert!(dir.path().join("out/summary.provenance.json").exists());
    }

    #[test]
    fn demo_defaults_produce_a_summary() {
        let cmd = Cmd::try_parse_from(["meetpoint", "demo"]).unwrap();
        let Action::Demo {
            n,
            seed,
            clusters,
            opts,
        } = cmd.action
        else {
            panic!("expected demo");
        };
        assert_eq!(n, 32);
        demo(n, seed, clusters, &opts).unwrap();
    }

    #[test]
    fn cli_parses_run() {
        let cmd = Cmd::try_parse_from([
            "meetpoint",
            "run",
            "--input",
            "a.csv",
            "--out",
            "b.json",
            "--subsearch",
            "--degree",
            "2",
        ])
        .unwrap();
        match cmd.action {
            Action::Run { opts, .. } => {
                assert!(opts.subsearch);
                assert_eq!(opts.degree, Some(2));
            }
            _ => panic!("expected run"),
        }
    }
}
