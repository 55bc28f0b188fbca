// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

use std::env;

use anyhow::{anyhow, bail, Result};
use tracing::{info, Level};

use pitchfit::{pitch_name, ContainerConfig, FitFile, PitchValue, TieBreak};

fn print_usage() {
    println!("pitchfit - Fit pitches onto a scale or chord");
    println!();
    println!("Usage: pitchfit [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --config <FILE>         Load a fit job from YAML or TOML");
    println!("  --key <NOTE>            Scale root (default C)");
    println!("  --scale <NAME>          Scale type (default major)");
    println!("  --chord <SYMBOL>        Fit against a chord instead of a scale");
    println!("  --sources <LIST>        Comma-separated pitches to optimize for (60,C#4,...)");
    println!("  --tie-break <MODE>      down, up or root (default down)");
    println!("  --fit <PITCH>           Pitch to project; may be repeated");
    println!("  --table                 Print the fitted pitch-class table");
    println!("  -v, -vv                 Debug or trace logging");
    println!("  --help                  Show this help message");
}

/// Parsed command line
#[derive(Debug, Default, PartialEq)]
struct CliArgs {
    config: Option<String>,
    key: Option<String>,
    scale: Option<String>,
    chord: Option<String>,
    sources: Option<Vec<PitchValue>>,
    tie_break: Option<TieBreak>,
    queries: Vec<PitchValue>,
    table: bool,
    verbosity: u8,
    help: bool,
}

fn pitch_value(s: &str) -> PitchValue {
    let s = s.trim();
    match s.parse() {
        Ok(p) => PitchValue::Number(p),
        Err(_) => PitchValue::Name(s.to_string()),
    }
}

fn parse_args(args: &[String]) -> Result<CliArgs> {
    let mut cli = CliArgs::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        let mut value = |name: &str| {
            iter.next()
                .cloned()
                .ok_or_else(|| anyhow!("{} requires a value", name))
        };

        match arg.as_str() {
            "--config" => cli.config = Some(value("--config")?),
            "--key" => cli.key = Some(value("--key")?),
            "--scale" => cli.scale = Some(value("--scale")?),
            "--chord" => cli.chord = Some(value("--chord")?),
            "--sources" => {
                let list = value("--sources")?;
                cli.sources = Some(
                    list.split(',')
                        .filter(|s| !s.trim().is_empty())
                        .map(pitch_value)
                        .collect(),
                );
            }
            "--tie-break" => {
                let mode = value("--tie-break")?;
                cli.tie_break = Some(
                    TieBreak::from_str(&mode)
                        .ok_or_else(|| anyhow!("Invalid tie-break mode: {}", mode))?,
                );
            }
            "--fit" => cli.queries.push(pitch_value(&value("--fit")?)),
            "--table" => cli.table = true,
            "-v" => cli.verbosity = cli.verbosity.max(1),
            "-vv" => cli.verbosity = 2,
            "--help" | "-h" => cli.help = true,
            other => bail!("Unknown option: {}", other),
        }
    }

    Ok(cli)
}

/// Merge command line overrides into the fit job
fn build_job(cli: &CliArgs) -> Result<FitFile> {
    let mut job = match &cli.config {
        Some(path) => FitFile::load(path)?,
        None => FitFile::default(),
    };

    let scale_given = cli.key.is_some() || cli.scale.is_some();
    match (&cli.chord, scale_given) {
        (Some(_), true) => bail!("--chord cannot be combined with --key or --scale"),
        (Some(symbol), false) => job.container = ContainerConfig::chord(symbol),
        (None, true) => {
            let mut scale = job.container.scale.clone().unwrap_or_default();
            if let Some(key) = &cli.key {
                scale.root = key.clone();
            }
            if let Some(name) = &cli.scale {
                scale.scale = name.clone();
                scale.intervals = None;
            }
            job.container = ContainerConfig::scale(scale);
        }
        (None, false) => {}
    }

    if let Some(sources) = &cli.sources {
        job.sources = sources.clone();
    }
    if let Some(tie_break) = cli.tie_break {
        job.options.tie_break = tie_break;
    }
    job.queries.extend(cli.queries.iter().cloned());

    Ok(job)
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();

    if args.is_empty() {
        println!("pitchfit - Fit pitches onto a scale or chord");
        println!("Run with --help for usage information");
        return Ok(());
    }

    let cli = parse_args(&args)?;
    if cli.help {
        print_usage();
        return Ok(());
    }

    init_logging(cli.verbosity);

    let job = build_job(&cli)?;
    let (container, fitter) = job.build()?;
    let queries = job.query_pitches()?;

    info!(container = %container, sources = job.sources.len(), "fitter ready");

    if cli.table || queries.is_empty() {
        println!("Fitted table for {}:", container);
        print!("{}", fitter);
    }

    for query in queries {
        let fitted = fitter.fit_pitch(query);
        println!("{:>4} {:<4} -> {:>4} {}", query, pitch_name(query), fitted, pitch_name(fitted));
    }

    Ok(())
}
