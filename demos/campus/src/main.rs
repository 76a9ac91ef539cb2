//! campus — command-line front end for the campus router.
//!
//! Loads a line network (a GeoJSON file or the built-in campus), snaps the
//! query points to it, and prints each route as text, GeoJSON or CSV.
//! With no `--from`/`--to` it tours from the dorms to every other landmark.

mod network;

use std::io;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{info, warn};

use cr_core::{Coordinate, RouterConfig, TravelMode};
use cr_spatial::{load_lines_from_path, routes_to_collection, Route, RouteEngine};

use network::{campus_config, campus_lines, landmark, LANDMARKS};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Geojson,
    Csv,
}

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// GeoJSON file of line features (default: built-in campus network)
    #[arg(short, long)]
    lines: Option<PathBuf>,

    /// Router config as JSON (default: campus speeds)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Travel mode: walking, cycling or driving
    #[arg(short, long, default_value = "walking")]
    mode: TravelMode,

    /// Route in every travel mode, rebuilding the graph between modes
    #[arg(long)]
    all_modes: bool,

    /// Start point as "lon,lat" or a landmark name
    #[arg(long)]
    from: Option<String>,

    /// End point as "lon,lat" or a landmark name
    #[arg(long)]
    to: Option<String>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[arg(short, long)]
    debug: bool,
}

struct Query {
    label: String,
    start: Option<Coordinate>,
    end: Option<Coordinate>,
}

fn parse_point(text: &str) -> Result<Coordinate> {
    if let Some(c) = landmark(text) {
        return Ok(c);
    }
    let Some((lon, lat)) = text.split_once(',') else {
        bail!("'{text}' is neither a landmark nor \"lon,lat\"");
    };
    let lon: f64 = lon.trim().parse().with_context(|| format!("bad longitude in '{text}'"))?;
    let lat: f64 = lat.trim().parse().with_context(|| format!("bad latitude in '{text}'"))?;
    Ok(Coordinate::new(lon, lat))
}

fn build_queries(cli: &Cli) -> Result<Vec<Query>> {
    if cli.from.is_none() && cli.to.is_none() {
        let (_, start) = LANDMARKS[0];
        return Ok(LANDMARKS[1..]
            .iter()
            .map(|&(name, end)| Query {
                label: format!("{} -> {name}", LANDMARKS[0].0),
                start: Some(start.into()),
                end: Some(end.into()),
            })
            .collect());
    }

    let start = cli.from.as_deref().map(parse_point).transpose()?;
    let end = cli.to.as_deref().map(parse_point).transpose()?;
    let label = format!(
        "{} -> {}",
        cli.from.as_deref().unwrap_or("?"),
        cli.to.as_deref().unwrap_or("?")
    );
    Ok(vec![Query { label, start, end }])
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_writer(io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => RouterConfig::from_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => campus_config(),
    };
    let lines = match &cli.lines {
        Some(path) => load_lines_from_path(path)
            .with_context(|| format!("loading lines {}", path.display()))?,
        None => campus_lines(),
    };
    let queries = build_queries(&cli)?;

    // 1. Build the graph for the first mode.
    let t0 = Instant::now();
    let engine = RouteEngine::new(config, cli.mode)?;
    engine.set_lines(lines);
    let graph = engine.graph();
    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        elapsed_ms = t0.elapsed().as_millis() as u64,
        "network ready"
    );

    // 2. Route every query in every requested mode.
    let modes: Vec<TravelMode> = if cli.all_modes { TravelMode::ALL.to_vec() } else { vec![cli.mode] };
    let single = queries.len() == 1 && modes.len() == 1;

    let mut routes: Vec<(String, Route)> = Vec::new();
    for mode in modes {
        engine.set_mode(mode);
        for q in &queries {
            match engine.route(q.start, q.end) {
                Ok(route) => routes.push((q.label.clone(), route)),
                Err(e) if !single => warn!(query = %q.label, %mode, error = %e, "no route"),
                Err(e) => return Err(e).with_context(|| format!("routing {}", q.label)),
            }
        }
    }

    // 3. Report.
    match cli.format {
        OutputFormat::Text => print_text(&routes),
        OutputFormat::Geojson => {
            let only: Vec<Route> = routes.into_iter().map(|(_, r)| r).collect();
            println!("{}", serde_json::to_string_pretty(&routes_to_collection(&only))?);
        }
        OutputFormat::Csv => write_csv(&routes)?,
    }
    Ok(())
}

fn print_text(routes: &[(String, Route)]) {
    for (label, route) in routes {
        println!(
            "{label:<20} {:<8} {:>8.3} km {:>5} min  ({} points)",
            route.mode.as_str(),
            route.summary.distance_km,
            route.summary.time_minutes,
            route.coords.len()
        );
    }
}

/// One row per path vertex.
fn write_csv(routes: &[(String, Route)]) -> Result<()> {
    let mut w = csv::Writer::from_writer(io::stdout());
    w.write_record(["route", "mode", "seq", "lon", "lat"])?;
    for (label, route) in routes {
        for (seq, c) in route.coords.iter().enumerate() {
            w.write_record([
                label.clone(),
                route.mode.to_string(),
                seq.to_string(),
                format!("{:.7}", c.lon),
                format!("{:.7}", c.lat),
            ])?;
        }
    }
    w.flush()?;
    Ok(())
}
