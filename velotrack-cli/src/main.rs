use std::fs::File;
use std::io::BufWriter;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;

use velotrack::chart::{classification_spans, elevation_chart};
use velotrack::classify::{SURFACE, TRAFFIC};
use velotrack::insert::insert_point;
use velotrack::metrics::TrackSummary;
use velotrack::routing::{Format, Profile, RouteRequest};
use velotrack::track::Track;
use velotrack::weather::{weather_sample_points, WeatherRequest};
use velotrack::{Config, Coordinate};
use velotrack_cli::debug_geojson;

#[derive(Parser)]
struct Args {
    /// Path to a JSON file overriding the default configuration
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print lengths, elevation extremes and surface/traffic breakdowns of a BRouter response
    Summary {
        /// Path to a BRouter GeoJSON response
        #[arg(long)]
        input: String,
    },
    /// Insert a point into a route file and print the new route
    Insert {
        /// Path to a JSON list of `[lon, lat, label, direct]` points
        #[arg(long)]
        route: String,
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long)]
        label: Option<String>,
        /// Reach this point in a straight line
        #[arg(long)]
        direct: bool,
    },
    /// Print chart geometry for a canvas
    Chart {
        #[arg(long)]
        input: String,
        #[arg(long, value_enum, default_value_t = ChartKind::Elevation)]
        kind: ChartKind,
        #[arg(long, default_value_t = 800.0)]
        width: f64,
        #[arg(long, default_value_t = 200.0)]
        height: f64,
    },
    /// Print the BRouter request URL for a route file
    RouteUrl {
        #[arg(long)]
        route: String,
        /// Overrides the configured profile
        #[arg(long, value_enum)]
        profile: Option<CliProfile>,
        #[arg(long)]
        gpx: bool,
    },
    /// Print one forecast URL per weather sample point along a track
    WeatherUrls {
        #[arg(long)]
        input: String,
        /// RFC 3339 start time; defaults to now
        #[arg(long)]
        start: Option<String>,
    },
    /// Write the track and its decoded samples as GeoJSON
    DebugGeojson {
        #[arg(long)]
        input: String,
        #[arg(long, default_value = "debug.geojson")]
        output: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ChartKind {
    Elevation,
    Surface,
    Traffic,
}

#[derive(Clone, Copy, ValueEnum)]
enum CliProfile {
    Trekking,
    Gravel,
    FastBike,
    FastBikeVeryLowTraffic,
}

impl From<CliProfile> for Profile {
    fn from(x: CliProfile) -> Self {
        match x {
            CliProfile::Trekking => Profile::Trekking,
            CliProfile::Gravel => Profile::Gravel,
            CliProfile::FastBike => Profile::FastBike,
            CliProfile::FastBikeVeryLowTraffic => Profile::FastBikeVeryLowTraffic,
        }
    }
}

fn main() -> Result<()> {
    simple_logger::init_with_level(log::Level::Info)?;
    let args = Args::parse();
    let config = match args.config {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(&path)?)
            .with_context(|| format!("reading config {path}"))?,
        None => Config::default(),
    };

    match args.command {
        Command::Summary { input } => {
            let track = read_track(&input)?;
            println!(
                "{}",
                serde_json::to_string_pretty(&TrackSummary::new(&track))?
            );
        }
        Command::Insert {
            route,
            lon,
            lat,
            label,
            direct,
        } => {
            let route = read_route(&route)?;
            let candidate = Coordinate {
                lon,
                lat,
                label,
                direct,
            };
            let result = insert_point(candidate, &route)?;
            println!("{}", serde_json::to_string(&result)?);
        }
        Command::Chart {
            input,
            kind,
            width,
            height,
        } => {
            let track = read_track(&input)?;
            let json = match kind {
                ChartKind::Elevation => serde_json::to_string_pretty(&elevation_chart(
                    &track.samples,
                    track.track_length,
                    width,
                    height,
                ))?,
                ChartKind::Surface => serde_json::to_string_pretty(&classification_spans(
                    &track.samples,
                    &SURFACE,
                    track.track_length,
                    width,
                ))?,
                ChartKind::Traffic => serde_json::to_string_pretty(&classification_spans(
                    &track.samples,
                    &TRAFFIC,
                    track.track_length,
                    width,
                ))?,
            };
            println!("{json}");
        }
        Command::RouteUrl {
            route,
            profile,
            gpx,
        } => {
            let request = RouteRequest {
                points: read_route(&route)?,
                profile: profile.map(Profile::from).unwrap_or(config.profile),
                format: if gpx { Format::Gpx } else { Format::GeoJson },
            };
            println!("{}", request.url(&config.routing_url)?);
        }
        Command::WeatherUrls { input, start } => {
            let start = match start {
                Some(x) => DateTime::parse_from_rfc3339(&x)?.with_timezone(&Utc),
                None => Utc::now(),
            };
            let track = read_track(&input)?;
            let points = weather_sample_points(
                &track.line,
                track.track_length,
                config.pace_meters_per_hour,
                start,
            )?;
            info!("{} weather points along the track", points.len());
            for pt in &points {
                println!(
                    "{}",
                    WeatherRequest::for_point(pt)?.url(&config.weather_url)
                );
            }
        }
        Command::DebugGeojson { input, output } => {
            let track = read_track(&input)?;
            let gj = debug_geojson(&track)?;
            let output = BufWriter::new(File::create(output)?);
            serde_json::to_writer_pretty(output, &gj)?;
        }
    }
    Ok(())
}

fn read_track(path: &str) -> Result<Track> {
    info!("Reading {path}");
    let track = Track::from_geojson_str(&std::fs::read_to_string(path)?)
        .with_context(|| format!("decoding {path}"))?;
    info!(
        "{} samples over {} meters",
        track.samples.len(),
        track.track_length
    );
    Ok(track)
}

fn read_route(path: &str) -> Result<Vec<Coordinate>> {
    let route: Vec<Coordinate> = serde_json::from_str(&std::fs::read_to_string(path)?)
        .with_context(|| format!("reading route {path}"))?;
    if route.iter().any(|pt| !pt.lon.is_finite() || !pt.lat.is_finite()) {
        bail!("{path} has a point with a non-finite coordinate");
    }
    Ok(route)
}
