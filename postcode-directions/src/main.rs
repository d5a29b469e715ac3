use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use postcode_directions::config::Settings;
use postcode_directions::directions::{DirectionAggregator, FixedIntervalPacer, ReverseGeocoder};
use postcode_directions::domain::format_timestamp;
use postcode_directions::maps::MapsClient;
use postcode_directions::table::{
    DirectionsWriter, GeocodeWriter, read_coordinates_path, read_pairs_path,
};

#[derive(Debug, Parser)]
#[command(name = "postcode-directions")]
#[command(about = "Distances and journey times between UK postcodes")]
struct Cli {
    /// TOML settings file; flags override its values
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    #[arg(long, env = "MAPS_API_KEY", hide_env_values = true, global = true)]
    api_key: Option<String>,

    /// Maps API base URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Pause after every request, in milliseconds (at least 500)
    #[arg(long, global = true)]
    request_delay_ms: Option<u64>,

    /// Written in place of missing values
    #[arg(long, global = true)]
    na_token: Option<String>,

    #[arg(short = 'i', long, global = true)]
    input: Option<PathBuf>,

    #[arg(short = 'o', long, global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Measure every origin/destination pair in a CSV file
    Directions(DirectionsArgs),
    /// Look up the postcodes around each coordinate in a CSV file
    ReverseGeocode(GeocodeArgs),
}

#[derive(Debug, Args)]
struct DirectionsArgs {
    /// Local departure time, HH:MM:SS
    #[arg(long)]
    departure_time: Option<String>,

    /// Departure weekday, by name or number (0 = Monday)
    #[arg(long)]
    weekday: Option<String>,

    #[arg(long)]
    timezone: Option<String>,

    /// Raw epoch seconds or "now", instead of the next weekday
    #[arg(long)]
    departure_epoch: Option<String>,

    /// Waypoint cells with this value are ignored
    #[arg(long)]
    na_marker: Option<String>,
}

#[derive(Debug, Args)]
struct GeocodeArgs {
    /// Identifier column of the input
    #[arg(long)]
    id_column: Option<String>,
}

impl Cli {
    /// Layer command-line values over `settings`.
    fn apply(&self, settings: &mut Settings) {
        let Cli {
            api_key,
            base_url,
            timeout,
            request_delay_ms,
            na_token,
            input,
            output,
            ..
        } = self;

        if let Some(key) = api_key {
            settings.api.key = Some(key.clone());
        }
        if let Some(url) = base_url {
            settings.api.base_url = Some(url.clone());
        }
        if let Some(secs) = timeout {
            settings.api.timeout_secs = *secs;
        }
        if let Some(ms) = request_delay_ms {
            settings.requests.delay_ms = *ms;
        }
        if let Some(token) = na_token {
            settings.output.na_token = token.clone();
        }
        if let Some(path) = input {
            settings.files.input = Some(path.clone());
        }
        if let Some(path) = output {
            settings.files.output = Some(path.clone());
        }

        match &self.command {
            Command::Directions(args) => {
                if let Some(time) = &args.departure_time {
                    settings.departure.time_of_day = time.clone();
                }
                if let Some(weekday) = &args.weekday {
                    settings.departure.weekday = weekday.clone();
                }
                if let Some(tz) = &args.timezone {
                    settings.departure.timezone = tz.clone();
                }
                if let Some(epoch) = &args.departure_epoch {
                    settings.departure.epoch = Some(epoch.clone());
                }
                if let Some(marker) = &args.na_marker {
                    settings.files.na_marker = marker.clone();
                }
            }
            Command::ReverseGeocode(args) => {
                if let Some(column) = &args.id_column {
                    settings.files.id_column = column.clone();
                }
            }
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut settings = match &cli.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    cli.apply(&mut settings);

    match cli.command {
        Command::Directions(_) => run_directions(&settings).await,
        Command::ReverseGeocode(_) => run_reverse_geocode(&settings).await,
    }
}

async fn run_directions(settings: &Settings) -> anyhow::Result<()> {
    let input = settings
        .files
        .input
        .as_deref()
        .context("no input file (use --input or [files] input)")?;
    let output = settings
        .files
        .output
        .as_deref()
        .context("no output file (use --output or [files] output)")?;

    let departure = settings.departure()?;
    let tz = settings.timezone()?;
    let departure_time = departure.resolve(Utc::now());
    info!(
        departure_time,
        local = %format_timestamp(departure_time, tz),
        "Transit departure time"
    );

    let pairs = read_pairs_path(input, &settings.files.na_marker)
        .with_context(|| format!("failed to read {}", input.display()))?;

    let client = MapsClient::new(settings.maps_config()?).context("failed to build maps client")?;
    let pacer = FixedIntervalPacer::new(settings.request_delay());
    let aggregator = DirectionAggregator::new(&client, &pacer);

    let mut writer = DirectionsWriter::create(output, settings.output.na_token.as_str())
        .with_context(|| format!("failed to create {}", output.display()))?;

    let total = pairs.len();
    for (index, pair) in pairs.iter().enumerate() {
        info!("Processing id {} ({} of {})", pair.id, index + 1, total);
        let record = aggregator.aggregate(pair, Some(departure_time)).await;
        writer.write(&record)?;
        writer.flush()?;
    }

    info!(rows = total, output = %output.display(), "Directions written");
    Ok(())
}

async fn run_reverse_geocode(settings: &Settings) -> anyhow::Result<()> {
    let input = settings
        .files
        .input
        .as_deref()
        .context("no input file (use --input or [files] input)")?;
    let output = settings
        .files
        .output
        .as_deref()
        .context("no output file (use --output or [files] output)")?;
    let id_column = settings.files.id_column.as_str();

    let coordinates = read_coordinates_path(input, id_column)
        .with_context(|| format!("failed to read {}", input.display()))?;

    let client = MapsClient::new(settings.maps_config()?).context("failed to build maps client")?;
    let pacer = FixedIntervalPacer::new(settings.request_delay());
    let geocoder = ReverseGeocoder::new(&client, &pacer);

    let mut writer = GeocodeWriter::create(output, id_column, settings.output.na_token.as_str())
        .with_context(|| format!("failed to create {}", output.display()))?;

    let total = coordinates.len();
    for (index, coordinate) in coordinates.iter().enumerate() {
        info!("Processing id {} ({} of {})", coordinate.id, index + 1, total);
        let postcodes = geocoder.reverse(coordinate.lat, coordinate.lng).await;
        writer.write(&coordinate.id, coordinate.lat, coordinate.lng, &postcodes)?;
        writer.flush()?;
    }

    info!(rows = total, output = %output.display(), "Postcodes written");
    Ok(())
}
