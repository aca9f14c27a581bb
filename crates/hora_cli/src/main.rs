use std::path::PathBuf;

use chrono::{DateTime, Datelike, Duration, FixedOffset, Local, NaiveDate, TimeZone};
use clap::{Parser, Subcommand};
use hora_base::{
    BinauralTone, GeoLocation, Planet, SolarEvents, compute_solar_events, day_ruler_for_date,
    utc_offset_from_minutes,
};
use hora_config::HoraConfig;
use hora_search::{
    NoaaSource, PlanetaryHour, SolarEventCache, current_hour_with_day, planetary_day,
};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hora", about = "Classical planetary hours")]
struct Cli {
    /// Path to config file (default: $HORA_CONFIG or <config_dir>/hora/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,
    /// Debug logging on stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sunrise and sunset for a date and location
    Sun {
        /// Civil date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        /// Latitude in degrees (north positive)
        #[arg(long, allow_hyphen_values = true)]
        lat: Option<f64>,
        /// Longitude in degrees (east positive)
        #[arg(long, allow_hyphen_values = true)]
        lon: Option<f64>,
        /// UTC offset (+HH:MM, -HH:MM or Z; default: system offset on that date)
        #[arg(long, allow_hyphen_values = true)]
        offset: Option<String>,
    },
    /// Ruler of the weekday
    DayRuler {
        /// Civil date (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<String>,
    },
    /// All 24 planetary hours of a date
    Hours {
        /// Civil date of the opening sunrise (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        /// Latitude in degrees (north positive)
        #[arg(long, allow_hyphen_values = true)]
        lat: Option<f64>,
        /// Longitude in degrees (east positive)
        #[arg(long, allow_hyphen_values = true)]
        lon: Option<f64>,
        /// UTC offset (+HH:MM, -HH:MM or Z; default: system offset on that date)
        #[arg(long, allow_hyphen_values = true)]
        offset: Option<String>,
    },
    /// The planetary hour containing an instant
    Now {
        /// Instant (RFC 3339, default now); its offset is used for the day
        #[arg(long)]
        at: Option<String>,
        /// Latitude in degrees (north positive)
        #[arg(long, allow_hyphen_values = true)]
        lat: Option<f64>,
        /// Longitude in degrees (east positive)
        #[arg(long, allow_hyphen_values = true)]
        lon: Option<f64>,
    },
    /// Binaural tone frequencies for a planet
    Tone {
        /// Planet name (Sun, Moon, Mars, Mercury, Jupiter, Venus, Saturn)
        #[arg(long)]
        planet: String,
        /// Beat frequency in Hz (default from config)
        #[arg(long)]
        beat: Option<f64>,
        /// Volume 0.0-1.0 (default from config)
        #[arg(long)]
        volume: Option<f64>,
    },
}

#[derive(Serialize)]
struct DayRulerOutput {
    date: NaiveDate,
    weekday: String,
    ruler: Planet,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn fail(msg: impl std::fmt::Display) -> ! {
    eprintln!("Error: {msg}");
    std::process::exit(1);
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| format!("expected YYYY-MM-DD, got {s}: {e}"))
}

/// Parse `+HH:MM`, `-HH:MM`, `+HH`, `Z` or `UTC`.
fn parse_offset(s: &str) -> Result<FixedOffset, String> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("z") || s.eq_ignore_ascii_case("utc") {
        return utc_offset_from_minutes(0).map_err(|e| e.to_string());
    }
    let (sign, rest) = match s.as_bytes().first() {
        Some(b'+') => (1, &s[1..]),
        Some(b'-') => (-1, &s[1..]),
        _ => return Err(format!("offset must start with + or -, got {s}")),
    };
    let (hh, mm) = rest.split_once(':').unwrap_or((rest, "0"));
    let digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
    if !digits(hh) || !digits(mm) {
        return Err(format!("invalid offset: {s}"));
    }
    let hours: i32 = hh.parse().map_err(|_| format!("invalid offset hours: {s}"))?;
    let minutes: i32 = mm.parse().map_err(|_| format!("invalid offset minutes: {s}"))?;
    if !(0..60).contains(&minutes) {
        return Err(format!("invalid offset minutes: {s}"));
    }
    let total = hours
        .checked_mul(60)
        .and_then(|m| m.checked_add(minutes))
        .and_then(|m| m.checked_mul(sign))
        .ok_or_else(|| format!("offset out of range: {s}"))?;
    utc_offset_from_minutes(total).map_err(|e| e.to_string())
}

/// System UTC offset in effect at local noon on `date`.
fn local_offset_on(date: NaiveDate) -> FixedOffset {
    date.and_hms_opt(12, 0, 0)
        .and_then(|noon| Local.from_local_datetime(&noon).earliest())
        .map(|dt| *dt.offset())
        .unwrap_or_else(|| *Local::now().offset())
}

fn require_date(s: &str) -> NaiveDate {
    parse_date(s).unwrap_or_else(|e| fail(e))
}

fn require_offset(arg: Option<&str>, date: NaiveDate) -> FixedOffset {
    match arg {
        Some(s) => parse_offset(s).unwrap_or_else(|e| fail(e)),
        None => local_offset_on(date),
    }
}

/// Flags take precedence over `[location]`.
fn require_location(lat: Option<f64>, lon: Option<f64>, config: &HoraConfig) -> GeoLocation {
    let lat = lat.or(config.location.latitude);
    let lon = lon.or(config.location.longitude);
    match (lat, lon) {
        (Some(lat), Some(lon)) => GeoLocation::new(lat, lon).unwrap_or_else(|e| fail(e)),
        _ => fail("no location: pass --lat and --lon or set [location] in the config file"),
    }
}

fn load_source(config: &HoraConfig) -> SolarEventCache<NoaaSource> {
    SolarEventCache::new(NoaaSource::new(config.riseset_config()), config.cache_config())
        .unwrap_or_else(|e| fail(e))
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => fail(e),
    }
}

fn format_duration(d: Duration) -> String {
    let minutes = d.num_minutes();
    format!("{}h {:02}m", minutes / 60, minutes % 60)
}

fn format_hour(h: &PlanetaryHour) -> String {
    let half = if h.is_day { "day" } else { "night" };
    format!(
        "{:>2}  {:<5} {:<3} {:<8} {} - {}",
        h.index + 1,
        half,
        h.ruler.symbol(),
        h.ruler.name(),
        h.start.format("%Y-%m-%d %H:%M:%S"),
        h.end.format("%Y-%m-%d %H:%M:%S"),
    )
}

fn print_events(date: NaiveDate, location: &GeoLocation, events: &SolarEvents) {
    println!(
        "Sun for {} at {:.4} N, {:.4} E:",
        date,
        location.latitude_deg(),
        location.longitude_deg()
    );
    println!("  Sunrise:    {}", events.sunrise.format("%Y-%m-%d %H:%M %:z"));
    println!("  Sunset:     {}", events.sunset.format("%Y-%m-%d %H:%M %:z"));
    println!("  Day length: {}", format_duration(events.day_length()));
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = HoraConfig::load_or_default(cli.config.as_deref()).unwrap_or_else(|e| fail(e));
    debug!(?config, "configuration");

    match cli.command {
        Commands::Sun {
            date,
            lat,
            lon,
            offset,
        } => {
            let date = require_date(&date);
            let offset = require_offset(offset.as_deref(), date);
            let location = require_location(lat, lon, &config);
            let events = compute_solar_events(&location, date, offset, &config.riseset_config())
                .unwrap_or_else(|e| fail(e));
            if cli.json {
                print_json(&events);
            } else {
                print_events(date, &location, &events);
            }
        }

        Commands::DayRuler { date } => {
            let date = match date {
                Some(s) => require_date(&s),
                None => Local::now().date_naive(),
            };
            let ruler = day_ruler_for_date(date);
            if cli.json {
                print_json(&DayRulerOutput {
                    date,
                    weekday: date.weekday().to_string(),
                    ruler,
                });
            } else {
                println!("{} ({}): {} {}", date, date.weekday(), ruler.symbol(), ruler.name());
            }
        }

        Commands::Hours {
            date,
            lat,
            lon,
            offset,
        } => {
            let date = require_date(&date);
            let offset = require_offset(offset.as_deref(), date);
            let location = require_location(lat, lon, &config);
            let source = load_source(&config);
            let day = planetary_day(&source, &location, date, offset).unwrap_or_else(|e| fail(e));
            if cli.json {
                print_json(&day);
            } else {
                println!(
                    "Planetary hours for {} ({}), day ruler {}:",
                    day.date,
                    day.date.weekday(),
                    day.day_ruler
                );
                for h in &day.hours {
                    println!("  {}", format_hour(h));
                }
            }
        }

        Commands::Now { at, lat, lon } => {
            let now: DateTime<FixedOffset> = match at {
                Some(s) => DateTime::parse_from_rfc3339(s.trim())
                    .unwrap_or_else(|e| fail(format!("expected RFC 3339 instant, got {s}: {e}"))),
                None => Local::now().fixed_offset(),
            };
            let location = require_location(lat, lon, &config);
            let source = load_source(&config);
            let found = current_hour_with_day(&source, &location, now).unwrap_or_else(|e| fail(e));
            debug!(stats = ?source.stats(), "solar event cache");
            if cli.json {
                print_json(&found);
            } else {
                let h = &found.hour;
                let half = if h.is_day { "day" } else { "night" };
                println!(
                    "Hour: {} {} ({} hour {} of 12)",
                    h.ruler.symbol(),
                    h.ruler.name(),
                    half,
                    h.ordinal_in_half()
                );
                println!("  Start: {}", h.start.format("%Y-%m-%d %H:%M:%S %:z"));
                println!("  End:   {}", h.end.format("%Y-%m-%d %H:%M:%S %:z"));
                println!(
                    "Day ruler: {} {} ({}, {})",
                    found.day.day_ruler.symbol(),
                    found.day.day_ruler.name(),
                    found.day.date,
                    found.day.date.weekday()
                );
            }
        }

        Commands::Tone {
            planet,
            beat,
            volume,
        } => {
            let planet: Planet = planet.parse().unwrap_or_else(|e| fail(e));
            let beat = beat.unwrap_or(config.tone.binaural_beat_hz);
            let volume = volume.unwrap_or(config.tone.volume);
            let tone = BinauralTone::new(planet, beat, volume).unwrap_or_else(|e| fail(e));
            if cli.json {
                print_json(&tone);
            } else {
                println!("{} {} ({:.2} Hz)", planet.symbol(), planet.name(), planet.frequency_hz());
                println!("  Left:   {:.2} Hz", tone.left_hz);
                println!("  Right:  {:.2} Hz", tone.right_hz);
                println!("  Beat:   {:.2} Hz", tone.beat_hz());
                println!("  Volume: {:.2}", tone.volume);
            }
        }
    }
}
