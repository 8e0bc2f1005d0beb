//! Sky Position Tool
//!
//! Prints the apparent positions of the Sun and planets for a date and,
//! optionally, an observer on Earth.
//!
//! Usage:
//!   cargo run --bin sky_position -- --when 2024-03-20T21:00:00 --lat 48.85 --lon -2.35
//!   cargo run --bin sky_position -- --body mars --json

use chrono::{NaiveDateTime, Utc};
use clap::{ArgAction, Parser};
use solarfield::{Body, CivilDateTime, Ephemeris, SolarSystemObject};

/// Type alias for the error type used throughout this module
type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Sky Position Tool
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Computes apparent positions of the Sun and planets",
    long_about = None
)]
struct Args {
    /// UT date and time as YYYY-MM-DDTHH:MM:SS (defaults to now)
    #[arg(short, long)]
    when: Option<String>,

    /// Observer latitude in degrees, north positive
    #[arg(long, allow_hyphen_values = true, requires = "lon")]
    lat: Option<f64>,

    /// Observer longitude in degrees, west positive
    #[arg(long, allow_hyphen_values = true, requires = "lat")]
    lon: Option<f64>,

    /// Only this body (defaults to every supported body)
    #[arg(short, long)]
    body: Option<Body>,

    /// Solver settings as a JSON file
    #[arg(short, long)]
    settings: Option<String>,

    /// Print JSON instead of a table
    #[arg(long, action = ArgAction::SetTrue)]
    json: bool,
}

fn parse_when(when: Option<&str>) -> Result<CivilDateTime> {
    let naive = match when {
        Some(text) => NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S")?,
        None => Utc::now().naive_utc(),
    };
    Ok(CivilDateTime::from(naive))
}

/// Format an optional angle, or a dash when undefined
fn format_or_dash(value: f64, format: impl Fn(f64) -> String) -> String {
    if value.is_finite() {
        format(value)
    } else {
        "-".to_string()
    }
}

fn format_hms(hours: f64) -> String {
    // Whole hundredths of a second, carried into minutes and hours
    let centiseconds = (hours.rem_euclid(24.0) * 360_000.0).round() as u64 % 8_640_000;
    format!(
        "{:02}h {:02}m {:05.2}s",
        centiseconds / 360_000,
        centiseconds / 6_000 % 60,
        (centiseconds % 6_000) as f64 / 100.0
    )
}

fn format_dms(degrees: f64) -> String {
    let sign = if degrees < 0.0 { '-' } else { '+' };
    let tenths = (degrees.abs() * 36_000.0).round() as u64;
    format!(
        "{}{:02}° {:02}' {:04.1}\"",
        sign,
        tenths / 36_000,
        tenths / 600 % 60,
        (tenths % 600) as f64 / 10.0
    )
}

fn print_table(objects: &[SolarSystemObject]) {
    println!(
        "{:<8} {:>16} {:>15} {:>10} {:>9} {:>9} {:>8}",
        "Body", "RA", "Dec", "Dist (AU)", "Az", "Alt", "Diam '"
    );
    println!("{}", "-".repeat(81));
    for object in objects {
        println!(
            "{:<8} {:>16} {:>15} {:>10} {:>9} {:>9} {:>8}",
            object.body.name(),
            format_or_dash(object.equatorial.ra, format_hms),
            format_or_dash(object.equatorial.dec, format_dms),
            format_or_dash(object.distance, |d| format!("{d:.5}")),
            format_or_dash(object.horizontal.azimuth, |a| format!("{a:.2}")),
            format_or_dash(object.horizontal.altitude, |a| format!("{a:.2}")),
            format_or_dash(object.diameter, |d| format!("{d:.3}")),
        );
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let when = parse_when(args.when.as_deref())?;

    let mut ephemeris = Ephemeris::new();
    if let Some(path) = &args.settings {
        ephemeris = ephemeris.with_settings_json(&std::fs::read_to_string(path)?)?;
    }
    if let (Some(lat), Some(lon)) = (args.lat, args.lon) {
        ephemeris.set_location_on_earth(lat, lon)?;
    }

    let bodies: Vec<Body> = match args.body {
        Some(body) => vec![body],
        None => Body::SUPPORTED
            .into_iter()
            .filter(|body| *body != Body::Earth)
            .collect(),
    };

    let objects: Vec<SolarSystemObject> = bodies
        .into_iter()
        .map(|body| ephemeris.solar_system_object_at(body, &when))
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&objects)?);
        return Ok(());
    }

    let jd = when.to_julian_day();
    println!("Date (UT): {when}");
    println!("Julian Day: {:.6}", jd.jd());
    if ephemeris.observer().is_known() {
        println!(
            "Observer: {:.4}°, {:.4}°  LST {}",
            ephemeris.observer().latitude,
            ephemeris.observer().longitude,
            format_hms(ephemeris.local_sidereal_time(&jd))
        );
    }
    println!();
    print_table(&objects);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use solarfield::coordinates::angle::{dms_to_degrees, hms_to_hours};

    #[test]
    fn test_format_hms() {
        assert_eq!(format_hms(hms_to_hours(21, 4, 41.454)), "21h 04m 41.45s");
        assert_eq!(format_hms(hms_to_hours(1, 59, 59.996)), "02h 00m 00.00s");
        assert_eq!(format_hms(23.999_999_9), "00h 00m 00.00s");
    }

    #[test]
    fn test_format_dms() {
        assert_eq!(format_dms(dms_to_degrees(-18, 53, 16.84)), "-18° 53' 16.8\"");
        assert_eq!(format_dms(dms_to_degrees(10, 59, 59.97)), "+11° 00' 00.0\"");
        assert_eq!(format_dms(-0.5), "-00° 30' 00.0\"");
    }

    #[test]
    fn test_format_or_dash() {
        assert_eq!(format_or_dash(f64::NAN, format_hms), "-");
    }
}
