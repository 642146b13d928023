/*
 * Rendering of parsed NMEA fields into display strings
 *
 * All functions are pure. A malformed field renders as the "Invalid"
 * marker, it never aborts the surrounding query.
 */

use crate::fields::GsvAggregate;

pub const NO_DATA: &str = "No data";
pub const INVALID: &str = "Invalid";
pub const INVALID_SELECTION: &str = "Invalid selection";

const UNKNOWN: &str = "Unknown";

const KNOTS_TO_KMH: f64 = 1.852;
const KNOTS_TO_MS: f64 = 0.51444444444;

const QUALITY_LABELS: [&str; 9] = [
    "Invalid",
    "GPS",
    "DGPS",
    "PPS",
    "RTK",
    "Float RTK",
    "Estimated",
    "Manual",
    "Simulated",
];

const FIX_TYPE_LABELS: [&str; 4] = ["", "No fix", "2D", "3D"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateFormat {
    Dms,
    Dmm,
    Ddd,
}

impl CoordinateFormat {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "dms" => Some(CoordinateFormat::Dms),
            "dmm" => Some(CoordinateFormat::Dmm),
            "ddd" => Some(CoordinateFormat::Ddd),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Latitude,
    Longitude,
}

/// HHMMSS token -> "HH:MM:SS"
pub fn time(token: &str) -> String {
    match (token.get(0..2), token.get(2..4), token.get(4..6)) {
        (Some(hour), Some(minute), Some(second)) => format!("{}:{}:{}", hour, minute, second),
        _ => String::from(INVALID),
    }
}

/// RMC DDMMYY token -> "YYYY-MM-DD"
///
/// The two digit year is windowed: 80..99 -> 19xx, everything else 20xx.
pub fn date_rmc(token: &str) -> String {
    if token.len() != 6 {
        return String::from(INVALID);
    }
    let (day, month, year) = match (token.get(0..2), token.get(2..4), token.get(4..6)) {
        (Some(day), Some(month), Some(year)) => (day, month, year),
        _ => return String::from(INVALID),
    };
    let century = match year.parse::<u8>() {
        Ok(value) if value >= 80 => "19",
        Ok(_) => "20",
        Err(_) => return String::from(INVALID),
    };
    format!("{}{}-{}-{}", century, year, month, day)
}

/// ZDA day/month/year tokens -> "YYYY-MM-DD", plain concatenation
pub fn date_zda(day: &str, month: &str, year: &str) -> String {
    if day.is_empty() || month.is_empty() || year.is_empty() {
        return String::from(INVALID);
    }
    format!("{}-{}-{}", year, month, day)
}

/// Degree/minutes token plus hemisphere letter in the requested format.
///
/// Longitude tokens carry a 3 digit degree prefix, latitude tokens 2
/// digits, the rest of the token is the minutes value.
pub fn coordinate(
    token: &str,
    hemisphere: &str,
    axis: Axis,
    format: CoordinateFormat,
) -> String {
    if token.is_empty() || hemisphere.is_empty() {
        return String::from(INVALID);
    }

    let width = match axis {
        Axis::Latitude => 2,
        Axis::Longitude => 3,
    };
    let (deg_token, min_token) = match (token.get(..width), token.get(width..)) {
        (Some(deg), Some(min)) => (deg, min),
        _ => return String::from(INVALID),
    };

    let degrees = match deg_token.parse::<f64>() {
        Ok(value) => value,
        Err(_) => return String::from(INVALID),
    };
    let minutes = match min_token.parse::<f64>() {
        Ok(value) => value,
        Err(_) => return String::from(INVALID),
    };

    match format {
        CoordinateFormat::Dms => {
            let seconds = minutes.fract() * 60.0;
            format!(
                "{}{}° {}' {:.2}\"",
                hemisphere, degrees as u32, minutes as u32, seconds
            )
        }
        CoordinateFormat::Dmm => {
            format!("{}{}° {:.4}'", hemisphere, degrees as u32, minutes)
        }
        CoordinateFormat::Ddd => {
            format!("{}{:.6}°", hemisphere, degrees + minutes / 60.0)
        }
    }
}

pub fn speed_kmh(knots: f64) -> String {
    format!("{:.2}", knots * KNOTS_TO_KMH)
}

pub fn speed_ms(knots: f64) -> String {
    format!("{:.2}", knots * KNOTS_TO_MS)
}

/// GGA fix quality code 0..8 -> label
pub fn quality(code: &str) -> &'static str {
    code.parse::<usize>()
        .ok()
        .and_then(|value| QUALITY_LABELS.get(value).copied())
        .unwrap_or(UNKNOWN)
}

/// GSA fix type code, 1 = no fix, 2 = 2D, 3 = 3D
pub fn fix_type(code: &str) -> &'static str {
    code.parse::<usize>()
        .ok()
        .and_then(|value| FIX_TYPE_LABELS.get(value).copied())
        .unwrap_or(UNKNOWN)
}

/// RMC status letter, "A" is the only valid state
pub fn status(token: &str) -> &'static str {
    if token == "A" {
        "Active"
    } else {
        "Invalid"
    }
}

/// Multi-line report, total count first, one line per satellite
pub fn satellite_report(aggregate: &GsvAggregate) -> String {
    let mut report = format!("Satellites in view: {}", aggregate.in_view);
    for satellite in &aggregate.satellites {
        report.push_str(&format!(
            "\nPRN {}: elevation {}°, azimuth {}°, SNR {}",
            satellite.prn,
            or_dash(satellite.elevation),
            or_dash(satellite.azimuth),
            or_dash(satellite.snr)
        ));
    }
    report
}

fn or_dash(token: &str) -> &str {
    if token.is_empty() {
        "-"
    } else {
        token
    }
}
