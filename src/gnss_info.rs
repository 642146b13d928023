/*
 * Query facade over the sentence cache
 *
 * Every query is a pure projection: pick the cached sentence(s), run the
 * field accessors and formatters, return a display string. If the
 * required sentence was never received the "No data" sentinel is
 * returned without touching parser or formatter.
 */

use crate::fields::{GgaFields, GsaFields, GsvAggregate, RmcFields, ZdaFields};
use crate::format;
use crate::format::{Axis, CoordinateFormat};
use crate::frame;
use crate::sentence::{SentenceCache, SentenceType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeDate {
    Date,
    Time,
    DateTime,
}

impl TimeDate {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "date" => Some(TimeDate::Date),
            "time" => Some(TimeDate::Time),
            "datetime" => Some(TimeDate::DateTime),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Latitude,
    Longitude,
    LatLon,
    Altitude,
    All,
}

impl Position {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "lat" => Some(Position::Latitude),
            "lon" => Some(Position::Longitude),
            "latlon" => Some(Position::LatLon),
            "alt" => Some(Position::Altitude),
            "all" => Some(Position::All),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    SpeedKmh,
    SpeedMs,
    Course,
    All,
}

impl Movement {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "speed-kmh" => Some(Movement::SpeedKmh),
            "speed-ms" => Some(Movement::SpeedMs),
            "course" => Some(Movement::Course),
            "all" => Some(Movement::All),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Detail {
    UsedSatellites,
    Quality,
    Hdop,
    SignalIntegrity,
    Status,
    SatelliteIds,
    SatellitesInView,
    AllDetails,
}

impl Detail {
    /// Selector as it appears on the command line. Unknown names map to
    /// None, the caller renders the "Invalid selection" sentinel.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "used-satellites" => Some(Detail::UsedSatellites),
            "quality" => Some(Detail::Quality),
            "hdop" => Some(Detail::Hdop),
            "signal-integrity" => Some(Detail::SignalIntegrity),
            "status" => Some(Detail::Status),
            "satellite-ids" => Some(Detail::SatelliteIds),
            "satellites-in-view" => Some(Detail::SatellitesInView),
            "all" => Some(Detail::AllDetails),
            _ => None,
        }
    }
}

/// Speed rendering of the combined movement report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeedUnit {
    Kmh,
    Ms,
    Both,
}

impl SpeedUnit {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "kmh" => Some(SpeedUnit::Kmh),
            "ms" => Some(SpeedUnit::Ms),
            "both" => Some(SpeedUnit::Both),
            _ => None,
        }
    }
}

pub struct GnssInfo {
    cache: SentenceCache,
    speed_unit: SpeedUnit,
}

impl GnssInfo {
    pub fn new() -> Self {
        Self::with_units(SpeedUnit::Kmh)
    }

    pub fn with_units(speed_unit: SpeedUnit) -> Self {
        Self {
            cache: SentenceCache::new(),
            speed_unit,
        }
    }

    /// Transport callback for one received line: envelope/checksum
    /// check first, corrupted lines are dropped without a trace
    pub fn ingest_line(&mut self, line: &str) {
        let line = line.trim_end();
        if frame::validate(line) {
            self.cache.ingest(line);
        }
    }

    /// Time/date from RMC, falling back to ZDA
    pub fn time_and_date(&self, kind: TimeDate) -> String {
        let (time, date) = match self.cache.get(SentenceType::Rmc) {
            Some(sentence) => {
                let fields = RmcFields::new(sentence);
                (
                    format::time(fields.time().unwrap_or("")),
                    format::date_rmc(fields.date().unwrap_or("")),
                )
            }
            None => match self.cache.get(SentenceType::Zda) {
                Some(sentence) => {
                    let fields = ZdaFields::new(sentence);
                    (
                        format::time(fields.time().unwrap_or("")),
                        format::date_zda(
                            fields.day().unwrap_or(""),
                            fields.month().unwrap_or(""),
                            fields.year().unwrap_or(""),
                        ),
                    )
                }
                None => return String::from(format::NO_DATA),
            },
        };

        match kind {
            TimeDate::Date => date,
            TimeDate::Time => time,
            TimeDate::DateTime => format!("{} {}", date, time),
        }
    }

    /// Position from GGA in the requested coordinate format
    pub fn position(&self, component: Position, format: CoordinateFormat) -> String {
        let sentence = match self.cache.get(SentenceType::Gga) {
            Some(sentence) => sentence,
            None => return String::from(format::NO_DATA),
        };
        let fields = GgaFields::new(sentence);

        let lat = format::coordinate(
            fields.latitude().unwrap_or(""),
            fields.latitude_dir().unwrap_or(""),
            Axis::Latitude,
            format,
        );
        let lon = format::coordinate(
            fields.longitude().unwrap_or(""),
            fields.longitude_dir().unwrap_or(""),
            Axis::Longitude,
            format,
        );
        let alt = match fields.altitude() {
            Some(altitude) => format!("{}{}", altitude, fields.altitude_unit().unwrap_or("")),
            None => String::from(format::INVALID),
        };

        match component {
            Position::Latitude => lat,
            Position::Longitude => lon,
            Position::LatLon => format!("{}, {}", lat, lon),
            Position::Altitude => alt,
            Position::All => format!("{}, {}, Altitude: {}", lat, lon, alt),
        }
    }

    /// Speed and course from RMC
    pub fn movement(&self, component: Movement) -> String {
        let sentence = match self.cache.get(SentenceType::Rmc) {
            Some(sentence) => sentence,
            None => return String::from(format::NO_DATA),
        };
        let fields = RmcFields::new(sentence);

        let knots = fields.speed_knots();
        let course = fields.course();

        match component {
            Movement::SpeedKmh => match knots {
                Some(knots) => format::speed_kmh(knots),
                None => String::from(format::INVALID),
            },
            Movement::SpeedMs => match knots {
                Some(knots) => format::speed_ms(knots),
                None => String::from(format::INVALID),
            },
            Movement::Course => match course {
                Some(course) => String::from(course),
                None => String::from(format::INVALID),
            },
            Movement::All => {
                let speed = match knots {
                    Some(knots) => match self.speed_unit {
                        SpeedUnit::Kmh => format!("{} km/h", format::speed_kmh(knots)),
                        SpeedUnit::Ms => format!("{} m/s", format::speed_ms(knots)),
                        SpeedUnit::Both => format!(
                            "{} km/h ({} m/s)",
                            format::speed_kmh(knots),
                            format::speed_ms(knots)
                        ),
                    },
                    None => String::from(format::INVALID),
                };
                format!(
                    "Speed: {}, Course: {}°",
                    speed,
                    course.unwrap_or(format::INVALID)
                )
            }
        }
    }

    /// Satellite and quality details from GGA/GSA/GSV/RMC
    pub fn details(&self, item: Detail) -> String {
        match item {
            Detail::UsedSatellites => match self.cache.get(SentenceType::Gga) {
                Some(sentence) => match GgaFields::new(sentence).satellites_used() {
                    Some(count) => String::from(count),
                    None => String::from(format::INVALID),
                },
                None => String::from(format::NO_DATA),
            },
            Detail::Quality => match self.cache.get(SentenceType::Gga) {
                Some(sentence) => {
                    let fields = GgaFields::new(sentence);
                    String::from(format::quality(fields.quality().unwrap_or("")))
                }
                None => String::from(format::NO_DATA),
            },
            Detail::Hdop => match self.cache.get(SentenceType::Gga) {
                Some(sentence) => match GgaFields::new(sentence).hdop() {
                    Some(hdop) => String::from(hdop),
                    None => String::from(format::INVALID),
                },
                None => String::from(format::NO_DATA),
            },
            Detail::SignalIntegrity => match self.cache.get(SentenceType::Gsa) {
                Some(sentence) => {
                    let fields = GsaFields::new(sentence);
                    String::from(format::fix_type(fields.fix_type().unwrap_or("")))
                }
                None => String::from(format::NO_DATA),
            },
            Detail::Status => match self.cache.get(SentenceType::Rmc) {
                Some(sentence) => {
                    let fields = RmcFields::new(sentence);
                    String::from(format::status(fields.status().unwrap_or("")))
                }
                None => String::from(format::NO_DATA),
            },
            Detail::SatelliteIds => match self.cache.get(SentenceType::Gsa) {
                Some(sentence) => {
                    let ids = GsaFields::new(sentence).satellite_ids();
                    if ids.is_empty() {
                        String::from(format::INVALID)
                    } else {
                        ids.join(", ")
                    }
                }
                None => String::from(format::NO_DATA),
            },
            Detail::SatellitesInView => match self.cache.get(SentenceType::Gsv) {
                Some(slot) => format::satellite_report(&GsvAggregate::from_slot(slot)),
                None => String::from(format::NO_DATA),
            },
            Detail::AllDetails => format!(
                "Used satellites: {}\n\
                 Quality: {}\n\
                 HDOP: {}\n\
                 Signal integrity: {}\n\
                 Status: {}\n\
                 Satellite IDs: {}\n\
                 {}",
                self.details(Detail::UsedSatellites),
                self.details(Detail::Quality),
                self.details(Detail::Hdop),
                self.details(Detail::SignalIntegrity),
                self.details(Detail::Status),
                self.details(Detail::SatelliteIds),
                self.details(Detail::SatellitesInView)
            ),
        }
    }

    /// Command line entry point, renders the distinct sentinel for an
    /// unknown selector name
    pub fn details_by_name(&self, name: &str) -> String {
        match Detail::from_name(name) {
            Some(item) => self.details(item),
            None => String::from(format::INVALID_SELECTION),
        }
    }
}
