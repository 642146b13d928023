mod checksum;
mod config_file;
mod error;
mod fields;
mod format;
mod frame;
mod gnss_info;
mod parser;
mod sentence;
mod server_tty;

use std::process;
use std::time::{Duration, Instant};

use chrono::Local;
use clap::{App, Arg};
use log::info;

use crate::config_file::GnssInfoConfig;
use crate::error::Error;
use crate::format::CoordinateFormat;
use crate::gnss_info::{GnssInfo, Movement, Position, SpeedUnit, TimeDate};
use crate::server_tty::ServerTty;

fn main() {
    env_logger::init();

    let matches = App::new("gnss-info")
        .version("0.1.0")
        .about("Reads NMEA-0183 sentences from a GNSS receiver and reports time, position, movement and satellite details")
        .arg(
            Arg::with_name("device")
                .help("serial device the receiver is attached to, e.g. /dev/ttyS3")
                .index(1),
        )
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .takes_value(true)
                .help("configuration file"),
        )
        .arg(
            Arg::with_name("bitrate")
                .short("b")
                .long("bitrate")
                .takes_value(true)
                .help("serial bitrate, autodetected when omitted"),
        )
        .arg(
            Arg::with_name("interval")
                .short("i")
                .long("interval")
                .takes_value(true)
                .help("report interval in seconds, default 5"),
        )
        .arg(
            Arg::with_name("format")
                .short("f")
                .long("format")
                .takes_value(true)
                .help("coordinate format: dms, dmm or ddd"),
        )
        .arg(
            Arg::with_name("units")
                .short("u")
                .long("units")
                .takes_value(true)
                .help("speed units: kmh, ms or both"),
        )
        .arg(
            Arg::with_name("time")
                .long("time")
                .takes_value(true)
                .help("time/date selection: date, time or datetime"),
        )
        .arg(
            Arg::with_name("position")
                .long("position")
                .takes_value(true)
                .help("position selection: lat, lon, latlon, alt or all"),
        )
        .arg(
            Arg::with_name("movement")
                .long("movement")
                .takes_value(true)
                .help("movement selection: speed-kmh, speed-ms, course or all"),
        )
        .arg(
            Arg::with_name("details")
                .short("d")
                .long("details")
                .takes_value(true)
                .help(
                    "details selection: used-satellites, quality, hdop, signal-integrity, \
                     status, satellite-ids, satellites-in-view or all",
                ),
        )
        .get_matches();

    let mut config: GnssInfoConfig = Default::default();
    if let Some(path) = matches.value_of("config") {
        if let Err(e) = config.parse_config(path) {
            eprintln!("{}", e);
            process::exit(1);
        }
    }

    // command line overrides the configuration file
    let device = match matches.value_of("device").map(String::from).or(config.device) {
        Some(device) => device,
        None => {
            eprintln!("no device specified");
            process::exit(1);
        }
    };
    let bitrate = matches
        .value_of("bitrate")
        .and_then(|value| value.parse::<usize>().ok())
        .or(config.bitrate);
    let interval = matches
        .value_of("interval")
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(5);
    let coordinate_format = matches
        .value_of("format")
        .and_then(CoordinateFormat::from_name)
        .or(config.coordinate_format)
        .unwrap_or(CoordinateFormat::Ddd);
    let speed_unit = matches
        .value_of("units")
        .and_then(SpeedUnit::from_name)
        .or(config.speed_unit);

    let report = Report {
        coordinate_format,
        time: matches
            .value_of("time")
            .and_then(TimeDate::from_name)
            .unwrap_or(TimeDate::DateTime),
        position: matches
            .value_of("position")
            .and_then(Position::from_name)
            .unwrap_or(Position::All),
        movement: matches
            .value_of("movement")
            .and_then(Movement::from_name)
            .unwrap_or(Movement::All),
        details: matches.value_of("details").unwrap_or("all").to_string(),
    };

    match run(&device, bitrate, interval, speed_unit, &report) {
        Ok(_) => (),
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    }
}

struct Report {
    coordinate_format: CoordinateFormat,
    time: TimeDate,
    position: Position,
    movement: Movement,
    details: String,
}

fn run(
    device: &str,
    bitrate: Option<usize>,
    interval: u64,
    speed_unit: Option<SpeedUnit>,
    report: &Report,
) -> Result<(), Error> {
    let mut server = ServerTty::new(device);
    let bitrate = match bitrate {
        Some(bitrate) => bitrate,
        None => server.detect_baudrate()?,
    };
    server.open(bitrate)?;
    info!("receiver on {} at {} bps", device, bitrate);

    let mut info = match speed_unit {
        Some(unit) => GnssInfo::with_units(unit),
        None => GnssInfo::new(),
    };
    let mut last_report = Instant::now();
    loop {
        server.poll_into(&mut info)?;

        if last_report.elapsed() >= Duration::from_secs(interval) {
            print_report(&info, report);
            last_report = Instant::now();
        }
    }
}

fn print_report(info: &GnssInfo, report: &Report) {
    println!("--- {} ---", Local::now().format("%Y-%m-%d %H:%M:%S"));
    println!("Time/date: {}", info.time_and_date(report.time));
    println!(
        "Position : {}",
        info.position(report.position, report.coordinate_format)
    );
    println!("Movement : {}", info.movement(report.movement));
    println!("{}", info.details_by_name(&report.details));
}
