use std::io::prelude::*;
use std::io::ErrorKind;
use std::time::Duration;
use std::time::Instant;

use log::info;
use serial::prelude::*;

use crate::error::Error;
use crate::gnss_info::GnssInfo;
use crate::parser::Parser;

pub struct ServerTty {
    device_name: String,
    parser: Parser,
    serial_port: Option<serial::SystemPort>,
}

impl ServerTty {
    pub fn new(device_name: &str) -> Self {
        Self {
            device_name: String::from(device_name),
            parser: Parser::new(),
            serial_port: None,
        }
    }

    /// Tries the usual receiver bitrates until NMEA traffic is seen
    pub fn detect_baudrate(&mut self) -> Result<usize, Error> {
        const BITRATES: [usize; 2] = [115200, 9600];

        for baud in BITRATES.iter() {
            info!("checking {} bps", baud);
            self.open(*baud)?;
            if self.scan() {
                return Ok(*baud);
            }
            info!("bitrate {} not working", baud);
        }

        Err(Error::BaudRateDetectionFailed)
    }

    pub fn open(&mut self, bitrate: usize) -> Result<(), Error> {
        info!("opening {} with {} bps", self.device_name, bitrate);

        let mut port = match serial::open(&self.device_name) {
            Ok(port) => port,
            Err(_) => return Err(Error::SerialPortNotFound),
        };

        let settings = serial::PortSettings {
            baud_rate: serial::BaudRate::from_speed(bitrate),
            char_size: serial::Bits8,
            parity: serial::ParityNone,
            stop_bits: serial::Stop1,
            flow_control: serial::FlowNone,
        };

        if port.configure(&settings).is_err() {
            return Err(Error::SerialPortConfigFailed);
        }
        if port.set_timeout(Duration::from_millis(100)).is_err() {
            return Err(Error::SerialPortConfigFailed);
        }

        self.serial_port = Some(port);
        Ok(())
    }

    /// Reads pending receiver data once and feeds every complete
    /// sentence into the cache. Returns the number of sentences ingested.
    pub fn poll_into(&mut self, info: &mut GnssInfo) -> Result<usize, Error> {
        let mut read_buffer = [0u8; 1024];
        let bytes_read = match self.serial_port.as_mut() {
            Some(port) => match port.read(&mut read_buffer[..]) {
                Ok(bytes_read) => bytes_read,
                Err(ref e) if e.kind() == ErrorKind::TimedOut => 0,
                Err(_) => return Err(Error::SerialPortReadFailed),
            },
            None => return Err(Error::SerialPortNotFound),
        };

        self.parser.process(&read_buffer[..bytes_read]);

        let mut count = 0;
        while let Some(sentence) = self.parser.sentence() {
            info.ingest_line(&sentence);
            count += 1;
        }
        Ok(count)
    }

    // Listens for up to two seconds, a bitrate is accepted once two
    // valid frames came in
    fn scan(&mut self) -> bool {
        let start = Instant::now();
        let frames = self.parser.frames_received();

        while start.elapsed().as_millis() < 2000 {
            let mut read_buffer = [0u8; 1024];
            let bytes_read = match self.serial_port.as_mut() {
                Some(port) => match port.read(&mut read_buffer[..]) {
                    Ok(bytes_read) => bytes_read,
                    Err(_) => 0,
                },
                None => return false,
            };
            self.parser.process(&read_buffer[..bytes_read]);

            // scan only counts frames, drop the assembled sentences
            while self.parser.sentence().is_some() {}

            if self.parser.frames_received() - frames >= 2 {
                info!("NMEA frames received");
                return true;
            }
        }
        false
    }
}
