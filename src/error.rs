use std::error::Error as StdError;
use std::fmt;

#[derive(Debug)]
pub enum Error {
    SerialPortNotFound,
    SerialPortConfigFailed,
    SerialPortReadFailed,
    BaudRateDetectionFailed,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::SerialPortNotFound => f.write_str("serial port not found"),
            Error::SerialPortConfigFailed => f.write_str("failed to configure serial port"),
            Error::SerialPortReadFailed => f.write_str("failed to read from serial port"),
            Error::BaudRateDetectionFailed => f.write_str("failed to detect current baudrate"),
        }
    }
}

impl StdError for Error {}
