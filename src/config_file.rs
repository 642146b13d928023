use std::path::Path;

use ini::Ini;
use log::{info, warn};

use crate::format::CoordinateFormat;
use crate::gnss_info::SpeedUnit;

#[derive(Debug, Default)]
pub struct GnssInfoConfig {
    pub device: Option<String>,
    pub bitrate: Option<usize>,
    pub coordinate_format: Option<CoordinateFormat>,
    pub speed_unit: Option<SpeedUnit>,
}

impl GnssInfoConfig {
    pub fn parse_config(&mut self, path: &str) -> Result<(), String> {
        // Check if configfile exists
        let config_exists = Path::new(&path).exists();
        if !config_exists {
            return Err(format!("Configuration file {} not found", path));
        }

        // Import whole file, check for syntax errors
        let conf = match Ini::load_from_file(path) {
            Ok(conf) => conf,
            Err(e) => return Err(format!("Invalid configuration file: {}", e)),
        };

        // Check for version 1 format
        let sec_general = match conf.section(Some("default")) {
            Some(sec) => sec,
            _ => return Err("Invalid configuration file format/version".to_string()),
        };

        let _version = match sec_general.get("version") {
            Some("1") => 1,
            _ => return Err("Invalid configuration file format/version".to_string()),
        };

        let keyname = "device";
        let value = match sec_general.get(keyname) {
            Some("") => { warn!("no value for {} specified, ignoring", keyname); None },
            Some(x) => { info!("using {} for {}", x, keyname); Some(String::from(x)) },
            _ => { info!("key '{}' not defined", keyname); None },
        };
        self.device = value;

        let keyname = "bitrate";
        let valid_args = [9600usize, 115200];
        let value = match sec_general.get(keyname) {
            Some("") => { warn!("no value for {} specified, ignoring", keyname); None },
            Some(x) => {
                match x.parse::<usize>() {
                    Ok(y) if valid_args.contains(&y) => { info!("using {} for {}", x, keyname); Some(y) },
                    Ok(_) | Err(_) => { warn!("invalid value {} for key {}", x, keyname); None },
                }
            },
            _ => { info!("key '{}' not defined", keyname); None },
        };
        self.bitrate = value;

        let sec_output = match conf.section(Some("output")) {
            Some(sec) => sec,
            _ => return Err("Invalid configuration file format/version".to_string()),
        };

        let keyname = "coordinate-format";
        let value = match sec_output.get(keyname) {
            Some("") => { warn!("no value for {} specified, ignoring", keyname); None },
            Some(x) => {
                match CoordinateFormat::from_name(x) {
                    Some(y) => { info!("using {} for {}", x, keyname); Some(y) },
                    None => { warn!("invalid value {} for key {}", x, keyname); None },
                }
            },
            _ => { info!("key '{}' not defined", keyname); None },
        };
        self.coordinate_format = value;

        let keyname = "speed-unit";
        let value = match sec_output.get(keyname) {
            Some("") => { warn!("no value for {} specified, ignoring", keyname); None },
            Some(x) => {
                match SpeedUnit::from_name(x) {
                    Some(y) => { info!("using {} for {}", x, keyname); Some(y) },
                    None => { warn!("invalid value {} for key {}", x, keyname); None },
                }
            },
            _ => { info!("key '{}' not defined", keyname); None },
        };
        self.speed_unit = value;

        Ok(())
    }
}

#[cfg(test)]
mod file_and_format {
    use super::*;

    #[test]
    fn file_not_found() {
        let mut config: GnssInfoConfig = Default::default();
        let res = config.parse_config("test_files/does_not_exist.conf");
        assert_eq!(res.is_err(), true);
    }

    #[test]
    fn no_default_section() {
        let mut config: GnssInfoConfig = Default::default();
        let res = config.parse_config("test_files/gnss0_no_default_section.conf");
        assert_eq!(res.is_err(), true);
    }

    #[test]
    fn wrong_version_info() {
        let mut config: GnssInfoConfig = Default::default();
        let res = config.parse_config("test_files/gnss0_wrong_version.conf");
        assert_eq!(res.is_err(), true);
    }
}

#[cfg(test)]
mod port_settings {
    use super::*;

    #[test]
    fn all_keys_ok() {
        let mut config: GnssInfoConfig = Default::default();
        let res = config.parse_config("test_files/gnss0_ok.conf");
        assert_eq!(res.is_ok(), true);
        assert_eq!(config.device, Some(String::from("/dev/ttyS3")));
        assert_eq!(config.bitrate, Some(115200));
    }

    #[test]
    fn keys_missing() {
        let mut config: GnssInfoConfig = Default::default();
        let res = config.parse_config("test_files/gnss0_minimal.conf");
        assert_eq!(res.is_ok(), true);
        assert_eq!(config.device, None);
        assert_eq!(config.bitrate, None);
    }

    #[test]
    fn bitrate_invalid() {
        let mut config: GnssInfoConfig = Default::default();
        let res = config.parse_config("test_files/gnss0_bitrate_invalid.conf");
        assert_eq!(res.is_ok(), true);
        assert_eq!(config.bitrate, None);
    }
}

#[cfg(test)]
mod output_settings {
    use super::*;

    #[test]
    fn format_and_unit_ok() {
        let mut config: GnssInfoConfig = Default::default();
        let res = config.parse_config("test_files/gnss0_ok.conf");
        assert_eq!(res.is_ok(), true);
        assert_eq!(config.coordinate_format, Some(CoordinateFormat::Dms));
        assert_eq!(config.speed_unit, Some(SpeedUnit::Both));
    }

    #[test]
    fn unknown_format() {
        let mut config: GnssInfoConfig = Default::default();
        let res = config.parse_config("test_files/gnss0_format_unknown.conf");
        assert_eq!(res.is_ok(), true);
        assert_eq!(config.coordinate_format, None);
    }
}
