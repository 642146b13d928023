/*
 * NMEA sentence envelope check
 *
 * A valid sentence looks like
 *   $GNRMC,155215.00,A,4719.13883,N,00758.44996,E,0.259,,171020,2.47,E,A*3E
 *
 * '$', followed by the sentence body, '*' and a two digit hex checksum.
 */

use crate::checksum::Checksum;

/// Checks envelope and checksum of a single received line.
///
/// Returns false for anything that is not a well formed NMEA sentence.
/// Malformed and corrupted frames are indistinguishable for the caller.
pub fn validate(sentence: &str) -> bool {
    let sentence = sentence.trim_end();
    if !sentence.starts_with('$') {
        return false;
    }

    let star = match sentence.rfind('*') {
        Some(pos) => pos,
        None => return false,
    };

    let suffix = &sentence[star + 1..];
    if suffix.len() != 2 {
        return false;
    }
    let expected = match u8::from_str_radix(suffix, 16) {
        Ok(value) => value,
        Err(_) => return false,
    };

    let mut checksum = Checksum::new();
    for byte in sentence[1..star].bytes() {
        checksum.add(byte);
    }
    checksum.matches(expected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok() {
        let data = "$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*6A";
        assert_eq!(validate(data), true);
    }

    #[test]
    fn ok_with_line_ending() {
        let data = "$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47\r\n";
        assert_eq!(validate(data), true);
    }

    #[test]
    fn wrong_checksum() {
        let data = "$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*6B";
        assert_eq!(validate(data), false);
    }

    #[test]
    fn corrupted_body() {
        // single character flipped, checksum unchanged
        let data = "$GPRMC,123519,A,4807.039,N,01131.000,E,022.4,084.4,230394,003.1,W*6A";
        assert_eq!(validate(data), false);
    }

    #[test]
    fn sync_char_missing() {
        let data = "GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*6A";
        assert_eq!(validate(data), false);
    }

    #[test]
    fn checksum_missing() {
        let data = "$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W";
        assert_eq!(validate(data), false);
    }

    #[test]
    fn checksum_not_hex() {
        let data = "$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*GZ";
        assert_eq!(validate(data), false);
    }

    #[test]
    fn checksum_too_short() {
        let data = "$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*6";
        assert_eq!(validate(data), false);
    }

    #[test]
    fn empty_line() {
        assert_eq!(validate(""), false);
    }
}
