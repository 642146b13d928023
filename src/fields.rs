/*
 * Typed field access for cached NMEA sentences
 *
 * Positional indexing per the NMEA-0183 schema happens only here. Every
 * accessor returns Option, an absent or empty field is None. The trailing
 * "*checksum" is stripped before a token is handed out, so the last field
 * of a sentence is safe to read as well.
 */

struct FieldList<'a> {
    tokens: Vec<&'a str>,
}

impl<'a> FieldList<'a> {
    fn split(sentence: &'a str) -> Self {
        Self {
            tokens: sentence.split(',').collect(),
        }
    }

    fn len(&self) -> usize {
        self.tokens.len()
    }

    fn get(&self, index: usize) -> Option<&'a str> {
        let token = self.tokens.get(index)?;
        let token = token.split('*').next()?.trim_end();
        if token.is_empty() {
            None
        } else {
            Some(token)
        }
    }
}

/// $xxRMC - recommended minimum data
pub struct RmcFields<'a> {
    fields: FieldList<'a>,
}

impl<'a> RmcFields<'a> {
    pub fn new(sentence: &'a str) -> Self {
        Self {
            fields: FieldList::split(sentence),
        }
    }

    pub fn time(&self) -> Option<&'a str> {
        self.fields.get(1)
    }

    pub fn status(&self) -> Option<&'a str> {
        self.fields.get(2)
    }

    pub fn speed_knots(&self) -> Option<f64> {
        self.fields.get(7).and_then(|token| token.parse().ok())
    }

    pub fn course(&self) -> Option<&'a str> {
        self.fields.get(8)
    }

    pub fn date(&self) -> Option<&'a str> {
        self.fields.get(9)
    }
}

/// $xxGGA - fix data
pub struct GgaFields<'a> {
    fields: FieldList<'a>,
}

impl<'a> GgaFields<'a> {
    pub fn new(sentence: &'a str) -> Self {
        Self {
            fields: FieldList::split(sentence),
        }
    }

    pub fn latitude(&self) -> Option<&'a str> {
        self.fields.get(2)
    }

    pub fn latitude_dir(&self) -> Option<&'a str> {
        self.fields.get(3)
    }

    pub fn longitude(&self) -> Option<&'a str> {
        self.fields.get(4)
    }

    pub fn longitude_dir(&self) -> Option<&'a str> {
        self.fields.get(5)
    }

    pub fn quality(&self) -> Option<&'a str> {
        self.fields.get(6)
    }

    pub fn satellites_used(&self) -> Option<&'a str> {
        self.fields.get(7)
    }

    pub fn hdop(&self) -> Option<&'a str> {
        self.fields.get(8)
    }

    pub fn altitude(&self) -> Option<&'a str> {
        self.fields.get(9)
    }

    pub fn altitude_unit(&self) -> Option<&'a str> {
        self.fields.get(10)
    }
}

/// $xxGSA - DOP and active satellites
pub struct GsaFields<'a> {
    fields: FieldList<'a>,
}

impl<'a> GsaFields<'a> {
    pub fn new(sentence: &'a str) -> Self {
        Self {
            fields: FieldList::split(sentence),
        }
    }

    pub fn fix_type(&self) -> Option<&'a str> {
        self.fields.get(2)
    }

    /// PRNs of the satellites used for the fix, fields 3..14
    pub fn satellite_ids(&self) -> Vec<&'a str> {
        (3..=14).filter_map(|index| self.fields.get(index)).collect()
    }
}

/// $xxZDA - date and time
pub struct ZdaFields<'a> {
    fields: FieldList<'a>,
}

impl<'a> ZdaFields<'a> {
    pub fn new(sentence: &'a str) -> Self {
        Self {
            fields: FieldList::split(sentence),
        }
    }

    pub fn time(&self) -> Option<&'a str> {
        self.fields.get(1)
    }

    pub fn day(&self) -> Option<&'a str> {
        self.fields.get(2)
    }

    pub fn month(&self) -> Option<&'a str> {
        self.fields.get(3)
    }

    pub fn year(&self) -> Option<&'a str> {
        self.fields.get(4)
    }
}

#[derive(Debug, PartialEq)]
pub struct GsvSatellite<'a> {
    pub prn: &'a str,
    pub elevation: &'a str,
    pub azimuth: &'a str,
    pub snr: &'a str,
}

/// All satellites in view of one fix cycle
///
/// Built from the GSV cache slot which holds every sub-sentence of the
/// cycle back to back. The in-view counts of the sub-sentences are summed,
/// satellite records come in groups of four fields starting at offset 4.
#[derive(Debug)]
pub struct GsvAggregate<'a> {
    pub in_view: u32,
    pub satellites: Vec<GsvSatellite<'a>>,
}

impl<'a> GsvAggregate<'a> {
    pub fn from_slot(slot: &'a str) -> Self {
        let mut in_view = 0;
        let mut satellites = Vec::new();

        for sub in slot.split('$').filter(|part| !part.is_empty()) {
            let fields = FieldList::split(sub);
            if let Some(count) = fields.get(3).and_then(|token| token.parse::<u32>().ok()) {
                in_view += count;
            }

            let mut index = 4;
            while index + 3 < fields.len() {
                // records with an empty PRN are skipped
                if let Some(prn) = fields.get(index) {
                    satellites.push(GsvSatellite {
                        prn,
                        elevation: fields.get(index + 1).unwrap_or(""),
                        azimuth: fields.get(index + 2).unwrap_or(""),
                        snr: fields.get(index + 3).unwrap_or(""),
                    });
                }
                index += 4;
            }
        }

        Self {
            in_view,
            satellites,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RMC: &str = "$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*6A";
    const GGA: &str = "$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47";
    const GSA: &str = "$GPGSA,A,3,04,05,,09,12,,,24,,,,,2.5,1.3,2.1*39";
    const ZDA: &str = "$GPZDA,123519,23,03,1994,00,00*42";

    #[test]
    fn rmc() {
        let uut = RmcFields::new(RMC);
        assert_eq!(uut.time(), Some("123519"));
        assert_eq!(uut.status(), Some("A"));
        assert_eq!(uut.speed_knots(), Some(22.4));
        assert_eq!(uut.course(), Some("084.4"));
        assert_eq!(uut.date(), Some("230394"));
    }

    #[test]
    fn rmc_empty_fields() {
        let uut = RmcFields::new("$GNRMC,155215.00,V,,,,,,,171020,,,N*61");
        assert_eq!(uut.status(), Some("V"));
        assert_eq!(uut.speed_knots(), None);
        assert_eq!(uut.course(), None);
    }

    #[test]
    fn rmc_truncated() {
        let uut = RmcFields::new("$GPRMC,123519,A");
        assert_eq!(uut.time(), Some("123519"));
        assert_eq!(uut.date(), None);
        assert_eq!(uut.speed_knots(), None);
    }

    #[test]
    fn gga() {
        let uut = GgaFields::new(GGA);
        assert_eq!(uut.latitude(), Some("4807.038"));
        assert_eq!(uut.latitude_dir(), Some("N"));
        assert_eq!(uut.longitude(), Some("01131.000"));
        assert_eq!(uut.longitude_dir(), Some("E"));
        assert_eq!(uut.quality(), Some("1"));
        assert_eq!(uut.satellites_used(), Some("08"));
        assert_eq!(uut.hdop(), Some("0.9"));
        assert_eq!(uut.altitude(), Some("545.4"));
        assert_eq!(uut.altitude_unit(), Some("M"));
    }

    #[test]
    fn gsa() {
        let uut = GsaFields::new(GSA);
        assert_eq!(uut.fix_type(), Some("3"));
        assert_eq!(uut.satellite_ids(), vec!["04", "05", "09", "12", "24"]);
    }

    #[test]
    fn zda() {
        let uut = ZdaFields::new(ZDA);
        assert_eq!(uut.time(), Some("123519"));
        assert_eq!(uut.day(), Some("23"));
        assert_eq!(uut.month(), Some("03"));
        assert_eq!(uut.year(), Some("1994"));
    }

    #[test]
    fn last_field_has_no_checksum_residue() {
        // SNR of the last record carries the *checksum suffix
        let slot = "$GPGSV,1,1,04,01,40,083,46,02,17,308,41,12,07,344,39,14,22,228,45*79";
        let uut = GsvAggregate::from_slot(slot);
        assert_eq!(uut.satellites.len(), 4);
        assert_eq!(uut.satellites[3].snr, "45");
    }

    #[test]
    fn gsv_two_sub_sentences() {
        let slot = "$GPGSV,2,1,04,01,40,083,46,02,17,308,41,12,07,344,39,14,22,228,45*79\
                    $GPGSV,2,2,04,18,09,113,35,20,61,110,48,25,12,123,22,32,45,060,38*78";
        let uut = GsvAggregate::from_slot(slot);
        assert_eq!(uut.in_view, 8);
        assert_eq!(uut.satellites.len(), 8);
        assert_eq!(
            uut.satellites[0],
            GsvSatellite {
                prn: "01",
                elevation: "40",
                azimuth: "083",
                snr: "46"
            }
        );
        assert_eq!(uut.satellites[7].prn, "32");
    }

    #[test]
    fn gsv_empty_prn_skipped() {
        let slot = "$GPGSV,1,1,04,01,40,083,46,02,17,308,41,,07,344,39,14,22,228,45*79";
        let uut = GsvAggregate::from_slot(slot);
        assert_eq!(uut.in_view, 4);
        assert_eq!(uut.satellites.len(), 3);
    }

    #[test]
    fn gsv_empty_slot() {
        let uut = GsvAggregate::from_slot("");
        assert_eq!(uut.in_view, 0);
        assert_eq!(uut.satellites.len(), 0);
    }
}
