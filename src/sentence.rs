/*
 * Sentence classification and last-value cache
 *
 * Keeps the most recently received sentence per tracked type. Entries
 * are only ever overwritten, a stale fix is indistinguishable from a
 * fresh one. GSV sentences of one fix cycle are collected in a single
 * slot so the whole constellation report can be evaluated at once.
 */

use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentenceType {
    Rmc,
    Gga,
    Gsa,
    Gsv,
    Zda,
}

impl SentenceType {
    /// Maps the 3-letter tag after the talker id, e.g. "RMC" of "$GNRMC"
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "RMC" => Some(SentenceType::Rmc),
            "GGA" => Some(SentenceType::Gga),
            "GSA" => Some(SentenceType::Gsa),
            "GSV" => Some(SentenceType::Gsv),
            "ZDA" => Some(SentenceType::Zda),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct SentenceCache {
    rmc: String,
    gga: String,
    gsa: String,
    gsv: String,
    zda: String,
}

impl SentenceCache {
    pub fn new() -> Self {
        Default::default()
    }

    /// Stores a sentence that already passed frame validation.
    ///
    /// Unknown sentence types are discarded silently, no checksum
    /// re-check takes place here.
    pub fn ingest(&mut self, sentence: &str) {
        let tag = match sentence.get(3..6) {
            Some(tag) => tag,
            None => return,
        };

        match SentenceType::from_tag(tag) {
            Some(SentenceType::Rmc) => self.rmc = String::from(sentence),
            Some(SentenceType::Gga) => self.gga = String::from(sentence),
            Some(SentenceType::Gsa) => self.gsa = String::from(sentence),
            Some(SentenceType::Gsv) => self.ingest_gsv(sentence),
            Some(SentenceType::Zda) => self.zda = String::from(sentence),
            None => debug!("ignoring sentence type {}", tag),
        }
    }

    pub fn get(&self, sentence_type: SentenceType) -> Option<&str> {
        let slot = match sentence_type {
            SentenceType::Rmc => &self.rmc,
            SentenceType::Gga => &self.gga,
            SentenceType::Gsa => &self.gsa,
            SentenceType::Gsv => &self.gsv,
            SentenceType::Zda => &self.zda,
        };
        if slot.is_empty() {
            None
        } else {
            Some(slot)
        }
    }

    // GSV reports come as a burst of numbered sub-sentences, 4 satellites
    // each. Message number 1 starts a new cycle, later numbers of the same
    // cycle are appended to the slot.
    fn ingest_gsv(&mut self, sentence: &str) {
        let msg_num = sentence
            .split(',')
            .nth(2)
            .and_then(|field| field.parse::<u8>().ok());

        match msg_num {
            Some(n) if n > 1 && !self.gsv.is_empty() => self.gsv.push_str(sentence),
            _ => self.gsv = String::from(sentence),
        }
    }
}
