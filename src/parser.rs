/*
 * Parser that extracts NMEA sentences from an arbitrary byte stream
 *
 * The receiver delivers read chunks of any size. A small state machine
 * reassembles complete frames, verifies the checksum on the fly and
 * queues every valid sentence for ingestion. Corrupted frames are
 * dropped silently, the stream resynchronizes on the next '$'.
 */

use std::collections::VecDeque;

use log::debug;

use crate::checksum::Checksum;

// NMEA-0183 limits a sentence to 82 characters, allow some slack
const MAX_SENTENCE_LENGTH: usize = 128;

pub struct Parser {
    frames_rx: usize,
    state: State,
    msg_data: Vec<u8>,
    checksum: Checksum,
    checksum_rx: u8,
    rx_queue: VecDeque<String>,
}

#[derive(Debug)]
enum State {
    WaitSync,
    Data,
    ChkSum1,
    ChkSum2,
    LineEnd,
}

impl Parser {
    pub fn new() -> Self {
        Self {
            frames_rx: 0,
            state: State::WaitSync,
            msg_data: Vec::with_capacity(MAX_SENTENCE_LENGTH),
            checksum: Checksum::new(),
            checksum_rx: 0,
            rx_queue: VecDeque::with_capacity(10),
        }
    }

    pub fn frames_received(&self) -> usize {
        self.frames_rx
    }

    /// Next complete, checksum verified sentence or None
    pub fn sentence(&mut self) -> Option<String> {
        self.rx_queue.pop_front()
    }

    pub fn process(&mut self, data: &[u8]) {
        for byte in data.iter() {
            self.process_byte(*byte);
        }
    }

    pub fn process_byte(&mut self, data: u8) {
        // global state change when sync character is seen
        if data as char == '$' {
            self.reset();
            self.state = State::Data;
        } else {
            match self.state {
                State::WaitSync => (),
                State::Data => self.state_data(data),
                State::ChkSum1 => self.state_chksum1(data),
                State::ChkSum2 => self.state_chksum2(data),
                State::LineEnd => self.state_lineend(data),
            }
        }
    }

    fn state_data(&mut self, data: u8) {
        if data as char == '*' {
            self.state = State::ChkSum1;
        } else if self.msg_data.len() >= MAX_SENTENCE_LENGTH {
            debug!("sentence exceeds maximum length, dropping");
            self.state = State::WaitSync;
        } else {
            self.msg_data.push(data);
            self.checksum.add(data);
        }
    }

    fn state_chksum1(&mut self, data: u8) {
        match Self::to_bin(data) {
            Some(value) => {
                self.checksum_rx = value << 4;
                self.state = State::ChkSum2;
            }
            None => self.state = State::WaitSync,
        }
    }

    fn state_chksum2(&mut self, data: u8) {
        let value = match Self::to_bin(data) {
            Some(value) => value,
            None => {
                self.state = State::WaitSync;
                return;
            }
        };
        self.checksum_rx |= value;

        if self.checksum.matches(self.checksum_rx) {
            match std::str::from_utf8(&self.msg_data) {
                Ok(body) => {
                    self.frames_rx += 1;
                    let sentence = format!("${}*{:02X}", body, self.checksum_rx);
                    debug!("{:?}", sentence);
                    self.rx_queue.push_back(sentence);
                }
                Err(_) => debug!("sentence is not valid utf-8, dropping"),
            }
        } else {
            debug!(
                "checksum error {:02X} - {:02X}",
                self.checksum_rx,
                self.checksum.value()
            );
        }

        self.state = State::LineEnd;
    }

    fn state_lineend(&mut self, data: u8) {
        if data as char == '\n' {
            self.state = State::WaitSync;
        }
    }

    fn reset(&mut self) {
        self.msg_data.clear();
        self.checksum.reset();
        self.checksum_rx = 0;
    }

    fn to_bin(data: u8) -> Option<u8> {
        match data as char {
            '0'..='9' => Some(data - b'0'),
            'a'..='f' => Some(data - b'a' + 10),
            'A'..='F' => Some(data - b'A' + 10),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_bin() {
        assert_eq!(Parser::to_bin('0' as u8), Some(0));
        assert_eq!(Parser::to_bin('9' as u8), Some(9));
        assert_eq!(Parser::to_bin('a' as u8), Some(10));
        assert_eq!(Parser::to_bin('A' as u8), Some(10));
        assert_eq!(Parser::to_bin('f' as u8), Some(15));
        assert_eq!(Parser::to_bin('F' as u8), Some(15));

        assert_eq!(Parser::to_bin('x' as u8), None);
    }

    #[test]
    fn ok() {
        let data = "$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*6A\r\n";
        let mut uut = Parser::new();
        assert_eq!(uut.frames_received(), 0);
        uut.process(&data.as_bytes());
        assert_eq!(uut.frames_received(), 1);

        let sentence = uut.sentence().unwrap();
        assert_eq!(
            sentence,
            "$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*6A"
        );
        assert_eq!(uut.sentence(), None);
    }

    #[test]
    fn split_reads() {
        // sentence arriving in two chunks must still be assembled
        let data = "$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47\r\n";
        let mut uut = Parser::new();
        uut.process(&data.as_bytes()[..20]);
        assert_eq!(uut.frames_received(), 0);
        uut.process(&data.as_bytes()[20..]);
        assert_eq!(uut.frames_received(), 1);
    }

    #[test]
    fn wrong_checksum() {
        let data = "$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*6B\r\n";
        let mut uut = Parser::new();
        uut.process(&data.as_bytes());
        assert_eq!(uut.frames_received(), 0);
        assert_eq!(uut.sentence(), None);
    }

    #[test]
    fn checksum_missing() {
        let data_fail = "$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W\r\n";
        let data_ok = "$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*6A\r\n";
        let mut uut = Parser::new();
        uut.process(&data_fail.as_bytes());
        assert_eq!(uut.frames_received(), 0);

        // now next line must be properly read
        uut.process(&data_ok.as_bytes());
        assert_eq!(uut.frames_received(), 1);
    }

    #[test]
    fn checksum_not_hex() {
        let data = "$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*GA\r\n";
        let mut uut = Parser::new();
        uut.process(&data.as_bytes());
        assert_eq!(uut.frames_received(), 0);
    }

    #[test]
    fn garbage_between_sentences() {
        let data = "xx$%&\r\n$GPZDA,123519,23,03,1994,00,00*42\r\nnoise";
        let mut uut = Parser::new();
        uut.process(&data.as_bytes());
        assert_eq!(uut.frames_received(), 1);
        assert_eq!(uut.sentence().unwrap(), "$GPZDA,123519,23,03,1994,00,00*42");
    }

    #[test]
    fn multiple_sentences() {
        let data = "$GPGSV,2,1,04,01,40,083,46,02,17,308,41,12,07,344,39,14,22,228,45*79\r\n\
                    $GPGSV,2,2,04,18,09,113,35,20,61,110,48,25,12,123,22,32,45,060,38*78\r\n";
        let mut uut = Parser::new();
        uut.process(&data.as_bytes());
        assert_eq!(uut.frames_received(), 2);
        assert_eq!(uut.sentence().is_some(), true);
        assert_eq!(uut.sentence().is_some(), true);
        assert_eq!(uut.sentence(), None);
    }

    #[test]
    fn oversized_frame_dropped() {
        let mut data = String::from("$GPRMC,");
        data.push_str(&"A".repeat(200));
        data.push_str("*00\r\n");
        let mut uut = Parser::new();
        uut.process(&data.as_bytes());
        assert_eq!(uut.frames_received(), 0);
    }
}
