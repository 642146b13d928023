/*
 * NMEA-0183 checksum computation
 *
 * Running XOR over all characters between '$' and '*', exclusive.
 */

#[derive(Debug)]
pub struct Checksum {
    value: u8,
}

impl Checksum {
    pub fn new() -> Self {
        Self { value: 0 }
    }

    pub fn value(&self) -> u8 {
        self.value
    }

    pub fn matches(&self, expected: u8) -> bool {
        self.value == expected
    }

    pub fn reset(&mut self) {
        self.value = 0;
    }

    pub fn add(&mut self, byte: u8) {
        self.value ^= byte;
    }
}
