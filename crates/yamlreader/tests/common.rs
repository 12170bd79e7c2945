#![allow(missing_docs)]
#![allow(dead_code)]

use std::io::{self, Read};

/// A reader that returns at most `step` bytes per call, splitting multi-byte
/// sequences wherever they fall.
pub struct Trickle<'a> {
    data: &'a [u8],
    step: usize,
}

impl<'a> Trickle<'a> {
    pub fn new(data: &'a [u8], step: usize) -> Self {
        Self {
            data,
            step: step.max(1),
        }
    }
}

impl Read for Trickle<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let count = self.step.min(buf.len()).min(self.data.len());
        buf[..count].copy_from_slice(&self.data[..count]);
        self.data = &self.data[count..];
        Ok(count)
    }
}

pub const DOCUMENT: &str = "%YAML 1.1\r\n---\r\nname: café\r\nitems:\r\n  - «one»\r\n  - two\u{2028}three\r\n...\r\n";
