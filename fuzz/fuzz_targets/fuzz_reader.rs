#![no_main]
use std::io::{self, Read};

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use yamlreader::{Input, Reader, ReaderOptions, SENTINEL};

#[derive(Debug, Arbitrary)]
struct Case {
    bytes: Vec<u8>,
    /// Read sizes for the handle, cycled.
    reads: Vec<u8>,
    /// Decode window for the blob.
    window: u8,
    /// Lookahead widths used while walking.
    steps: Vec<u8>,
}

/// Serves `data` in the scripted read sizes.
struct Scripted<'a> {
    data: &'a [u8],
    reads: &'a [u8],
    call: usize,
}

impl Read for Scripted<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let size = match self.reads {
            [] => self.data.len(),
            reads => usize::from(reads[self.call % reads.len()]).max(1),
        };
        self.call += 1;
        let count = size.min(buf.len()).min(self.data.len());
        buf[..count].copy_from_slice(&self.data[..count]);
        self.data = &self.data[count..];
        Ok(count)
    }
}

/// Either every character with its (index, line, column), or the position of
/// the first rejected character.
fn walk(
    reader: yamlreader::Result<Reader<'_>>,
    steps: &[u8],
) -> Result<Vec<(char, usize, usize, usize)>, usize> {
    let position = |err: yamlreader::Error| match err.as_reader_error() {
        Some(err) => err.position,
        None => unreachable!("in-memory reads cannot fail: {err}"),
    };
    let mut reader = reader.map_err(position)?;
    let mut seen = Vec::new();
    let mut i = 0;
    loop {
        let step = steps.get(i % steps.len().max(1)).map_or(1, |s| 1 + usize::from(*s % 8));
        i += 1;
        let before = reader.position();
        let window = reader.prefix(step).map_err(position)?;
        assert_eq!(reader.position(), before, "lookahead moved the reader");
        for ch in window.chars() {
            if ch == SENTINEL {
                assert_eq!(reader.peek(step + 3).map_err(position)?, SENTINEL);
                return Ok(seen);
            }
            let p = reader.position();
            seen.push((ch, p.index, p.line, p.column));
            reader.forward(1).map_err(position)?;
        }
    }
}

fuzz_target!(|case: Case| {
    let blob = walk(
        Reader::new(
            Input::Bytes(&case.bytes),
            ReaderOptions {
                chunk_size: usize::from(case.window),
                ..Default::default()
            },
        ),
        &case.steps,
    );
    let handle = walk(
        Reader::new(
            Input::Handle(Box::new(Scripted {
                data: &case.bytes,
                reads: &case.reads,
                call: 0,
            })),
            ReaderOptions {
                chunk_size: usize::from(case.window),
                ..Default::default()
            },
        ),
        &case.steps,
    );
    assert_eq!(blob, handle);

    if let Ok(text) = std::str::from_utf8(&case.bytes) {
        let from_text = walk(Reader::from_text(text), &case.steps);
        assert_eq!(from_text, blob);
    }
});
