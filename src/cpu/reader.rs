use std::io::{self, Read};
use std::mem;

use crate::cpu::Width;
use crate::error::DecodeError;

#[cfg(test)]
#[path = "./reader_test.rs"]
mod reader_test;

/// forward only byte cursor over an instruction stream.
/// the bytes read since the last `begin()` are kept, so they can be attached to the decoded instruction
pub struct ByteReader<R> {
    bytes: io::Bytes<R>,

    /// number of bytes consumed so far
    cursor: usize,

    /// offset of the instruction being decoded
    start: usize,

    current: Vec<u8>,
}

impl<R: Read> ByteReader<R> {
    pub fn new(reader: R) -> Self {
        ByteReader {
            bytes: reader.bytes(),
            cursor: 0,
            start: 0,
            current: Vec::new(),
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// offset of the instruction being decoded
    pub fn start(&self) -> usize {
        self.start
    }

    /// marks the current position as the start of a new instruction and returns it
    pub fn begin(&mut self) -> usize {
        self.start = self.cursor;
        self.current.clear();
        self.start
    }

    /// returns the bytes read since `begin()`
    pub fn take_bytes(&mut self) -> Vec<u8> {
        mem::replace(&mut self.current, Vec::new())
    }

    /// reads the next byte, or None at end of stream
    pub fn next_byte(&mut self) -> Result<Option<u8>, DecodeError> {
        match self.bytes.next() {
            None => Ok(None),
            Some(Err(e)) => Err(DecodeError::Io(e)),
            Some(Ok(b)) => {
                self.cursor += 1;
                self.current.push(b);
                Ok(Some(b))
            }
        }
    }

    /// reads a byte that the current instruction requires
    pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
        match self.next_byte()? {
            Some(b) => Ok(b),
            None => Err(DecodeError::Truncated {
                offset: self.start,
                cursor: self.cursor,
            }),
        }
    }

    pub fn read_s8(&mut self) -> Result<i8, DecodeError> {
        Ok(self.read_u8()? as i8)
    }

    /// reads a little endian word
    pub fn read_u16(&mut self) -> Result<u16, DecodeError> {
        let lo = self.read_u8()?;
        let hi = self.read_u8()?;
        Ok(u16::from(hi) << 8 | u16::from(lo))
    }

    pub fn read_s16(&mut self) -> Result<i16, DecodeError> {
        Ok(self.read_u16()? as i16)
    }

    /// reads 1 or 2 bytes depending on `width`
    pub fn read_word(&mut self, width: Width) -> Result<u16, DecodeError> {
        match width {
            Width::Byte => Ok(u16::from(self.read_u8()?)),
            Width::Word => self.read_u16(),
        }
    }
}
