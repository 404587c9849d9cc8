#![allow(clippy::unusual_byte_groupings)]

#[macro_use]
extern crate log;

#[macro_use]
extern crate quick_error;

#[macro_use]
extern crate serde_derive;

#[cfg(test)]
extern crate pretty_assertions;

pub mod config;
pub mod cpu;
pub mod error;
pub mod hex;
pub mod listing;
pub mod string;

use crate::cpu::Decoder;
use crate::error::DecodeError;

/// decodes `data` and renders it as a listing with the default header
pub fn disassemble(data: &[u8]) -> Result<String, DecodeError> {
    let mut decoder = Decoder::new(data);
    decoder.decode()?;
    Ok(decoder.listing().to_string())
}
