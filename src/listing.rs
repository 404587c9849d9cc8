use std::fmt;
use std::io::{self, Write};

use crate::config::{Config, DEFAULT_HEADER};
use crate::cpu::{InstructionInfo, Labels};

#[cfg(test)]
#[path = "./listing_test.rs"]
mod listing_test;

/// Renders decoded instructions as an assembler listing. Label lines are written
/// before the instructions their offsets point at, so every label must be known
/// before rendering starts.
pub struct Listing<'a> {
    instructions: &'a [InstructionInfo],
    labels: &'a Labels,
    header: &'a str,
    annotate: bool,
}

impl<'a> fmt::Display for Listing<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.header)?;
        writeln!(f)?;
        for info in self.instructions {
            if let Some(label) = self.labels.get(info.offset) {
                writeln!(f, "{}:", label)?;
            }
            if self.annotate {
                writeln!(f, "{}", info)?;
            } else {
                writeln!(f, "{}", info.instruction)?;
            }
        }
        Ok(())
    }
}

impl<'a> Listing<'a> {
    pub fn new(instructions: &'a [InstructionInfo], labels: &'a Labels) -> Self {
        Listing {
            instructions,
            labels,
            header: DEFAULT_HEADER,
            annotate: false,
        }
    }

    /// applies the header and annotate settings of `config`
    pub fn configure(mut self, config: &'a Config) -> Self {
        self.header = &config.header;
        self.annotate = config.annotate;
        self
    }

    pub fn header(mut self, header: &'a str) -> Self {
        self.header = header;
        self
    }

    /// if enabled, each instruction line shows its offset and raw bytes
    pub fn annotated(mut self, annotate: bool) -> Self {
        self.annotate = annotate;
        self
    }

    pub fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        write!(w, "{}", self)?;
        for (target, label) in self.dangling_labels() {
            warn!("{} targets offset {}, which is not the start of a decoded instruction", label, target);
        }
        Ok(())
    }

    /// labels whose target is not the start of any decoded instruction, in discovery order.
    /// these are never written to the listing
    pub fn dangling_labels(&self) -> Vec<(isize, &'a str)> {
        let labels: &'a Labels = self.labels;
        labels
            .iter()
            .filter(|(target, _)| {
                *target < 0 || self
                    .instructions
                    .binary_search_by_key(&(*target as usize), |i| i.offset)
                    .is_err()
            })
            .collect()
    }
}
