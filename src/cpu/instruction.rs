use std::fmt;

use crate::cpu::{Op, Parameter, ParameterSet, Width};
use crate::hex::hex_bytes;
use crate::string::right_pad;

#[derive(Clone, Debug, PartialEq)]
pub struct Instruction {
    pub command: Op,
    pub params: ParameterSet,

    /// explicit operand size, written before the destination ("add byte [bx], 34")
    pub size_qualifier: Option<Width>,
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let qualifier = match self.size_qualifier {
            Some(w) => format!("{} ", w),
            None => String::new(),
        };
        match self.params.count() {
            0 => write!(f, "{}", self.command),
            1 => write!(f, "{} {}{}", self.command, qualifier, self.params.dst),
            _ => write!(
                f,
                "{} {}{}, {}",
                self.command,
                qualifier,
                self.params.dst,
                self.params.src
            ),
        }
    }
}

impl Instruction {
    pub fn new(op: Op) -> Self {
        Instruction::new2(op, Parameter::None, Parameter::None)
    }

    pub fn new1(op: Op, dst: Parameter) -> Self {
        Instruction::new2(op, dst, Parameter::None)
    }

    pub fn new2(op: Op, dst: Parameter, src: Parameter) -> Self {
        Instruction {
            command: op,
            params: ParameterSet { dst, src },
            size_qualifier: None,
        }
    }
}

/// a decoded instruction together with where it was found in the stream
#[derive(Clone, Debug, PartialEq)]
pub struct InstructionInfo {
    /// byte offset of the opcode byte
    pub offset: usize,
    pub bytes: Vec<u8>,
    pub instruction: Instruction,
}

impl fmt::Display for InstructionInfo {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "[{:04X}] {} {}",
            self.offset,
            right_pad(&hex_bytes(&self.bytes), 16),
            self.instruction,
        )
    }
}
