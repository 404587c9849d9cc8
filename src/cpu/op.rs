use std::fmt;

use crate::hex::hex_byte;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Op {
    Mov,
    Add,

    /// Add with Carry
    Adc,

    /// Integer Subtraction with Borrow
    Sbb,

    Sub,
    Cmp,

    // short conditional jumps
    Je, Jl, Jle, Jb, Jbe, Jp, Jo, Js,
    Jne, Jnl, Jnle, Jnb, Jnbe, Jnp, Jno, Jns,

    /// Decrement CX and jump short if CX is not zero
    Loop,
    Loopz,
    Loopnz,

    /// Jump short if CX is zero
    Jcxz,

    /// a byte not matched by the opcode table
    Unknown(u8),

    /// an immediate group slot (the ModRM reg value) outside the supported set
    Unsupported(u8),
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Op::Unknown(b) => write!(f, "Unknown byte {}", hex_byte(b)),
            Op::Unsupported(reg) => write!(f, "Unsupported operation {}", reg),
            _ => write!(f, "{}", format!("{:?}", self).to_lowercase()),
        }
    }
}

impl Op {
    /// true for the instructions taking a short relative branch target
    pub fn is_branch(self) -> bool {
        match self {
            Op::Je | Op::Jl | Op::Jle | Op::Jb | Op::Jbe | Op::Jp | Op::Jo | Op::Js |
            Op::Jne | Op::Jnl | Op::Jnle | Op::Jnb | Op::Jnbe | Op::Jnp | Op::Jno | Op::Jns |
            Op::Loop | Op::Loopz | Op::Loopnz | Op::Jcxz => true,
            _ => false,
        }
    }

    /// operation selected by the reg field of an immediate group (0x80-0x83) ModRM byte.
    /// slots 1 (or), 4 (and) and 6 (xor) are not supported
    pub fn from_immediate_group(reg: u8) -> Option<Op> {
        match reg {
            0 => Some(Op::Add),
            2 => Some(Op::Adc),
            3 => Some(Op::Sbb),
            5 => Some(Op::Sub),
            7 => Some(Op::Cmp),
            _ => None,
        }
    }
}
