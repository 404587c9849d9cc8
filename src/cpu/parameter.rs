use std::fmt;

use crate::cpu::register::{AMode, R8, R16};
use crate::string::displacement_term;

/// the ModRM rm value that means "direct address" when mod is 0
pub const DIRECT_ADDRESS: u8 = 0b110;

/// operand size, selected by the w bit of an opcode
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Width {
    Byte,
    Word,
}

impl Width {
    /// decodes the lowest bit of `v` as a w flag
    pub fn from_bit(v: u8) -> Self {
        if v & 1 == 0 {
            Width::Byte
        } else {
            Width::Word
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Width::Byte => "byte",
            Width::Word => "word",
        }
    }
}

impl fmt::Display for Width {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The operands of an Instruction
#[derive(Clone, Debug, PartialEq)]
pub struct ParameterSet {
    pub dst: Parameter,
    pub src: Parameter,
}

impl ParameterSet {
    // returns the number of parameters
    pub fn count(&self) -> usize {
        match self.dst {
            Parameter::None => 0,
            _ => match self.src {
                Parameter::None => 1,
                _ => 2,
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Parameter {
    /// 8-bit general purpose register
    Reg8(R8),
    /// 16-bit general purpose register
    Reg16(R16),

    Imm8(u8),                   // 12
    Imm16(u16),                 // 3948
    ImmS8(i8),                  // sign extended byte, like -1

    Ptr(u16),                   // [u16], like "[4145]"
    PtrAmode(AMode),            // [amode], like "[bx + si]"
    PtrAmodeS8(AMode, i8),      // [amode+s8], like "[bp - 37]"
    PtrAmodeS16(AMode, i16),    // [amode+s16], like "[bx + si + 4999]"

    /// short branch target and the displacement that produced it, like "label1 ; -2"
    Label(String, i8),

    None,
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Parameter::Reg8(r) => write!(f, "{}", r),
            Parameter::Reg16(r) => write!(f, "{}", r),
            Parameter::Imm8(imm) => write!(f, "{}", imm),
            Parameter::Imm16(imm) => write!(f, "{}", imm),
            Parameter::ImmS8(imm) => write!(f, "{}", imm),
            Parameter::Ptr(v) => write!(f, "[{}]", v),
            Parameter::PtrAmode(amode) => write!(f, "[{}]", amode),
            Parameter::PtrAmodeS8(amode, disp) => {
                write!(f, "[{}{}]", amode, displacement_term(i32::from(disp)))
            }
            Parameter::PtrAmodeS16(amode, disp) => {
                write!(f, "[{}{}]", amode, displacement_term(i32::from(disp)))
            }
            Parameter::Label(ref label, disp) => write!(f, "{} ; {}", label, disp),
            Parameter::None => write!(f, ""),
        }
    }
}

impl Parameter {
    /// register operand named by a 3-bit register field at the given width
    pub fn reg(width: Width, v: u8) -> Self {
        match width {
            Width::Byte => Parameter::Reg8(R8::from(v)),
            Width::Word => Parameter::Reg16(R16::from(v)),
        }
    }

    pub fn is_ptr(&self) -> bool {
        match *self {
            Parameter::Ptr(_)
            | Parameter::PtrAmode(_)
            | Parameter::PtrAmodeS8(_, _)
            | Parameter::PtrAmodeS16(_, _) => true,
            _ => false,
        }
    }

    /// absolute value of an immediate operand
    pub fn magnitude(&self) -> Option<u16> {
        match *self {
            Parameter::Imm8(imm) => Some(u16::from(imm)),
            Parameter::Imm16(imm) => Some(imm),
            Parameter::ImmS8(imm) => Some(i16::from(imm).abs() as u16),
            _ => None,
        }
    }
}

/// Instruction encoding layout for Mod/Reg/RM byte
#[derive(Debug, PartialEq)]
pub struct ModRegRm {
    /// "mod" is correct name, but is reserved keyword
    /// High 2 bits
    pub md: u8,

    /// mid 3 bits
    pub reg: u8,

    /// low 3 bits
    pub rm: u8,
}

impl ModRegRm {
    pub fn from_u8(b: u8) -> Self {
        ModRegRm {
            md: b >> 6,
            reg: (b >> 3) & 7,
            rm: b & 7,
        }
    }

    /// true when the rm field names a register rather than memory
    pub fn is_register_mode(&self) -> bool {
        self.md == 3
    }

    /// true for the mod 0, rm 6 special case: a 16-bit absolute address follows
    pub fn is_direct_address(&self) -> bool {
        self.md == 0 && self.rm == DIRECT_ADDRESS
    }
}
