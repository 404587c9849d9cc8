use std::fmt;

/// 8-bit general purpose registers, in the order of the ModRM reg encoding
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum R8 {
    AL, CL, DL, BL, AH, CH, DH, BH
}

impl R8 {
    pub fn as_str(self) -> &'static str {
        match self {
            R8::AL => "al",
            R8::CL => "cl",
            R8::DL => "dl",
            R8::BL => "bl",
            R8::AH => "ah",
            R8::CH => "ch",
            R8::DH => "dh",
            R8::BH => "bh",
        }
    }
}

/// decodes a 3-bit register field, higher bits are ignored
impl From<u8> for R8 {
    fn from(v: u8) -> Self {
        match v & 7 {
            0 => R8::AL,
            1 => R8::CL,
            2 => R8::DL,
            3 => R8::BL,
            4 => R8::AH,
            5 => R8::CH,
            6 => R8::DH,
            7 => R8::BH,
            _ => unreachable!(),
        }
    }
}

impl fmt::Display for R8 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 16-bit general purpose registers, in the order of the ModRM reg encoding
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum R16 {
    AX, CX, DX, BX, SP, BP, SI, DI
}

impl R16 {
    pub fn as_str(self) -> &'static str {
        match self {
            R16::AX => "ax",
            R16::CX => "cx",
            R16::DX => "dx",
            R16::BX => "bx",
            R16::SP => "sp",
            R16::BP => "bp",
            R16::SI => "si",
            R16::DI => "di",
        }
    }
}

impl From<u8> for R16 {
    fn from(v: u8) -> Self {
        match v & 7 {
            0 => R16::AX,
            1 => R16::CX,
            2 => R16::DX,
            3 => R16::BX,
            4 => R16::SP,
            5 => R16::BP,
            6 => R16::SI,
            7 => R16::DI,
            _ => unreachable!(),
        }
    }
}

impl fmt::Display for R16 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// effective address calculation selected by the ModRM rm field in memory modes
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum AMode {
    BXSI, BXDI, BPSI, BPDI, SI, DI, BP, BX
}

impl AMode {
    pub fn as_str(self) -> &'static str {
        match self {
            AMode::BXSI => "bx + si",
            AMode::BXDI => "bx + di",
            AMode::BPSI => "bp + si",
            AMode::BPDI => "bp + di",
            AMode::SI => "si",
            AMode::DI => "di",
            AMode::BP => "bp",
            AMode::BX => "bx",
        }
    }
}

impl From<u8> for AMode {
    fn from(v: u8) -> Self {
        match v & 7 {
            0 => AMode::BXSI,
            1 => AMode::BXDI,
            2 => AMode::BPSI,
            3 => AMode::BPDI,
            4 => AMode::SI,
            5 => AMode::DI,
            6 => AMode::BP,
            7 => AMode::BX,
            _ => unreachable!(),
        }
    }
}

impl fmt::Display for AMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
