use crate::cpu::Op;

#[cfg(test)]
#[path = "./opcode_test.rs"]
mod opcode_test;

/// the instruction class an opcode byte belongs to, deciding which trailing bytes follow it
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum OpcodeClass {
    /// 1000 10dw: mov r/m, reg
    MovReg,
    /// 1011 wreg: mov reg, imm
    MovImmReg,
    /// 0000 00dw: add r/m, reg
    Add,
    /// 1000 00sw: add/adc/sbb/sub/cmp r/m, imm
    ArithImm,
    /// 0000 010w: add al/ax, imm
    AddImmAcc,
    /// 0010 10dw: sub r/m, reg
    Sub,
    /// 0010 110w: sub al/ax, imm
    SubImmAcc,
    /// 0011 10dw: cmp r/m, reg
    Cmp,
    /// 0011 110w: cmp al/ax, imm
    CmpImmAcc,
    /// conditional jump or loop with a signed 8-bit displacement
    ShortJump(Op),
}

/// matches a byte `b` when `b & mask == pattern`
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct OpcodeEntry {
    pub mask: u8,
    pub pattern: u8,
    pub class: OpcodeClass,
}

impl OpcodeEntry {
    pub const fn new(mask: u8, pattern: u8, class: OpcodeClass) -> Self {
        OpcodeEntry { mask, pattern, class }
    }

    pub fn matches(&self, b: u8) -> bool {
        b & self.mask == self.pattern
    }
}

/// Entries are tried top to bottom and the first match wins, so the order matters
/// whenever two masks overlap.
pub static OPCODES: [OpcodeEntry; 29] = [
    OpcodeEntry::new(0xFC, 0x88, OpcodeClass::MovReg),
    OpcodeEntry::new(0xF0, 0xB0, OpcodeClass::MovImmReg),
    OpcodeEntry::new(0xFC, 0x00, OpcodeClass::Add),
    OpcodeEntry::new(0xFC, 0x80, OpcodeClass::ArithImm),
    OpcodeEntry::new(0xFE, 0x04, OpcodeClass::AddImmAcc),
    OpcodeEntry::new(0xFC, 0x28, OpcodeClass::Sub),
    OpcodeEntry::new(0xFE, 0x2C, OpcodeClass::SubImmAcc),
    OpcodeEntry::new(0xFC, 0x38, OpcodeClass::Cmp),
    OpcodeEntry::new(0xFE, 0x3C, OpcodeClass::CmpImmAcc),
    OpcodeEntry::new(0xFF, 0x74, OpcodeClass::ShortJump(Op::Je)),
    OpcodeEntry::new(0xFF, 0x7C, OpcodeClass::ShortJump(Op::Jl)),
    OpcodeEntry::new(0xFF, 0x7E, OpcodeClass::ShortJump(Op::Jle)),
    OpcodeEntry::new(0xFF, 0x72, OpcodeClass::ShortJump(Op::Jb)),
    OpcodeEntry::new(0xFF, 0x76, OpcodeClass::ShortJump(Op::Jbe)),
    OpcodeEntry::new(0xFF, 0x7A, OpcodeClass::ShortJump(Op::Jp)),
    OpcodeEntry::new(0xFF, 0x70, OpcodeClass::ShortJump(Op::Jo)),
    OpcodeEntry::new(0xFF, 0x78, OpcodeClass::ShortJump(Op::Js)),
    OpcodeEntry::new(0xFF, 0x75, OpcodeClass::ShortJump(Op::Jne)),
    OpcodeEntry::new(0xFF, 0x7D, OpcodeClass::ShortJump(Op::Jnl)),
    OpcodeEntry::new(0xFF, 0x7F, OpcodeClass::ShortJump(Op::Jnle)),
    OpcodeEntry::new(0xFF, 0x73, OpcodeClass::ShortJump(Op::Jnb)),
    OpcodeEntry::new(0xFF, 0x77, OpcodeClass::ShortJump(Op::Jnbe)),
    OpcodeEntry::new(0xFF, 0x7B, OpcodeClass::ShortJump(Op::Jnp)),
    OpcodeEntry::new(0xFF, 0x71, OpcodeClass::ShortJump(Op::Jno)),
    OpcodeEntry::new(0xFF, 0x79, OpcodeClass::ShortJump(Op::Jns)),
    OpcodeEntry::new(0xFF, 0xE2, OpcodeClass::ShortJump(Op::Loop)),
    OpcodeEntry::new(0xFF, 0xE1, OpcodeClass::ShortJump(Op::Loopz)),
    OpcodeEntry::new(0xFF, 0xE0, OpcodeClass::ShortJump(Op::Loopnz)),
    OpcodeEntry::new(0xFF, 0xE3, OpcodeClass::ShortJump(Op::Jcxz)),
];

/// returns the class of the first entry in `OPCODES` matching `b`, or None if `b` is unrecognized
pub fn match_opcode(b: u8) -> Option<OpcodeClass> {
    match_opcode_in(&OPCODES, b)
}

pub fn match_opcode_in(table: &[OpcodeEntry], b: u8) -> Option<OpcodeClass> {
    table.iter().find(|e| e.matches(b)).map(|e| e.class)
}
