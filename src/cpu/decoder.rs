use std::io::Read;

use crate::config::Config;
use crate::cpu::instruction::{Instruction, InstructionInfo};
use crate::cpu::label::Labels;
use crate::cpu::op::Op;
use crate::cpu::opcode::{match_opcode, OpcodeClass};
use crate::cpu::parameter::{ModRegRm, Parameter, Width};
use crate::cpu::reader::ByteReader;
use crate::cpu::register::{AMode, R8, R16};
use crate::error::DecodeError;
use crate::listing::Listing;

/// if enabled, logs decoded instructions each time they are being decoded
const DEBUG_DECODER: bool = false;

#[cfg(test)]
#[path = "./decoder_test.rs"]
mod decoder_test;

/// Decodes an instruction stream in a single forward pass, collecting the decoded
/// instructions and the labels of every branch target.
pub struct Decoder<R> {
    reader: ByteReader<R>,
    instructions: Vec<InstructionInfo>,
    labels: Labels,
}

impl<R: Read> Decoder<R> {
    pub fn new(reader: R) -> Self {
        Decoder {
            reader: ByteReader::new(reader),
            instructions: Vec::new(),
            labels: Labels::default(),
        }
    }

    pub fn with_config(reader: R, config: &Config) -> Self {
        Decoder {
            reader: ByteReader::new(reader),
            instructions: Vec::new(),
            labels: Labels::new(&config.label_prefix),
        }
    }

    /// decodes until the stream is exhausted.
    /// on error, the instructions decoded before the failing one are still available
    pub fn decode(&mut self) -> Result<(), DecodeError> {
        while self.decode_next()? {}
        debug!(
            "decoded {} instructions from {} bytes, {} labels",
            self.instructions.len(),
            self.reader.cursor(),
            self.labels.len()
        );
        Ok(())
    }

    /// decodes the next instruction. returns false at end of stream
    pub fn decode_next(&mut self) -> Result<bool, DecodeError> {
        let offset = self.reader.begin();
        let b = match self.reader.next_byte()? {
            Some(b) => b,
            None => return Ok(false),
        };

        let instruction = match self.decode_instruction(b) {
            Ok(op) => op,
            Err(DecodeError::UnsupportedOperation { offset, reg }) => {
                warn!("unsupported immediate group operation {} at offset 0x{:04X}", reg, offset);
                Instruction::new(Op::Unsupported(reg))
            }
            Err(e) => return Err(e),
        };
        if DEBUG_DECODER {
            debug!("decode_next at 0x{:04X}: {}", offset, instruction);
        }

        self.instructions.push(InstructionInfo {
            offset,
            bytes: self.reader.take_bytes(),
            instruction,
        });
        Ok(true)
    }

    pub fn instructions(&self) -> &[InstructionInfo] {
        &self.instructions
    }

    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    /// number of bytes consumed so far
    pub fn cursor(&self) -> usize {
        self.reader.cursor()
    }

    /// listing of what has been decoded so far
    pub fn listing(&self) -> Listing<'_> {
        Listing::new(&self.instructions, &self.labels)
    }

    /// decodes the instruction starting with opcode byte `b`
    fn decode_instruction(&mut self, b: u8) -> Result<Instruction, DecodeError> {
        let class = match match_opcode(b) {
            Some(class) => class,
            None => {
                debug!("unknown byte {:02X} at offset 0x{:04X}", b, self.reader.start());
                return Ok(Instruction::new(Op::Unknown(b)));
            }
        };

        match class {
            OpcodeClass::MovReg => self.rm_reg(b, Op::Mov),
            OpcodeClass::Add => self.rm_reg(b, Op::Add),
            OpcodeClass::Sub => self.rm_reg(b, Op::Sub),
            OpcodeClass::Cmp => self.rm_reg(b, Op::Cmp),
            OpcodeClass::MovImmReg => {
                // mov reg, imm
                let w = Width::from_bit(b >> 3);
                let dst = Parameter::reg(w, b & 7);
                let src = self.imm(w)?;
                Ok(Instruction::new2(Op::Mov, dst, src))
            }
            OpcodeClass::ArithImm => self.arith_imm(b),
            OpcodeClass::AddImmAcc => self.acc_imm(b, Op::Add),
            OpcodeClass::SubImmAcc => self.acc_imm(b, Op::Sub),
            OpcodeClass::CmpImmAcc => self.acc_imm(b, Op::Cmp),
            OpcodeClass::ShortJump(op) => self.short_jump(op),
        }
    }

    /// op r/m, reg (d = 0) or op reg, r/m (d = 1)
    fn rm_reg(&mut self, b: u8, op: Op) -> Result<Instruction, DecodeError> {
        let reg_is_dst = b & 0b10 != 0;
        let w = Width::from_bit(b);
        let x = self.read_mod_reg_rm()?;
        let reg = Parameter::reg(w, x.reg);
        let rm = self.rm(w, &x)?;
        Ok(if reg_is_dst {
            Instruction::new2(op, reg, rm)
        } else {
            Instruction::new2(op, rm, reg)
        })
    }

    /// op r/m, imm, where the operation is selected by the ModRM reg field
    fn arith_imm(&mut self, b: u8) -> Result<Instruction, DecodeError> {
        let sign_extend = b & 0b10 != 0;
        let w = Width::from_bit(b);
        let x = self.read_mod_reg_rm()?;
        let dst = self.rm(w, &x)?;
        let src = match (sign_extend, w) {
            (false, Width::Word) => Parameter::Imm16(self.reader.read_u16()?),
            (true, Width::Word) => Parameter::ImmS8(self.reader.read_s8()?),
            (_, Width::Byte) => Parameter::Imm8(self.reader.read_u8()?),
        };

        // operand bytes must be consumed before the operation is checked
        let command = match Op::from_immediate_group(x.reg) {
            Some(op) => op,
            None => {
                return Err(DecodeError::UnsupportedOperation {
                    offset: self.reader.start(),
                    reg: x.reg,
                })
            }
        };

        let mut op = Instruction::new2(command, dst, src);
        if op.params.dst.is_ptr() && op.params.src.magnitude().map_or(false, |v| v <= 0xFF) {
            op.size_qualifier = Some(w);
        }
        Ok(op)
    }

    /// op al, imm8 or op ax, imm16
    fn acc_imm(&mut self, b: u8, op: Op) -> Result<Instruction, DecodeError> {
        let w = Width::from_bit(b);
        let dst = match w {
            Width::Byte => Parameter::Reg8(R8::AL),
            Width::Word => Parameter::Reg16(R16::AX),
        };
        let src = self.imm(w)?;
        Ok(Instruction::new2(op, dst, src))
    }

    fn short_jump(&mut self, op: Op) -> Result<Instruction, DecodeError> {
        let disp = self.reader.read_s8()?;
        // relative to the end of the instruction
        let target = self.reader.cursor() as isize + disp as isize;
        let label = self.labels.get_or_insert(target);
        Ok(Instruction::new1(op, Parameter::Label(label, disp)))
    }

    /// unsigned immediate of the given width
    fn imm(&mut self, w: Width) -> Result<Parameter, DecodeError> {
        let v = self.reader.read_word(w)?;
        Ok(match w {
            Width::Byte => Parameter::Imm8(v as u8),
            Width::Word => Parameter::Imm16(v),
        })
    }

    /// decodes the r/m operand of `x`, reading any displacement or direct address
    fn rm(&mut self, w: Width, x: &ModRegRm) -> Result<Parameter, DecodeError> {
        if x.is_register_mode() {
            return Ok(Parameter::reg(w, x.rm));
        }
        if x.is_direct_address() {
            return Ok(Parameter::Ptr(self.reader.read_u16()?));
        }
        let amode = AMode::from(x.rm);
        Ok(match x.md {
            0 => Parameter::PtrAmode(amode),
            1 => Parameter::PtrAmodeS8(amode, self.reader.read_s8()?),
            2 => Parameter::PtrAmodeS16(amode, self.reader.read_s16()?),
            _ => unreachable!(),
        })
    }

    fn read_mod_reg_rm(&mut self) -> Result<ModRegRm, DecodeError> {
        let b = self.reader.read_u8()?;
        let res = ModRegRm::from_u8(b);
        if DEBUG_DECODER {
            debug!("read_mod_reg_rm byte {:02X} = mod {}, reg {}, rm {}", b, res.md, res.reg, res.rm);
        }
        Ok(res)
    }
}
