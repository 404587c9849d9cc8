// these modules are re-exported as a single module

pub use self::decoder::*;
mod decoder;

pub use self::instruction::*;
mod instruction;

pub use self::label::*;
mod label;

pub use self::op::*;
mod op;

pub use self::opcode::*;
mod opcode;

pub use self::parameter::*;
mod parameter;

pub use self::reader::*;
mod reader;

pub use self::register::*;
mod register;
