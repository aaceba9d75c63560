use phf::phf_map;
use strum_macros::Display;

/// The nine operations the machine understands.
#[derive(Copy, Clone, Debug, Display, Eq, PartialEq)]
#[strum(serialize_all = "kebab-case")]
pub enum Op {
    Add,
    Mul,
    Store,
    Out,
    JumpIfTrue,
    JumpIfFalse,
    LessThan,
    Equals,
    Halt,
}

impl Op {
    /// Parameter slots the instruction occupies, destination included.
    pub fn params(self) -> usize {
        match self {
            Op::Add | Op::Mul | Op::LessThan | Op::Equals => 3,
            Op::JumpIfTrue | Op::JumpIfFalse => 2,
            Op::Store | Op::Out => 1,
            Op::Halt => 0,
        }
    }
}

/// Dispatch table keyed by the low two decimal digits of an instruction word.
pub static OPCODES: phf::Map<u8, Op> = phf_map! {
    1u8 => Op::Add,
    2u8 => Op::Mul,
    3u8 => Op::Store,
    4u8 => Op::Out,
    5u8 => Op::JumpIfTrue,
    6u8 => Op::JumpIfFalse,
    7u8 => Op::LessThan,
    8u8 => Op::Equals,
    99u8 => Op::Halt,
};
