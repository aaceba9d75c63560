use thiserror::Error;

use super::instructions::Op;
use super::Word;

/// Errors that abort a run. None are recoverable: a machine that produced
/// one is finished, and the partial memory image should not be trusted.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ExecError {
    /// The decoded opcode is not in the dispatch table.
    #[error("unknown opcode {opcode} at pc {pc}")]
    UnknownOpcode { opcode: Word, pc: usize },

    /// A destination parameter arrived in immediate mode.
    #[error("write through an immediate-mode parameter")]
    InvalidWriteMode,

    /// A position-mode address fell outside the memory image.
    #[error("address {address} outside memory of {len} cells")]
    AddressOutOfBounds { address: Word, len: usize },

    /// A mode digit other than 0 or 1.
    #[error("unknown parameter mode {0}")]
    UnknownParameterMode(u8),

    /// Self-test mode only: an output other than 0 was left behind before
    /// the machine halted.
    #[error("self-test produced {output} after {op}")]
    SelfTestFailure { output: Word, op: Op },
}
