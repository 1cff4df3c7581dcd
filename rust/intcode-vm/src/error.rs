//! Fatal execution faults.

use thiserror::Error;

/// Errors raised while executing a machine.
///
/// Every variant is a program-integrity fault: none is recoverable at the
/// machine level, and an orchestrator must propagate it and terminate the
/// whole run. Input starvation is *not* an error — it is reported through
/// [`StepResult::NeedsInput`](crate::machine::StepResult).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VmError {
    /// The low two decimal digits of the instruction word name no operation.
    #[error("invalid opcode {opcode} at address {at}")]
    InvalidOpcode { opcode: i64, at: usize },

    /// A parameter-mode digit outside {0, 1, 2}.
    #[error("invalid parameter mode {mode} in instruction word {word} at address {at}")]
    InvalidMode { mode: i64, word: i64, at: usize },

    /// A destination parameter resolved to immediate mode.
    #[error("illegal write through an immediate-mode parameter at address {at}")]
    IllegalWrite { at: usize },

    /// A parameter or jump target resolved to a negative memory address.
    #[error("negative memory address {address} resolved at address {at}")]
    NegativeAddress { address: i64, at: usize },

    /// A run-to-completion loop hit an input instruction with nothing
    /// queued and no way for more input to arrive.
    #[error("input queue exhausted at address {at}")]
    InputExhausted { at: usize },
}
