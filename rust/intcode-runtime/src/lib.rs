//! Cooperative orchestration of multiple Intcode machines.
//!
//! Execution is single-threaded: machines are multiplexed by explicit
//! round-robin scheduling, suspending only at whole-instruction boundaries
//! via the machine's [`StepResult`](intcode_vm::StepResult) contract. All
//! cross-machine traffic flows through the scheduler — one machine's output
//! log is read here and appended to another's input queue; no state is ever
//! shared.
//!
//! Three scheduling policies cover the observed compositions:
//!
//! * [`pipeline::run_pipeline`] — stages run to completion in sequence.
//! * [`ring::run_feedback_ring`] — a fixed cyclic order with round-robin
//!   ferrying until every machine halts.
//! * [`network::Network`] — address-routed packet switching with a
//!   broadcast register and two termination contracts.
#![warn(clippy::all)]

pub mod network;
pub mod pipeline;
pub mod ring;

pub use network::{Network, Packet, BROADCAST_ADDRESS};
pub use pipeline::run_pipeline;
pub use ring::run_feedback_ring;

use thiserror::Error;

/// Errors surfaced by the scheduling policies.
///
/// A fatal machine fault terminates the whole orchestrated run; there is
/// no partial recovery.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error(transparent)]
    Vm(#[from] intcode_vm::VmError),

    /// A stage halted without ever producing an output.
    #[error("machine {index} halted without producing output")]
    NoOutput { index: usize },

    /// A policy was asked to schedule zero machines.
    #[error("scheduling policy requires at least one machine")]
    NoMachines,

    /// A packet named a destination that is neither a node address nor the
    /// broadcast address.
    #[error("packet addressed to unknown node {address}")]
    UnknownAddress { address: i64 },

    /// Every node went idle before any broadcast packet was captured, so
    /// no replay can restore forward progress.
    #[error("network fully idle with no broadcast packet to replay")]
    IdleWithoutBroadcast,
}
