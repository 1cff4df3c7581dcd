//! Intcode VM — an integer-array virtual machine with position, immediate,
//! and relative addressing, zero-extended memory, and a cooperative
//! suspension contract for input starvation.
#![warn(clippy::all)]

pub mod decode;
pub mod error;
pub mod machine;
pub mod memory;
pub mod program;

pub use error::VmError;
pub use machine::{Machine, StepResult};
pub use program::{ParseError, Program};
