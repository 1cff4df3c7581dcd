//! The execution engine: fetch, decode, execute over zero-extended memory.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::decode::{Instruction, Mode, Opcode};
use crate::error::VmError;
use crate::memory::Memory;
use crate::program::Program;

/// Outcome of attempting one instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepResult {
    /// The instruction executed and the machine can continue.
    Continued,
    /// The next instruction is an input read and the queue is empty.
    /// Nothing was consumed or advanced; append input and step again.
    NeedsInput,
    /// The halt instruction executed, or had executed earlier.
    Halted,
}

/// A single Intcode machine.
///
/// Owns its memory, instruction pointer, relative base, input queue, and
/// output log outright. Machines never share state; an orchestrator moves
/// values between queues explicitly. The whole state is serializable, so a
/// machine can be snapshotted mid-run and restored without disturbing
/// execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Machine {
    memory: Memory,
    pointer: usize,
    relative_base: i64,
    inputs: VecDeque<i64>,
    output: Vec<i64>,
    halted: bool,
}

impl Machine {
    /// Build a machine from a program listing with an empty input queue.
    pub fn new(program: &Program) -> Self {
        Machine {
            memory: Memory::new(program.cells().to_vec()),
            pointer: 0,
            relative_base: 0,
            inputs: VecDeque::new(),
            output: Vec::new(),
            halted: false,
        }
    }

    /// Build a machine with an initial input sequence already queued.
    pub fn with_inputs(program: &Program, inputs: impl IntoIterator<Item = i64>) -> Self {
        let mut machine = Machine::new(program);
        machine.inputs.extend(inputs);
        machine
    }

    /// Append one value to the input queue (FIFO).
    pub fn push_input(&mut self, value: i64) {
        self.inputs.push_back(value);
    }

    pub fn has_pending_input(&self) -> bool {
        !self.inputs.is_empty()
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn pointer(&self) -> usize {
        self.pointer
    }

    pub fn relative_base(&self) -> i64 {
        self.relative_base
    }

    /// The append-only output log.
    pub fn output(&self) -> &[i64] {
        &self.output
    }

    pub fn last_output(&self) -> Option<i64> {
        self.output.last().copied()
    }

    /// Remove and return the whole output log.
    pub fn take_output(&mut self) -> Vec<i64> {
        std::mem::take(&mut self.output)
    }

    /// Remove and return the first `count` logged values, truncated to the
    /// log length. Later values keep their order.
    pub fn drain_output(&mut self, count: usize) -> Vec<i64> {
        let count = count.min(self.output.len());
        self.output.drain(..count).collect()
    }

    /// Read a memory cell directly (e.g. the result cell after a run).
    pub fn peek(&self, addr: usize) -> i64 {
        self.memory.read(addr)
    }

    /// Overwrite a memory cell directly (e.g. noun/verb patching before a
    /// run).
    pub fn poke(&mut self, addr: usize, value: i64) {
        self.memory.write(addr, value);
    }

    /// Execute one instruction.
    ///
    /// Suspension happens only here, whole-instruction at a time: an input
    /// opcode over an empty queue returns [`StepResult::NeedsInput`] before
    /// any state changes, so retrying after appending input behaves exactly
    /// as if the value had been present all along.
    pub fn step(&mut self) -> Result<StepResult, VmError> {
        if self.halted {
            return Ok(StepResult::Halted);
        }
        let word = self.memory.read(self.pointer);
        let instr = Instruction::decode(word, self.pointer)?;
        match instr.opcode {
            Opcode::Add => {
                let a = self.read_param(&instr, 0)?;
                let b = self.read_param(&instr, 1)?;
                self.write_param(&instr, 2, a + b)?;
                self.pointer += 4;
            }
            Opcode::Mul => {
                let a = self.read_param(&instr, 0)?;
                let b = self.read_param(&instr, 1)?;
                self.write_param(&instr, 2, a * b)?;
                self.pointer += 4;
            }
            Opcode::Input => {
                let Some(value) = self.inputs.front().copied() else {
                    return Ok(StepResult::NeedsInput);
                };
                // Resolve the destination before consuming, so a fatal
                // write fault leaves the queue intact.
                self.write_param(&instr, 0, value)?;
                self.inputs.pop_front();
                self.pointer += 2;
            }
            Opcode::Output => {
                let value = self.read_param(&instr, 0)?;
                self.output.push(value);
                self.pointer += 2;
            }
            Opcode::JumpIfTrue => {
                let condition = self.read_param(&instr, 0)?;
                let target = self.read_param(&instr, 1)?;
                if condition != 0 {
                    self.pointer = self.to_addr(target)?;
                } else {
                    self.pointer += 3;
                }
            }
            Opcode::JumpIfFalse => {
                let condition = self.read_param(&instr, 0)?;
                let target = self.read_param(&instr, 1)?;
                if condition == 0 {
                    self.pointer = self.to_addr(target)?;
                } else {
                    self.pointer += 3;
                }
            }
            Opcode::LessThan => {
                let a = self.read_param(&instr, 0)?;
                let b = self.read_param(&instr, 1)?;
                self.write_param(&instr, 2, i64::from(a < b))?;
                self.pointer += 4;
            }
            Opcode::Equals => {
                let a = self.read_param(&instr, 0)?;
                let b = self.read_param(&instr, 1)?;
                self.write_param(&instr, 2, i64::from(a == b))?;
                self.pointer += 4;
            }
            Opcode::AdjustBase => {
                self.relative_base += self.read_param(&instr, 0)?;
                self.pointer += 2;
            }
            Opcode::Halt => {
                self.halted = true;
                return Ok(StepResult::Halted);
            }
        }
        Ok(StepResult::Continued)
    }

    /// Step until the halt instruction executes.
    ///
    /// Input starvation is a caller error here: nothing else can feed the
    /// queue, so it surfaces as [`VmError::InputExhausted`].
    pub fn run_to_completion(&mut self) -> Result<(), VmError> {
        loop {
            match self.step()? {
                StepResult::Continued => {}
                StepResult::Halted => return Ok(()),
                StepResult::NeedsInput => {
                    return Err(VmError::InputExhausted { at: self.pointer })
                }
            }
        }
    }

    /// Step until one new value lands in the output log, returning it, or
    /// `None` if the machine halts first.
    pub fn run_until_output_or_halt(&mut self) -> Result<Option<i64>, VmError> {
        let seen = self.output.len();
        loop {
            match self.step()? {
                StepResult::Continued => {
                    if self.output.len() > seen {
                        return Ok(self.last_output());
                    }
                }
                StepResult::Halted => return Ok(None),
                StepResult::NeedsInput => {
                    return Err(VmError::InputExhausted { at: self.pointer })
                }
            }
        }
    }

    /// Step until input starvation or halt — the basis for cooperative
    /// round-robin scheduling. Returns [`StepResult::NeedsInput`] or
    /// [`StepResult::Halted`], never `Continued`.
    pub fn run_until_blocked_or_halt(&mut self) -> Result<StepResult, VmError> {
        loop {
            match self.step()? {
                StepResult::Continued => {}
                blocked_or_halted => return Ok(blocked_or_halted),
            }
        }
    }

    fn read_param(&self, instr: &Instruction, slot: usize) -> Result<i64, VmError> {
        let raw = self.memory.read(self.pointer + 1 + slot);
        match instr.mode(slot) {
            Mode::Immediate => Ok(raw),
            Mode::Position => Ok(self.memory.read(self.to_addr(raw)?)),
            Mode::Relative => Ok(self.memory.read(self.to_addr(raw + self.relative_base)?)),
        }
    }

    fn write_param(&mut self, instr: &Instruction, slot: usize, value: i64) -> Result<(), VmError> {
        let raw = self.memory.read(self.pointer + 1 + slot);
        let addr = match instr.mode(slot) {
            Mode::Immediate => return Err(VmError::IllegalWrite { at: self.pointer }),
            Mode::Position => self.to_addr(raw)?,
            Mode::Relative => self.to_addr(raw + self.relative_base)?,
        };
        self.memory.write(addr, value);
        Ok(())
    }

    fn to_addr(&self, value: i64) -> Result<usize, VmError> {
        usize::try_from(value).map_err(|_| VmError::NegativeAddress {
            address: value,
            at: self.pointer,
        })
    }
}
