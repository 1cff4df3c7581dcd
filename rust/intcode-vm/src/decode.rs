//! Instruction word decoding: opcode plus per-parameter addressing modes.

use crate::error::VmError;

/// Widest parameter list any opcode declares.
const MAX_PARAMS: usize = 3;

/// Addressing mode of a single instruction parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Operand is `memory[memory[pointer + k]]`.
    #[default]
    Position,
    /// Operand is `memory[pointer + k]` itself. Illegal as a destination.
    Immediate,
    /// Operand is `memory[memory[pointer + k] + relative_base]`.
    Relative,
}

impl Mode {
    fn from_digit(digit: i64, word: i64, at: usize) -> Result<Mode, VmError> {
        match digit {
            0 => Ok(Mode::Position),
            1 => Ok(Mode::Immediate),
            2 => Ok(Mode::Relative),
            mode => Err(VmError::InvalidMode { mode, word, at }),
        }
    }
}

/// Operation selector, the low two decimal digits of an instruction word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    Add,
    Mul,
    Input,
    Output,
    JumpIfTrue,
    JumpIfFalse,
    LessThan,
    Equals,
    AdjustBase,
    Halt,
}

impl Opcode {
    fn from_word(word: i64, at: usize) -> Result<Opcode, VmError> {
        if word < 0 {
            return Err(VmError::InvalidOpcode { opcode: word, at });
        }
        match word % 100 {
            1 => Ok(Opcode::Add),
            2 => Ok(Opcode::Mul),
            3 => Ok(Opcode::Input),
            4 => Ok(Opcode::Output),
            5 => Ok(Opcode::JumpIfTrue),
            6 => Ok(Opcode::JumpIfFalse),
            7 => Ok(Opcode::LessThan),
            8 => Ok(Opcode::Equals),
            9 => Ok(Opcode::AdjustBase),
            99 => Ok(Opcode::Halt),
            opcode => Err(VmError::InvalidOpcode { opcode, at }),
        }
    }

    /// Number of parameter slots the operation declares.
    pub fn param_count(self) -> usize {
        match self {
            Opcode::Add | Opcode::Mul | Opcode::LessThan | Opcode::Equals => 3,
            Opcode::JumpIfTrue | Opcode::JumpIfFalse => 2,
            Opcode::Input | Opcode::Output | Opcode::AdjustBase => 1,
            Opcode::Halt => 0,
        }
    }
}

/// A decoded instruction.
///
/// Derived transiently from the word under the instruction pointer and
/// never stored back into memory. Mode digits are read from the hundreds
/// digit upward; the right-most digit belongs to the first parameter and
/// missing digits default to [`Mode::Position`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    pub opcode: Opcode,
    modes: [Mode; MAX_PARAMS],
}

impl Instruction {
    /// Decode `word` found at address `at` (`at` is used only for error
    /// reporting).
    pub fn decode(word: i64, at: usize) -> Result<Instruction, VmError> {
        let opcode = Opcode::from_word(word, at)?;
        let mut modes = [Mode::Position; MAX_PARAMS];
        let mut digits = word / 100;
        for slot in modes.iter_mut().take(opcode.param_count()) {
            *slot = Mode::from_digit(digits % 10, word, at)?;
            digits /= 10;
        }
        // Digits above the declared slot count carry no meaning; they are
        // unreachable in well-formed programs and left unexamined.
        Ok(Instruction { opcode, modes })
    }

    /// Mode of parameter `slot` (0-based).
    pub fn mode(&self, slot: usize) -> Mode {
        self.modes[slot]
    }

    /// Modes for every declared parameter slot, first parameter first.
    pub fn modes(&self) -> &[Mode] {
        &self.modes[..self.opcode.param_count()]
    }
}
