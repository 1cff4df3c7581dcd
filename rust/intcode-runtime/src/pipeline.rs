//! Sequential pipeline: each stage runs to completion and its final output
//! seeds the next stage's input.

use intcode_vm::{Machine, Program};

use crate::ScheduleError;

/// Run one machine per phase, in order, with no feedback.
///
/// Stage *i* is seeded `[phases[i], signal]`, where `signal` starts at 0
/// and becomes each stage's final output. Returns the last stage's final
/// output. Deterministic; no stage ever blocks on another.
pub fn run_pipeline(program: &Program, phases: &[i64]) -> Result<i64, ScheduleError> {
    if phases.is_empty() {
        return Err(ScheduleError::NoMachines);
    }
    let mut signal = 0;
    for (index, &phase) in phases.iter().enumerate() {
        let mut machine = Machine::with_inputs(program, [phase, signal]);
        machine.run_to_completion()?;
        signal = machine
            .last_output()
            .ok_or(ScheduleError::NoOutput { index })?;
    }
    Ok(signal)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(listing: &str) -> Program {
        listing.parse().expect("fixture should parse")
    }

    #[test]
    fn amplifier_chain_43210() {
        let program = parse("3,15,3,16,1002,16,10,16,1,16,15,15,4,15,99,0,0");
        assert_eq!(run_pipeline(&program, &[4, 3, 2, 1, 0]).unwrap(), 43210);
    }

    #[test]
    fn amplifier_chain_54321() {
        let program = parse(
            "3,23,3,24,1002,24,10,24,1002,23,-1,23,101,5,23,23,1,24,23,23,4,23,99,0,0",
        );
        assert_eq!(run_pipeline(&program, &[0, 1, 2, 3, 4]).unwrap(), 54321);
    }

    #[test]
    fn amplifier_chain_65210() {
        let program = parse(
            "3,31,3,32,1002,32,10,32,1001,31,-2,31,1007,31,0,33,1002,33,7,33,\
             1,33,31,31,1,32,31,31,4,31,99,0,0,0",
        );
        assert_eq!(run_pipeline(&program, &[1, 0, 4, 3, 2]).unwrap(), 65210);
    }

    #[test]
    fn empty_phase_list_is_rejected() {
        let program = parse("99");
        assert_eq!(run_pipeline(&program, &[]), Err(ScheduleError::NoMachines));
    }

    #[test]
    fn silent_stage_is_an_error() {
        // Consumes both inputs, outputs nothing.
        let program = parse("3,0,3,0,99");
        assert_eq!(
            run_pipeline(&program, &[1]),
            Err(ScheduleError::NoOutput { index: 0 })
        );
    }
}
