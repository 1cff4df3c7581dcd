//! Feedback ring: machines in a fixed cycle, each draining into the next.

use intcode_vm::{Machine, Program};

use crate::ScheduleError;

/// Run one machine per phase in the cyclic order `0 → 1 → … → n-1 → 0`.
///
/// Every machine is seeded its phase; machine 0 additionally receives
/// `seed` before the first cycle. Each turn runs the current machine until
/// it blocks or halts, then appends every output produced since its
/// previous turn — in production order — to its successor's input queue.
/// Terminates once all machines have halted; the answer is the last output
/// of the final machine in the ring.
///
/// Output logs stay append-only here: ferry progress is tracked with a
/// per-machine cursor instead of draining, so the final machine's full
/// history remains readable when the ring settles.
pub fn run_feedback_ring(
    program: &Program,
    phases: &[i64],
    seed: i64,
) -> Result<i64, ScheduleError> {
    if phases.is_empty() {
        return Err(ScheduleError::NoMachines);
    }
    let mut machines: Vec<Machine> = phases
        .iter()
        .map(|&phase| Machine::with_inputs(program, [phase]))
        .collect();
    machines[0].push_input(seed);

    let count = machines.len();
    let mut ferried = vec![0usize; count];
    let mut current = 0;
    while !machines.iter().all(Machine::is_halted) {
        machines[current].run_until_blocked_or_halt()?;
        let fresh: Vec<i64> = machines[current].output()[ferried[current]..].to_vec();
        ferried[current] += fresh.len();
        let next = (current + 1) % count;
        for value in fresh {
            machines[next].push_input(value);
        }
        current = next;
    }
    machines[count - 1]
        .last_output()
        .ok_or(ScheduleError::NoOutput { index: count - 1 })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(listing: &str) -> Program {
        listing.parse().expect("fixture should parse")
    }

    #[test]
    fn single_pass_ring_concatenates_phases() {
        // Each machine computes signal * 10 + phase and halts, so one trip
        // around the ring yields the phase digits in visit order.
        let program = parse("3,15,3,16,1002,16,10,16,1,16,15,15,4,15,99,0,0");
        assert_eq!(
            run_feedback_ring(&program, &[9, 8, 7, 6, 5], 0).unwrap(),
            98765
        );
    }

    #[test]
    fn looping_ring_converges_139629729() {
        let program = parse(
            "3,26,1001,26,-4,26,3,27,1002,27,2,27,1,27,26,27,4,27,1001,28,-1,28,\
             1005,28,6,99,0,0,5",
        );
        assert_eq!(
            run_feedback_ring(&program, &[9, 8, 7, 6, 5], 0).unwrap(),
            139629729
        );
    }

    #[test]
    fn looping_ring_converges_18216() {
        let program = parse(
            "3,52,1001,52,-5,52,3,53,1,52,56,54,1007,54,5,55,1005,55,26,1001,54,\
             -5,54,1105,1,12,1,53,54,53,1008,54,0,55,1001,55,1,55,2,53,55,53,4,\
             53,1001,56,-1,56,1005,56,6,99,0,0,0,0,10",
        );
        assert_eq!(
            run_feedback_ring(&program, &[9, 7, 8, 5, 6], 0).unwrap(),
            18216
        );
    }

    #[test]
    fn empty_ring_is_rejected() {
        let program = parse("99");
        assert_eq!(
            run_feedback_ring(&program, &[], 0),
            Err(ScheduleError::NoMachines)
        );
    }
}
