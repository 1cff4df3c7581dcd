//! Packet-routed network of machines with a single-slot broadcast register.

use intcode_vm::{Machine, Program};

use crate::ScheduleError;

/// Destination address reserved for the broadcast register.
pub const BROADCAST_ADDRESS: i64 = 255;

/// Sentinel fed to a node whose input queue is empty, so a node waiting on
/// traffic can observe "no packet" and keep making progress.
const NO_PACKET: i64 = -1;

/// An `(x, y)` payload routed between nodes or into the broadcast register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Packet {
    pub x: i64,
    pub y: i64,
}

/// A fixed-size network of identical machines, addressed `0..size`.
///
/// Each node is seeded its own address as its first input. Scheduling is
/// strict round-robin, one node per turn: feed the `-1` sentinel if the
/// queue is empty, run until blocked or halted, then route the
/// node's accumulated output as `(destination, x, y)` triples. A triple
/// addressed to [`BROADCAST_ADDRESS`] lands in the broadcast register
/// (latest wins) instead of any queue.
///
/// Only whole triples are drained from a node's output log; a trailing
/// partial triple survives until the node's next turn rather than being
/// discarded mid-packet.
pub struct Network {
    nodes: Vec<Machine>,
    broadcast: Option<Packet>,
}

impl Network {
    /// Build `size` machines from one listing, each seeded its address.
    pub fn new(program: &Program, size: usize) -> Self {
        let nodes = (0..size)
            .map(|address| Machine::with_inputs(program, [address as i64]))
            .collect();
        Network {
            nodes,
            broadcast: None,
        }
    }

    pub fn size(&self) -> usize {
        self.nodes.len()
    }

    /// Latest packet captured by the broadcast register.
    pub fn broadcast(&self) -> Option<Packet> {
        self.broadcast
    }

    /// Run until the first packet addressed to the broadcast register and
    /// return it.
    pub fn run_until_first_broadcast(&mut self) -> Result<Packet, ScheduleError> {
        if self.nodes.is_empty() {
            return Err(ScheduleError::NoMachines);
        }
        let mut cursor = 0;
        loop {
            if let Some(packet) = self.service(cursor)? {
                return Ok(packet);
            }
            cursor = (cursor + 1) % self.nodes.len();
        }
    }

    /// Run until the network settles twice on the same broadcast `y`.
    ///
    /// A node is considered idle when its queue is empty at its latest
    /// visit. Once every node is simultaneously idle, the held broadcast
    /// packet is replayed into node 0's queue and scheduling resumes from
    /// node 0. Returns `y` the first time two consecutive idle-triggered
    /// replays carry the same `y` value.
    pub fn run_until_repeated_idle_broadcast(&mut self) -> Result<i64, ScheduleError> {
        if self.nodes.is_empty() {
            return Err(ScheduleError::NoMachines);
        }
        let count = self.nodes.len();
        let mut idle = vec![false; count];
        let mut last_replayed: Option<i64> = None;
        let mut cursor = 0;
        loop {
            idle[cursor] = !self.nodes[cursor].has_pending_input();
            self.service(cursor)?;
            cursor = (cursor + 1) % count;

            if idle.iter().all(|&flag| flag) {
                let packet = self.broadcast.ok_or(ScheduleError::IdleWithoutBroadcast)?;
                if last_replayed == Some(packet.y) {
                    return Ok(packet.y);
                }
                self.nodes[0].push_input(packet.x);
                self.nodes[0].push_input(packet.y);
                last_replayed = Some(packet.y);
                idle[0] = false;
                cursor = 0;
            }
        }
    }

    /// Give node `index` one scheduling turn and route what it produced.
    /// Returns the first broadcast packet captured during this turn, if
    /// any.
    fn service(&mut self, index: usize) -> Result<Option<Packet>, ScheduleError> {
        let node = &mut self.nodes[index];
        if !node.has_pending_input() {
            node.push_input(NO_PACKET);
        }
        node.run_until_blocked_or_halt()?;

        let whole = node.output().len() - node.output().len() % 3;
        let values = node.drain_output(whole);

        let mut first_broadcast = None;
        for triple in values.chunks_exact(3) {
            let (dest, packet) = (
                triple[0],
                Packet {
                    x: triple[1],
                    y: triple[2],
                },
            );
            if dest == BROADCAST_ADDRESS {
                self.broadcast = Some(packet);
                first_broadcast.get_or_insert(packet);
            } else {
                let slot = usize::try_from(dest)
                    .ok()
                    .filter(|&addr| addr < self.nodes.len())
                    .ok_or(ScheduleError::UnknownAddress { address: dest })?;
                self.nodes[slot].push_input(packet.x);
                self.nodes[slot].push_input(packet.y);
            }
        }
        Ok(first_broadcast)
    }
}
