//! Zero-extended machine memory.

use serde::{Deserialize, Serialize};

/// Flat integer memory, index-addressed from zero.
///
/// Reads past the end observe `0` without touching the backing store;
/// writes past the end grow it, zero-filling every intermediate cell.
/// Growth is geometric so far scattered writes stay amortised-cheap, but
/// logical growth is unbounded — only available storage limits it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Memory {
    cells: Vec<i64>,
}

impl Memory {
    pub fn new(cells: Vec<i64>) -> Self {
        Memory { cells }
    }

    /// Number of physically backed cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Read the cell at `addr`. Out-of-range reads yield `0`.
    pub fn read(&self, addr: usize) -> i64 {
        self.cells.get(addr).copied().unwrap_or(0)
    }

    /// Write `value` at `addr`, growing the store if needed.
    pub fn write(&mut self, addr: usize, value: i64) {
        if addr >= self.cells.len() {
            let target = (addr + 1).max(self.cells.len() * 2);
            self.cells.resize(target, 0);
        }
        self.cells[addr] = value;
    }
}

impl From<Vec<i64>> for Memory {
    fn from(cells: Vec<i64>) -> Self {
        Memory::new(cells)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_read_is_zero_and_does_not_grow() {
        let mem = Memory::new(vec![1, 2, 3]);
        assert_eq!(mem.read(100), 0);
        assert_eq!(mem.len(), 3);
    }

    #[test]
    fn far_write_zero_fills_the_gap() {
        let mut mem = Memory::new(vec![1, 2, 3, 4, 5]);
        mem.write(1000, 42);
        assert_eq!(mem.read(1000), 42);
        for addr in 5..1000 {
            assert_eq!(mem.read(addr), 0);
        }
        // Original cells are untouched.
        assert_eq!(mem.read(0), 1);
        assert_eq!(mem.read(4), 5);
    }

    #[test]
    fn growth_is_at_least_geometric() {
        let mut mem = Memory::new(vec![0; 8]);
        mem.write(8, 1);
        assert!(mem.len() >= 16);
    }

    #[test]
    fn in_range_write_does_not_grow() {
        let mut mem = Memory::new(vec![0; 4]);
        mem.write(2, 9);
        assert_eq!(mem.len(), 4);
        assert_eq!(mem.read(2), 9);
    }
}
