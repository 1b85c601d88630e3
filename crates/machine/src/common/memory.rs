//! Bounds-checked fixed-size storage.
//!
//! This module implements the storage shared by the register file and RAM. It provides:
//! 1. **Index Origins:** Each address space declares where its valid indices start
//!    (`R1` for registers, `M0` for RAM).
//! 2. **Bounds Checking:** Out-of-range accesses raise the fault kind of the address space.
//! 3. **Reset:** Clearing every cell back to zero.

use std::cell::RefCell;
use std::fmt;
use std::marker::PhantomData;
use std::rc::Rc;

use super::constants::{RAM_ORIGIN, REGISTER_ORIGIN};
use super::error::{ConfigError, Fault};
use super::types::{Number, Wide};

/// An address space: its index origin and the fault raised outside its bounds.
pub trait Space {
    /// Index of the first cell.
    const ORIGIN: Number;

    /// Name used in configuration faults.
    const NAME: &'static str;

    /// Builds the fault reported for an out-of-range `index`.
    fn out_of_range(index: Number) -> Fault;
}

/// Register ids, starting at `R1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegisterSpace;

impl Space for RegisterSpace {
    const ORIGIN: Number = REGISTER_ORIGIN;
    const NAME: &'static str = "register file";

    fn out_of_range(index: Number) -> Fault {
        Fault::InvalidRegister(index)
    }
}

/// RAM addresses, starting at `M0`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddressSpace;

impl Space for AddressSpace {
    const ORIGIN: Number = RAM_ORIGIN;
    const NAME: &'static str = "RAM";

    fn out_of_range(index: Number) -> Fault {
        Fault::InvalidAddress(index)
    }
}

/// Fixed-length array of cells indexed from `S::ORIGIN`.
///
/// The length is fixed at construction and always positive.
#[derive(Clone, PartialEq, Eq)]
pub struct Memory<S: Space> {
    cells: Vec<Number>,
    space: PhantomData<S>,
}

/// The CPU register file (`R1`..).
pub type RegisterSet = Memory<RegisterSpace>;

/// Flat main memory (`M0`..).
pub type Ram = Memory<AddressSpace>;

/// RAM shared between a computer and the CPU bound to it.
pub type SharedRam = Rc<RefCell<Ram>>;

impl<S: Space> Memory<S> {
    /// Creates a zero-filled memory of `size` cells.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidSize`] when `size` is not positive.
    pub fn new(size: Number) -> Result<Self, ConfigError> {
        if size <= 0 {
            return Err(ConfigError::InvalidSize {
                what: S::NAME,
                size,
            });
        }
        Ok(Self {
            cells: vec![0; size as usize],
            space: PhantomData,
        })
    }

    /// Maps `index` to a slot, checking it against the bounds.
    fn slot(&self, index: Number) -> Result<usize, Fault> {
        let aligned = Wide::from(index) - Wide::from(S::ORIGIN);
        if aligned < 0 || aligned >= self.cells.len() as Wide {
            return Err(S::out_of_range(index));
        }
        Ok(aligned as usize)
    }

    /// Reads the cell at `index`.
    ///
    /// # Errors
    ///
    /// Returns the address space's out-of-range fault.
    pub fn load(&self, index: Number) -> Result<Number, Fault> {
        let slot = self.slot(index)?;
        Ok(self.cells[slot])
    }

    /// Writes `value` to the cell at `index`.
    ///
    /// # Errors
    ///
    /// Returns the address space's out-of-range fault; no cell is modified.
    pub fn store(&mut self, index: Number, value: Number) -> Result<(), Fault> {
        let slot = self.slot(index)?;
        self.cells[slot] = value;
        Ok(())
    }

    /// Resets every cell to zero.
    pub fn clear(&mut self) {
        self.cells.fill(0);
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false`: a memory has at least one cell.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// First valid index.
    pub const fn first_index(&self) -> Number {
        S::ORIGIN
    }

    /// Last valid index.
    pub fn last_index(&self) -> Number {
        (Wide::from(S::ORIGIN) + self.cells.len() as Wide - 1) as Number
    }

    /// Raw view of the cells, in index order.
    pub fn as_slice(&self) -> &[Number] {
        &self.cells
    }
}

impl<S: Space> fmt::Debug for Memory<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Memory")
            .field("space", &S::NAME)
            .field("origin", &S::ORIGIN)
            .field("cells", &self.cells)
            .finish()
    }
}
