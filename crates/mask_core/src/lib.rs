#[macro_use]
extern crate log;

#[cfg(test)]
mod test;

pub mod cpu;
pub mod image;
pub mod mem;

pub use cpu::{Cpu, Trap};
pub use image::{Image, ImageError};
pub use mem::Memory;

use thiserror::Error;

/// Faults raised by the running program.
///
/// The architecture leaves all of these undefined. This machine stops with a diagnostic
/// when one is raised rather than continue with state the program never defined.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exception {
    #[error("access to unmapped segment {0}")]
    Unmapped(u32),

    #[error("access to word {offset} of segment {id}, which holds {len} words")]
    OutOfBounds { id: u32, offset: u32, len: u32 },

    #[error("the program segment cannot be unmapped")]
    UnmapProgram,

    #[error("division by zero")]
    DivideByZero,

    #[error("reserved opcode {0}")]
    ReservedOpcode(u32),
}
