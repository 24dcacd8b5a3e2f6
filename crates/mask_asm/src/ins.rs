use std::fmt;

/// One of the eight machine registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Register(pub u8);

impl From<u32> for Register {
    fn from(val: u32) -> Self {
        Register(val as u8)
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "r{}", self.0)
    }
}

impl Register {
    pub const R0: Register = Register(0);
    pub const R1: Register = Register(1);
    pub const R2: Register = Register(2);
    pub const R3: Register = Register(3);
    pub const R4: Register = Register(4);
    pub const R5: Register = Register(5);
    pub const R6: Register = Register(6);
    pub const R7: Register = Register(7);
}

/// A single machine instruction. The first register of a three-register variant is A,
/// the second B and the third C, matching the bit-fields they are encoded into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ins {
    /// A takes the value of B when C is non-zero.
    Cmov(Register, Register, Register),
    /// A takes the word at offset C of the segment identified by B.
    SegLoad(Register, Register, Register),
    /// The word at offset B of the segment identified by A takes the value of C.
    SegStore(Register, Register, Register),
    Add(Register, Register, Register),
    Mul(Register, Register, Register),
    Div(Register, Register, Register),
    Nand(Register, Register, Register),
    Halt,
    /// Map a segment of C words; its identifier lands in B.
    Map(Register, Register),
    /// Unmap the segment identified by C.
    Unmap(Register),
    /// Write the low byte of C to the output channel.
    Out(Register),
    /// Read one byte from the input channel into C.
    In(Register),
    /// Install a copy of the segment identified by B as the program, then jump to the
    /// offset in C.
    LoadProg(Register, Register),
    /// A takes a 25-bit constant.
    LoadVal(Register, u32),
}
