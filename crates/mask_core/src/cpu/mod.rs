//! The machine itself: registers, program counter and the dispatch loop.

pub mod opcode;

use mask_asm::Register;
use mask_util::word;

use crate::image::Image;
use crate::mem::{Memory, PROGRAM_SEGMENT};
use crate::Exception;

use thiserror::Error;

use std::io::{self, Read, Write};

pub use opcode::Opcode;

/// What stopped the dispatch loop before the program halted on its own.
#[derive(Error, Debug)]
pub enum Trap {
    #[error("{0}")]
    Exception(#[from] Exception),

    #[error("i/o channel failure: {0}")]
    Io(#[from] io::Error),
}

/// Machine state, generic over the two byte channels it talks to. Registers and the
/// program counter are only ever written by the opcode handlers.
pub struct Cpu<I, O> {
    /// The eight general purpose registers, all starting at zero.
    registers: [u32; 8],
    /// Index in the program segment of the next instruction to execute. A full word: it
    /// wraps at 2^32 instead of overflowing, though no program can rely on reaching that
    /// edge.
    pc: u32,
    halted: bool,
    pub(crate) memory: Memory,
    input: I,
    pub(crate) output: O,
}

impl<I: Read, O: Write> Cpu<I, O> {
    /// Create a machine executing `program`, reading bytes from `input` and writing
    /// bytes to `output`.
    ///
    /// The program segment is allocated through the ordinary mapping path; on a fresh
    /// store that returns identifier 0.
    pub fn new(program: &Image, input: I, output: O) -> Self {
        let mut memory = Memory::new();

        let seg = memory.map(program.word_count());
        debug_assert_eq!(seg, PROGRAM_SEGMENT);

        let mut data = program.bytes();
        for offset in 0..program.word_count() {
            let value = word::read_word(&mut data).expect("image length is validated");
            memory
                .store(seg, offset, value)
                .expect("segment sized to the image");
        }

        debug!("loaded program of {} words", program.word_count());

        Cpu {
            registers: [0x0; 8],
            pc: 0x0,
            halted: false,
            memory,
            input,
            output,
        }
    }

    /// True once the program has executed its halt instruction.
    pub fn halted(&self) -> bool {
        self.halted
    }

    pub fn read_reg(&self, reg: Register) -> u32 {
        self.registers[reg.0 as usize]
    }

    fn set_reg(&mut self, reg: Register, value: u32) {
        self.registers[reg.0 as usize] = value;
    }

    /// Fetch and execute the next instruction.
    pub fn step(&mut self) -> Result<(), Trap> {
        let ins = Opcode::new(self.memory.load(PROGRAM_SEGMENT, self.pc)?);
        if log_enabled!(log::Level::Trace) {
            trace!("{:08x}: {}", self.pc, ins);
        }
        self.pc = self.pc.wrapping_add(1);
        self.exec(ins)
    }

    /// Run the dispatch loop until the program halts, then flush the output channel.
    pub fn run(&mut self) -> Result<(), Trap> {
        while !self.halted {
            self.step()?;
        }
        self.output.flush()?;
        Ok(())
    }

    /// Execute one decoded instruction.
    fn exec(&mut self, op: Opcode) -> Result<(), Trap> {
        match op.op() {
            0x0 => self.op_cmov(op),
            0x1 => self.op_sload(op)?,
            0x2 => self.op_sstore(op)?,
            0x3 => self.op_add(op),
            0x4 => self.op_mul(op),
            0x5 => self.op_div(op)?,
            0x6 => self.op_nand(op),
            0x7 => self.op_halt(),
            0x8 => self.op_map(op),
            0x9 => self.op_unmap(op)?,
            0xa => self.op_out(op)?,
            0xb => self.op_in(op)?,
            0xc => self.op_loadp(op)?,
            0xd => self.op_loadv(op),
            num => return Err(Exception::ReservedOpcode(num).into()),
        }
        Ok(())
    }
}

/// Opcode handlers.
impl<I: Read, O: Write> Cpu<I, O> {
    /// CMOV - Conditional move.
    fn op_cmov(&mut self, op: Opcode) {
        if self.read_reg(op.c()) != 0 {
            self.set_reg(op.a(), self.read_reg(op.b()));
        }
    }

    /// SLOAD - Load a word from a segment.
    fn op_sload(&mut self, op: Opcode) -> Result<(), Trap> {
        let value = self.memory.load(self.read_reg(op.b()), self.read_reg(op.c()))?;
        self.set_reg(op.a(), value);
        Ok(())
    }

    /// SSTORE - Store a word into a segment.
    fn op_sstore(&mut self, op: Opcode) -> Result<(), Trap> {
        let value = self.read_reg(op.c());
        self.memory.store(self.read_reg(op.a()), self.read_reg(op.b()), value)?;
        Ok(())
    }

    /// ADD - Addition modulo 2^32.
    fn op_add(&mut self, op: Opcode) {
        let value = self.read_reg(op.b()).wrapping_add(self.read_reg(op.c()));
        self.set_reg(op.a(), value);
    }

    /// MUL - Multiplication modulo 2^32.
    fn op_mul(&mut self, op: Opcode) {
        let value = self.read_reg(op.b()).wrapping_mul(self.read_reg(op.c()));
        self.set_reg(op.a(), value);
    }

    /// DIV - Unsigned division, rounding down.
    fn op_div(&mut self, op: Opcode) -> Result<(), Trap> {
        let lhs = self.read_reg(op.b());
        let rhs = self.read_reg(op.c());
        if rhs == 0 {
            return Err(Exception::DivideByZero.into());
        }
        self.set_reg(op.a(), lhs / rhs);
        Ok(())
    }

    /// NAND - Bitwise not-and.
    fn op_nand(&mut self, op: Opcode) {
        let value = !(self.read_reg(op.b()) & self.read_reg(op.c()));
        self.set_reg(op.a(), value);
    }

    /// HALT - Stop the machine at the end of the current step.
    fn op_halt(&mut self) {
        self.halted = true;
    }

    /// MAP - Allocate a segment of C words and place its identifier in B.
    fn op_map(&mut self, op: Opcode) {
        let id = self.memory.map(self.read_reg(op.c()));
        self.set_reg(op.b(), id);
    }

    /// UNMAP - Free the segment identified by C.
    fn op_unmap(&mut self, op: Opcode) -> Result<(), Trap> {
        self.memory.unmap(self.read_reg(op.c()))?;
        Ok(())
    }

    /// OUT - Write the low byte of C to the output channel.
    fn op_out(&mut self, op: Opcode) -> Result<(), Trap> {
        let byte = self.read_reg(op.c()) as u8;
        self.output.write_all(&[byte])?;
        Ok(())
    }

    /// IN - Read one byte from the input channel into C. End of input loads all ones.
    fn op_in(&mut self, op: Opcode) -> Result<(), Trap> {
        let mut byte = [0];
        let value = match self.input.read_exact(&mut byte) {
            Ok(()) => byte[0].into(),
            Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => u32::MAX,
            Err(err) => return Err(err.into()),
        };
        self.set_reg(op.c(), value);
        Ok(())
    }

    /// LOADP - Install a copy of the segment identified by B as the program, then jump
    /// to the offset in C. When B is the program segment itself nothing is duplicated;
    /// the instruction is a plain jump.
    fn op_loadp(&mut self, op: Opcode) -> Result<(), Trap> {
        let source = self.read_reg(op.b());
        if source != PROGRAM_SEGMENT {
            let copy = self.memory.duplicate(source)?;
            self.memory.replace(PROGRAM_SEGMENT, copy)?;
            trace!("program replaced from segment {}", source);
        }
        self.pc = self.read_reg(op.c());
        Ok(())
    }

    /// LOADV - Load a 25-bit constant into a register.
    fn op_loadv(&mut self, op: Opcode) {
        self.set_reg(op.imm_reg(), op.imm());
    }
}
