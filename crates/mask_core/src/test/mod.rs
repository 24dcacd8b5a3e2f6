mod mem;

use crate::cpu::{Cpu, Trap};
use crate::image::Image;

use mask_asm::{assemble, Ins};

use std::io::Cursor;

type TestCpu = Cpu<Cursor<Vec<u8>>, Vec<u8>>;

fn build(program: &[Ins]) -> Image {
    let code = match assemble(program) {
        Ok(code) => code,
        Err(error) => panic!("{error}"),
    };
    Image::from_bytes(code).expect("assembled images are whole words")
}

/// Assemble `program` and run it to halt with `input` on the input channel. The machine
/// is returned with everything it wrote still in its output channel.
pub fn run_program(program: &[Ins], input: &[u8]) -> TestCpu {
    let image = build(program);
    let mut cpu = Cpu::new(&image, Cursor::new(input.to_vec()), Vec::new());
    if let Err(trap) = cpu.run() {
        panic!("{trap}");
    }
    cpu
}

/// Same as [`run_program`] with nothing on the input channel.
pub fn run_code(program: &[Ins]) -> TestCpu {
    run_program(program, b"")
}

/// Assemble `program` and run it until it traps.
pub fn run_expect_trap(program: &[Ins]) -> Trap {
    let image = build(program);
    let mut cpu = Cpu::new(&image, Cursor::new(Vec::new()), Vec::new());
    match cpu.run() {
        Ok(()) => panic!("program halted without trapping"),
        Err(trap) => trap,
    }
}
