use mask_util::{field, word, FieldError};

use crate::ins::{Ins, Register};
use crate::Error;

/// Encode a three-register instruction: the opcode in bits 28-31 and A, B and C in
/// bits 6-8, 3-5 and 0-2.
fn three_reg(op: u32, a: Register, b: Register, c: Register) -> Result<u32, FieldError> {
    let word = field::pack(0, 4, 28, op)?;
    let word = field::pack(word, 3, 6, a.0.into())?;
    let word = field::pack(word, 3, 3, b.0.into())?;
    field::pack(word, 3, 0, c.0.into())
}

/// Encode a load-immediate instruction: A in bits 25-27 and the constant in bits 0-24.
fn load_val(a: Register, value: u32) -> Result<u32, FieldError> {
    let word = field::pack(0, 4, 28, 0xd)?;
    let word = field::pack(word, 3, 25, a.0.into())?;
    field::pack(word, 25, 0, value)
}

fn encode(ins: Ins) -> Result<u32, FieldError> {
    match ins {
        Ins::Cmov(a, b, c) => three_reg(0x0, a, b, c),
        Ins::SegLoad(a, b, c) => three_reg(0x1, a, b, c),
        Ins::SegStore(a, b, c) => three_reg(0x2, a, b, c),
        Ins::Add(a, b, c) => three_reg(0x3, a, b, c),
        Ins::Mul(a, b, c) => three_reg(0x4, a, b, c),
        Ins::Div(a, b, c) => three_reg(0x5, a, b, c),
        Ins::Nand(a, b, c) => three_reg(0x6, a, b, c),
        Ins::Halt => three_reg(0x7, Register::R0, Register::R0, Register::R0),
        Ins::Map(b, c) => three_reg(0x8, Register::R0, b, c),
        Ins::Unmap(c) => three_reg(0x9, Register::R0, Register::R0, c),
        Ins::Out(c) => three_reg(0xa, Register::R0, Register::R0, c),
        Ins::In(c) => three_reg(0xb, Register::R0, Register::R0, c),
        Ins::LoadProg(b, c) => three_reg(0xc, Register::R0, b, c),
        Ins::LoadVal(a, value) => load_val(a, value),
    }
}

/// Encode `program` as the byte stream the loader consumes: one big-endian word per
/// instruction, in order.
pub fn assemble(program: &[Ins]) -> Result<Vec<u8>, Error> {
    let mut code = Vec::with_capacity(program.len() * 4);
    for (line, ins) in program.iter().enumerate() {
        let encoded = encode(*ins).map_err(|err| Error::new(line, err.to_string()))?;
        word::write_word(&mut code, encoded).expect("writing to a vec does not fail");
    }
    Ok(code)
}

#[test]
fn known_encodings() {
    assert_eq!(encode(Ins::Halt), Ok(0x7000_0000));
    assert_eq!(encode(Ins::Add(Register::R3, Register::R1, Register::R2)), Ok(0x3000_00ca));
    assert_eq!(encode(Ins::Out(Register::R7)), Ok(0xa000_0007));
    assert_eq!(encode(Ins::LoadVal(Register::R1, 42)), Ok(0xd200_002a));
}

#[test]
fn immediate_has_25_bits() {
    assert_eq!(encode(Ins::LoadVal(Register::R0, (1 << 25) - 1)), Ok(0xd1ff_ffff));

    let error = assemble(&[Ins::Halt, Ins::LoadVal(Register::R0, 1 << 25)]).unwrap_err();
    assert!(error.to_string().starts_with("instruction 1"));
}

#[test]
fn big_endian_stream() {
    let code = assemble(&[Ins::Halt, Ins::LoadVal(Register::R1, 42)]).unwrap();
    assert_eq!(code, [0x70, 0x00, 0x00, 0x00, 0xd2, 0x00, 0x00, 0x2a]);
}
