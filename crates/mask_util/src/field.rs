//! Unsigned bit-fields within a 32-bit word.
//!
//! A field is named by its width and the position of its least significant bit. Bit 0 is
//! the least significant bit of the word.

use thiserror::Error;

/// Ways a field update can be rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    #[error("zero-width field")]
    ZeroWidth,

    #[error("field of width {width} at bit {lsb} reaches outside the word")]
    OutOfRange { width: u32, lsb: u32 },

    #[error("value {value:#x} does not fit in {width} bits")]
    Oversized { value: u32, width: u32 },
}

/// Mask covering `width` bits starting at bit `lsb`.
fn mask(width: u32, lsb: u32) -> u32 {
    (((1_u64 << width) - 1) as u32) << lsb
}

/// Replace the `width` bits of `word` starting at bit `lsb` with `value`.
pub fn pack(word: u32, width: u32, lsb: u32, value: u32) -> Result<u32, FieldError> {
    if width == 0 {
        return Err(FieldError::ZeroWidth);
    }
    if width + lsb > 32 {
        return Err(FieldError::OutOfRange { width, lsb });
    }
    if u64::from(value) >> width != 0 {
        return Err(FieldError::Oversized { value, width });
    }
    Ok((word & !mask(width, lsb)) | (value << lsb))
}

/// The unsigned value of the `width` bits of `word` starting at bit `lsb`.
///
/// Unlike [`pack`], this never fails: a field reaching outside the word is a bug in the
/// caller and is only checked in debug builds.
pub fn unpack(word: u32, width: u32, lsb: u32) -> u32 {
    debug_assert!(width != 0 && width + lsb <= 32);
    (word & mask(width, lsb)) >> lsb
}

#[test]
fn roundtrip() {
    let word = pack(0, 4, 28, 0xd).unwrap();
    let word = pack(word, 3, 25, 0x5).unwrap();
    let word = pack(word, 25, 0, 0x00ff_ffff).unwrap();

    assert_eq!(unpack(word, 4, 28), 0xd);
    assert_eq!(unpack(word, 3, 25), 0x5);
    assert_eq!(unpack(word, 25, 0), 0x00ff_ffff);
}

#[test]
fn surrounding_bits_survive() {
    let word = pack(0xffff_ffff, 8, 8, 0).unwrap();
    assert_eq!(word, 0xffff_00ff);

    let word = pack(word, 8, 8, 0xab).unwrap();
    assert_eq!(word, 0xffff_abff);
}

#[test]
fn whole_word_field() {
    let word = pack(0xdead_beef, 32, 0, 0x0102_0304).unwrap();
    assert_eq!(word, 0x0102_0304);
    assert_eq!(unpack(word, 32, 0), 0x0102_0304);
}

#[test]
fn rejected_fields() {
    assert_eq!(pack(0, 0, 3, 0), Err(FieldError::ZeroWidth));
    assert_eq!(pack(0, 8, 28, 0), Err(FieldError::OutOfRange { width: 8, lsb: 28 }));
    assert_eq!(pack(0, 3, 0, 8), Err(FieldError::Oversized { value: 8, width: 3 }));
}
