//! Words as streams of big-endian bytes.

use std::io::{self, Read, Write};

/// Consume exactly four bytes of `source` and assemble them into a word, first byte in
/// bits 24-31 and last byte in bits 0-7.
///
/// Fails with [`io::ErrorKind::UnexpectedEof`] when fewer than four bytes are left.
pub fn read_word<R: Read>(source: &mut R) -> io::Result<u32> {
    let mut bytes = [0; 4];
    source.read_exact(&mut bytes)?;
    Ok(u32::from_be_bytes(bytes))
}

/// Emit `word` as four bytes in the same order [`read_word`] consumes them.
pub fn write_word<W: Write>(sink: &mut W, word: u32) -> io::Result<()> {
    sink.write_all(&word.to_be_bytes())
}

#[test]
fn roundtrip() {
    let words = [0, 1, 0x0102_0304, u32::MAX];

    let mut buf = Vec::new();
    for word in words {
        write_word(&mut buf, word).unwrap();
    }

    let mut source = buf.as_slice();
    for word in words {
        assert_eq!(read_word(&mut source).unwrap(), word);
    }
}

#[test]
fn byte_order() {
    let mut buf = Vec::new();
    write_word(&mut buf, 0x0a0b_0c0d).unwrap();
    assert_eq!(buf, [0x0a, 0x0b, 0x0c, 0x0d]);
}

#[test]
fn short_read() {
    let mut source = [0x12, 0x34].as_slice();
    let error = read_word(&mut source).unwrap_err();
    assert_eq!(error.kind(), io::ErrorKind::UnexpectedEof);
}
