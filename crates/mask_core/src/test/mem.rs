use crate::mem::Memory;
use crate::Exception;

#[test]
fn first_map_is_the_program_segment() {
    let mut mem = Memory::new();
    assert_eq!(mem.map(4), 0);
}

#[test]
fn fresh_segments_are_zeroed() {
    let mut mem = Memory::new();
    let id = mem.map(4);
    for offset in 0..4 {
        assert_eq!(mem.load(id, offset), Ok(0));
    }
}

#[test]
fn store_then_load() {
    let mut mem = Memory::new();
    let id = mem.map(2);

    mem.store(id, 1, 1234).unwrap();
    assert_eq!(mem.load(id, 1), Ok(1234));

    mem.store(id, 1, 4321).unwrap();
    assert_eq!(mem.load(id, 1), Ok(4321));
}

#[test]
fn out_of_bounds() {
    let mut mem = Memory::new();
    let id = mem.map(2);

    assert_eq!(mem.load(id, 2), Err(Exception::OutOfBounds { id, offset: 2, len: 2 }));
    assert_eq!(mem.store(id, 9, 0), Err(Exception::OutOfBounds { id, offset: 9, len: 2 }));
}

#[test]
fn zero_length_segment() {
    let mut mem = Memory::new();
    let id = mem.map(0);
    assert_eq!(mem.load(id, 0), Err(Exception::OutOfBounds { id, offset: 0, len: 0 }));
}

#[test]
fn identifiers_recycle_oldest_first() {
    let mut mem = Memory::new();
    mem.map(1);
    for id in 1..4 {
        assert_eq!(mem.map(1), id);
    }

    mem.unmap(2).unwrap();
    mem.unmap(1).unwrap();
    mem.unmap(3).unwrap();

    assert_eq!(mem.map(1), 2);
    assert_eq!(mem.map(1), 1);
    assert_eq!(mem.map(1), 3);
    assert_eq!(mem.map(1), 4);
}

#[test]
fn remap_reuses_the_identifier() {
    let mut mem = Memory::new();
    mem.map(1);

    let id = mem.map(8);
    mem.store(id, 7, 9).unwrap();
    mem.unmap(id).unwrap();

    // The recycled identifier names a fresh segment: new length, zeroed words.
    assert_eq!(mem.map(2), id);
    assert_eq!(mem.load(id, 0), Ok(0));
    assert_eq!(mem.load(id, 1), Ok(0));
    assert!(mem.load(id, 7).is_err());
}

#[test]
fn program_segment_cannot_be_unmapped() {
    let mut mem = Memory::new();
    mem.map(1);
    assert_eq!(mem.unmap(0), Err(Exception::UnmapProgram));
}

#[test]
fn double_unmap() {
    let mut mem = Memory::new();
    mem.map(1);

    let id = mem.map(1);
    mem.unmap(id).unwrap();
    assert_eq!(mem.unmap(id), Err(Exception::Unmapped(id)));
}

#[test]
fn unmapped_access() {
    let mut mem = Memory::new();
    mem.map(1);
    assert_eq!(mem.load(7, 0), Err(Exception::Unmapped(7)));
    assert_eq!(mem.store(7, 0, 1), Err(Exception::Unmapped(7)));
}

#[test]
fn duplicate_is_independent() {
    let mut mem = Memory::new();
    mem.map(1);

    let id = mem.map(2);
    mem.store(id, 0, 11).unwrap();

    let copy = mem.duplicate(id).unwrap();
    mem.store(id, 0, 22).unwrap();

    assert_eq!(copy[0], 11);
    assert_eq!(mem.load(id, 0), Ok(22));
}

#[test]
fn replace_changes_the_length() {
    let mut mem = Memory::new();
    let id = mem.map(4);

    mem.replace(id, vec![5, 6].into_boxed_slice()).unwrap();

    assert_eq!(mem.load(id, 0), Ok(5));
    assert_eq!(mem.load(id, 1), Ok(6));
    assert!(mem.load(id, 2).is_err());
}
