#![cfg(test)]

use crate::compiler_frontend::tests::test_support::name;
use crate::compiler_frontend::text_slice::{TextSlice, slices_are_equal};
use std::rc::Rc;

#[test]
fn equality_is_by_content_not_allocation() {
    let a = name("$func");
    let b = TextSlice::new(b"$func");

    assert!(!Rc::ptr_eq(a.shared_bytes(), b.shared_bytes()));
    assert_eq!(a, b);
    assert_ne!(a, name("$func2"));
    assert_ne!(a, name("$fun"));
}

#[test]
fn absent_slices_never_compare_equal() {
    let present = name("x");

    assert!(slices_are_equal(Some(&present), Some(&name("x"))));
    assert!(!slices_are_equal(None, Some(&present)));
    assert!(!slices_are_equal(Some(&present), None));
    assert!(!slices_are_equal(None, None));
}

#[test]
fn fnv1a_matches_reference_values() {
    // Offset basis for no input
    assert_eq!(name("").hash_name(), 0x811c9dc5);
    assert_eq!(name("a").hash_name(), 0xe40c292c);
    assert_eq!(name("foobar").hash_name(), 0xbf9cf968);
}

#[test]
fn clones_share_one_allocation() {
    let original = name("$label");
    let copy = original.clone();

    assert!(Rc::ptr_eq(original.shared_bytes(), copy.shared_bytes()));
    assert_eq!(Rc::strong_count(original.shared_bytes()), 2);

    drop(copy);
    assert_eq!(Rc::strong_count(original.shared_bytes()), 1);
}

#[test]
fn shared_constructor_reuses_the_buffer() {
    let source: Rc<[u8]> = Rc::from(&b"memory"[..]);
    let slice = TextSlice::from_shared(source.clone());

    assert!(Rc::ptr_eq(&source, slice.shared_bytes()));
    assert_eq!(slice.len(), 6);
    assert_eq!(slice.to_string(), "memory");
}

#[test]
fn non_utf8_bytes_display_lossily() {
    let slice = TextSlice::new(&[b'a', 0xff, b'b']);

    assert_eq!(slice.as_bytes(), &[b'a', 0xff, b'b']);
    assert_eq!(slice.to_str_lossy(), "a\u{fffd}b");
}
