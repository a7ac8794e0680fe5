use std::cell::Cell;
use std::collections::LinkedList;
use std::rc::Rc;

use trackvec::{tracked_vec, RangeKind, TrackedVec, DEFAULT_CAPACITY};

#[test]
fn test_list_literal_round_trip() {
    let vec = tracked_vec!['a', 'b', 'c'];

    assert_eq!(vec.size(), 3);
    assert_eq!(vec[0], 'a');
    assert_eq!(vec[1], 'b');
    assert_eq!(vec[2], 'c');
}

#[test]
fn test_empty_literal() {
    let vec: TrackedVec<u8> = tracked_vec![];

    assert!(vec.is_empty());
    assert_eq!(vec.capacity(), DEFAULT_CAPACITY);
}

#[test]
fn test_random_access_range_allocates_once() {
    let source = [3, 1, 4, 1, 5, 9, 2, 6];
    let vec = TrackedVec::from_range(source.iter().copied());

    assert_eq!(vec.len(), source.len());
    assert_eq!(vec.capacity(), source.len());
    assert_eq!(vec.reallocation_count(), 0);
    assert_eq!(vec.as_slice(), &source);
}

#[test]
fn test_random_access_range_of_length_zero() {
    let vec = TrackedVec::from_exact(Vec::<String>::new());

    assert!(vec.is_empty());
    assert_eq!(vec.capacity(), 0);

    let vec: TrackedVec<u8> = TrackedVec::from_range(std::iter::empty());
    assert!(vec.is_empty());
}

#[test]
fn test_input_only_range_appends() {
    let list: LinkedList<u32> = (0..30).collect();
    let words = list.iter().map(|n| n.to_string()).filter(|s| !s.is_empty());
    assert_eq!(RangeKind::of(&words), RangeKind::InputOnly);

    let vec: TrackedVec<String> = words.collect();

    assert_eq!(vec.len(), 30);
    assert!(vec.capacity() >= 30);
    assert_eq!(vec[29], "29");
}

#[test]
fn test_from_slice_and_vec() {
    let from_slice = TrackedVec::from(&["x".to_string(), "y".to_string()][..]);
    let from_vec = TrackedVec::from(vec!["x".to_string(), "y".to_string()]);

    assert_eq!(from_slice, from_vec);
    assert_eq!(from_vec.capacity(), 2);
}

#[test]
fn test_with_len_default_elements() {
    let vec: TrackedVec<String> = TrackedVec::with_len(3);

    assert_eq!(vec.len(), 3);
    assert!(vec.iter().all(String::is_empty));

    let empty: TrackedVec<String> = TrackedVec::with_len(0);
    assert!(empty.is_empty());
}

#[test]
fn test_extend_appends_in_order() {
    let mut vec = tracked_vec![1];
    vec.extend([2, 3, 4]);

    assert_eq!(vec.as_slice(), &[1, 2, 3, 4]);
}

#[test]
fn test_copy_is_independent() {
    let mut a = tracked_vec![String::from("one"), String::from("two")];
    let b = a.clone();

    a.push_back(String::from("three"));
    a[0].push('!');

    assert_eq!(b.size(), 2);
    assert_eq!(b[0], "one");
    assert_eq!(b[1], "two");
    assert_eq!(a.size(), 3);
}

#[test]
fn test_copy_assignment_replaces_contents() {
    let a = tracked_vec![1, 2, 3];
    let mut b = tracked_vec![9];

    b.clone_from(&a);
    assert_eq!(b, a);

    b.push_front(0);
    assert_eq!(a.as_slice(), &[1, 2, 3]);
}

#[test]
fn test_copy_keeps_capacity() {
    let mut a = TrackedVec::with_capacity(32);
    a.push_back(1u64);

    let b = a.clone();

    assert_eq!(b.capacity(), 32);
    assert_eq!(b.head_room(), a.head_room());
}

#[test]
fn test_move_leaves_source_empty() {
    let mut a = tracked_vec![1, 2, 3];

    let b = a.take();

    assert_eq!(b.as_slice(), &[1, 2, 3]);
    assert_eq!(a.size(), 0);
    assert_eq!(a.capacity(), 0);
    assert!(a.try_get(0).is_err());

    // The source behaves like a fresh empty vector
    a.push_back(10);
    a.push_front(5);
    assert_eq!(a.as_slice(), &[5, 10]);
}

#[test]
fn test_move_assignment() {
    let mut a = tracked_vec![1, 2, 3];
    let mut b = tracked_vec![7, 8];

    b.move_from(&mut a);

    assert_eq!(b.as_slice(), &[1, 2, 3]);
    assert!(a.is_empty());
    assert_eq!(a.capacity(), 0);
}

struct Counted(Rc<Cell<usize>>);

impl Drop for Counted {
    fn drop(&mut self) {
        self.0.set(self.0.get() + 1);
    }
}

#[test]
fn test_move_assignment_destroys_old_elements() {
    let drops = Rc::new(Cell::new(0));
    let mut target = TrackedVec::new();
    target.push_back(Counted(Rc::clone(&drops)));
    target.push_back(Counted(Rc::clone(&drops)));
    let mut source = TrackedVec::new();
    source.push_back(Counted(Rc::clone(&drops)));

    target.move_from(&mut source);
    assert_eq!(drops.get(), 2);
    assert_eq!(target.len(), 1);

    drop(target);
    drop(source);
    assert_eq!(drops.get(), 3);
}
