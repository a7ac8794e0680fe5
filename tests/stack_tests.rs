use trackvec::{TrackedVec, DEFAULT_CAPACITY};

#[test]
fn test_new_vector_is_empty() {
    let vec: TrackedVec<u32> = TrackedVec::new();

    assert_eq!(vec.len(), 0);
    assert_eq!(vec.size(), 0);
    assert!(vec.is_empty());
    assert_eq!(vec.capacity(), DEFAULT_CAPACITY);
    assert!(vec.front().is_none());
    assert!(vec.back().is_none());
}

#[test]
fn test_push_back_order() {
    let mut vec = TrackedVec::new();

    vec.push_back("first");
    vec.push_back("second");
    vec.push_back("third");

    assert_eq!(vec.len(), 3);
    assert_eq!(vec[0], "first");
    assert_eq!(vec[1], "second");
    assert_eq!(vec[2], "third");
}

#[test]
fn test_push_front_order() {
    let mut vec = TrackedVec::new();

    vec.push_front("third");
    vec.push_front("second");
    vec.push_front("first");

    assert_eq!(vec.as_slice(), &["first", "second", "third"]);
    assert_eq!(vec.front(), Some(&"first"));
    assert_eq!(vec.back(), Some(&"third"));
}

#[test]
fn test_interleaved_pushes() {
    let mut vec = TrackedVec::new();

    for i in 0..10 {
        if i % 2 == 0 {
            vec.push_back(i);
        } else {
            vec.push_front(i);
        }
    }

    assert_eq!(vec.as_slice(), &[9, 7, 5, 3, 1, 0, 2, 4, 6, 8]);
}

#[test]
fn test_pop_both_ends() {
    let mut vec = TrackedVec::new();
    vec.push_back(1);
    vec.push_back(2);
    vec.push_back(3);

    assert_eq!(vec.pop_front(), Some(1));
    assert_eq!(vec.pop_back(), Some(3));
    assert_eq!(vec.len(), 1);
    assert_eq!(vec[0], 2);

    assert_eq!(vec.pop_back(), Some(2));
    assert!(vec.is_empty());
    assert_eq!(vec.pop_back(), None);
    assert_eq!(vec.pop_front(), None);
}

#[test]
fn test_pop_keeps_capacity() {
    let mut vec = TrackedVec::new();
    for i in 0..20 {
        vec.push_back(i);
    }
    let capacity = vec.capacity();

    while vec.pop_back().is_some() {}

    assert!(vec.is_empty());
    assert_eq!(vec.capacity(), capacity);
}

#[test]
fn test_growth_keeps_order() {
    let mut vec = TrackedVec::new();
    let count = 2 * DEFAULT_CAPACITY + 1;

    for i in 0..count {
        vec.push_back(i);
        assert_eq!(vec.size(), i + 1);
    }

    assert!(vec.reallocation_count() > 0);
    for i in 0..count {
        assert_eq!(vec[i], i);
    }
}

#[test]
fn test_front_growth_keeps_order() {
    let mut vec = TrackedVec::new();
    let count = 2 * DEFAULT_CAPACITY + 1;

    for i in 0..count {
        vec.push_front(i);
    }

    assert_eq!(vec.len(), count);
    for i in 0..count {
        assert_eq!(vec[i], count - 1 - i);
    }
}

#[test]
fn test_push_without_growth_does_not_reallocate() {
    let mut vec = TrackedVec::new();
    let back_room = vec.tail_room();

    for i in 0..back_room {
        vec.push_back(i);
    }

    assert_eq!(vec.reallocation_count(), 0);
    assert_eq!(vec.tail_room(), 0);

    vec.push_back(back_room);
    assert_eq!(vec.reallocation_count(), 1);
}

#[test]
fn test_version_tracks_every_mutation() {
    let mut vec = TrackedVec::new();
    assert_eq!(vec.version(), 0);

    vec.push_back(1);
    vec.push_front(0);
    vec.emplace_back(|| 2);
    assert_eq!(vec.version(), 3);

    vec.pop_back();
    vec.pop_front();
    assert_eq!(vec.version(), 5);

    // Reads do not count
    let _ = vec.get(0);
    let _ = vec.as_slice();
    assert_eq!(vec.version(), 5);
}

#[test]
fn test_failed_pop_does_not_bump_version() {
    let mut vec: TrackedVec<u8> = TrackedVec::new();

    assert!(vec.try_pop_back().is_err());
    assert!(vec.try_pop_front().is_err());
    assert_eq!(vec.version(), 0);
}

#[test]
fn test_emplace_constructs_in_place() {
    let mut vec: TrackedVec<(u32, String)> = TrackedVec::with_capacity(1);

    vec.emplace_back(|| (1, "one".to_string()));
    vec.emplace_back(|| (2, "two".to_string()));
    vec.emplace_front(|| (0, "zero".to_string()));

    assert_eq!(vec.len(), 3);
    assert_eq!(vec[0], (0, "zero".to_string()));
    assert_eq!(vec[2].1, "two");
}

#[test]
fn test_repeated_reads_are_stable() {
    let mut vec = TrackedVec::new();
    vec.push_back(7);
    vec.push_back(8);

    for _ in 0..3 {
        assert_eq!(vec.size(), 2);
        assert_eq!(vec[0], 7);
        assert_eq!(vec[1], 8);
    }
}

#[test]
fn test_index_mut_writes_through() {
    let mut vec = TrackedVec::new();
    vec.push_back(String::from("a"));

    vec[0].push('b');
    *vec.get_mut(0).unwrap() += "c";

    assert_eq!(vec[0], "abc");
    assert!(vec.get_mut(1).is_none());
}

#[test]
fn test_clear_resets_length() {
    let mut vec = TrackedVec::new();
    for i in 0..5 {
        vec.push_back(i);
    }

    vec.clear();

    assert!(vec.is_empty());
    assert_eq!(vec.capacity(), DEFAULT_CAPACITY);
    vec.push_front(9);
    assert_eq!(vec.as_slice(), &[9]);
}

#[test]
fn test_zero_sized_elements() {
    let mut vec = TrackedVec::new();
    for _ in 0..100 {
        vec.push_back(());
    }
    vec.push_front(());

    assert_eq!(vec.len(), 101);
    assert_eq!(vec.pop_front(), Some(()));
}
