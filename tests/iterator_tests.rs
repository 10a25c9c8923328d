use darray::DArray;

fn sample() -> DArray<i32> {
    let darray: DArray<i32> = DArray::builder().capacity(2).build().unwrap();
    darray.try_extend([5, 3, 2, 7, 5, 3, 6, 1]).unwrap();
    darray
}

#[test]
fn test_sort_in_place() {
    let darray = sample();
    darray.lock_mut().sort();
    assert_eq!(darray.to_vec(), [1, 2, 3, 3, 5, 5, 6, 7]);
}

#[test]
fn test_transform_into_another_darray() {
    let darray = sample();
    let squares: DArray<i64> = DArray::builder().capacity(2).build().unwrap();

    let size = squares
        .try_extend(darray.lock().iter().map(|x| i64::from(*x) * i64::from(*x)))
        .unwrap();

    assert_eq!(size, 8);
    assert_eq!(squares.to_vec(), [25, 9, 4, 49, 25, 9, 36, 1]);
    assert_eq!(squares.capacity(), Ok(8));
}

#[test]
fn test_for_loop_over_locked() {
    let darray = sample();

    let mut sum = 0;
    for value in &darray.lock() {
        sum += value;
    }
    assert_eq!(sum, 32);

    for value in &mut darray.lock_mut() {
        *value *= 10;
    }
    assert_eq!(darray.lock()[0], 50);
}

#[test]
fn test_reverse_iteration() {
    let darray = sample();
    let reversed: Vec<i32> = darray.lock().iter().rev().copied().collect();
    assert_eq!(reversed, [1, 6, 3, 5, 7, 2, 3, 5]);
}

#[test]
fn test_random_access_through_lock() {
    let darray = sample();
    let locked = darray.lock();

    assert_eq!(locked.len(), 8);
    assert_eq!(locked[3], 7);
    assert_eq!(&locked[2..4], &[2, 7]);
    assert_eq!(locked.iter().position(|x| *x == 6), Some(6));
    assert_eq!(locked.first(), Some(&5));
    assert_eq!(locked.last(), Some(&1));
}

#[test]
fn test_locked_debug() {
    let darray: DArray<u8> = DArray::new();
    darray.try_extend([1, 2, 3]).unwrap();
    assert_eq!(format!("{:?}", darray.lock()), "[1, 2, 3]");
}

#[test]
fn test_element_mut_mutation() {
    let darray = sample();
    {
        let mut element = darray.at_mut(1).unwrap();
        assert_eq!(element.index(), 1);
        *element = 42;
    }
    assert_eq!(*darray.at(1).unwrap(), 42);
}

#[test]
fn test_shared_views_coexist() {
    let darray = sample();
    let first = darray.lock();
    let second = darray.lock();
    let element = darray.at(3).unwrap();

    assert_eq!(first.len(), second.len());
    assert_eq!(*element, first[3]);
    assert_eq!(darray.size(), Ok(8));
    assert_eq!(format!("{:?}", element), "7");
}

#[test]
fn test_at_mut_out_of_range() {
    let darray = sample();
    assert!(darray.at_mut(8).is_err());
    darray.push_back(0).unwrap();
}

#[test]
fn test_as_mut_slice_with_exclusive_borrow() {
    let mut darray = sample();
    darray.as_mut_slice().reverse();
    assert_eq!(darray.to_vec(), [1, 6, 3, 5, 7, 2, 3, 5]);
}

#[test]
fn test_owning_iteration() {
    let darray: DArray<String> = DArray::new();
    darray.try_extend(["one", "two", "three"].map(String::from)).unwrap();

    let mut iter = darray.into_iter();
    assert_eq!(iter.len(), 3);
    assert_eq!(iter.next_back().as_deref(), Some("three"));
    assert_eq!(iter.collect::<Vec<_>>(), ["one", "two"]);
}

#[test]
fn test_owning_for_loop() {
    let darray = sample();
    let mut collected = Vec::new();
    for value in darray {
        collected.push(value);
    }
    assert_eq!(collected, [5, 3, 2, 7, 5, 3, 6, 1]);
}

#[test]
fn test_empty_iteration() {
    let darray: DArray<u32> = DArray::new();
    assert!(darray.lock().is_empty());
    assert_eq!(darray.into_iter().next(), None);
}
