use darray::{DArray, DArrayError};

fn assert_state(darray: &DArray<u32>, size: usize, capacity: usize, values: &[u32]) {
    assert_eq!(darray.size(), Ok(size));
    assert_eq!(darray.is_empty(), Ok(size == 0));
    assert_eq!(darray.capacity(), Ok(capacity));

    let snapshot = darray.snapshot();
    assert_eq!(snapshot.size(), size);
    assert_eq!(snapshot.capacity(), capacity);

    for (idx, value) in values.iter().enumerate() {
        assert_eq!(*darray.at(idx).unwrap(), *value);
    }
    assert_eq!(darray.to_vec(), values);
}

#[test]
fn test_push_back_returns_new_size() {
    let darray: DArray<u32> = DArray::new();
    assert_eq!(darray.push_back(10), Ok(1));
    assert_eq!(darray.push_back(20), Ok(2));
}

#[test]
fn test_push_back_doubles_when_full() {
    let darray: DArray<u32> = DArray::builder().capacity(2).build().unwrap();

    darray.push_back(0).unwrap();
    assert_state(&darray, 1, 2, &[0]);
    darray.push_back(1).unwrap();
    assert_state(&darray, 2, 2, &[0, 1]);
    darray.push_back(2).unwrap();
    assert_state(&darray, 3, 4, &[0, 1, 2]);
}

#[test]
fn test_pop_back_shrinks_to_original() {
    let darray: DArray<u32> = DArray::builder().capacity(2).build().unwrap();
    darray.try_extend([0, 1, 2]).unwrap();

    assert_eq!(darray.pop_back(), Ok(2));
    assert_state(&darray, 2, 2, &[0, 1]);
    assert_eq!(darray.pop_back(), Ok(1));
    assert_state(&darray, 1, 2, &[0]);
    assert_eq!(darray.pop_back(), Ok(0));
    assert_state(&darray, 0, 2, &[]);
}

#[test]
fn test_pop_back_hysteresis() {
    let darray: DArray<u32> = DArray::builder().capacity(2).build().unwrap();
    darray.try_extend(0..9).unwrap();
    assert_eq!(darray.capacity(), Ok(16));

    // 8 left of 16: halve
    darray.pop_back().unwrap();
    assert_eq!(darray.capacity(), Ok(8));

    // 7, 6, 5 left of 8: keep
    for _ in 0..3 {
        darray.pop_back().unwrap();
        assert_eq!(darray.capacity(), Ok(8));
    }

    // 4 left of 8: halve
    darray.pop_back().unwrap();
    assert_eq!(darray.capacity(), Ok(4));
}

#[test]
fn test_pop_back_never_below_original() {
    let darray: DArray<u32> = DArray::builder().capacity(3).build().unwrap();
    darray.try_extend(0..7).unwrap();
    assert_eq!(darray.capacity(), Ok(12));

    while darray.pop_back().is_ok() {
        assert!(darray.capacity().unwrap() >= 3);
    }
    assert_eq!(darray.capacity(), Ok(3));
}

#[test]
fn test_pop_back_empty() {
    let darray: DArray<u32> = DArray::new();
    assert_eq!(darray.pop_back(), Err(DArrayError::EmptyContainer));
    assert_state(&darray, 0, 8, &[]);
}

#[test]
fn test_push_pop_lifo_order() {
    let darray: DArray<String> = DArray::builder().capacity(1).build().unwrap();
    for word in ["a", "b", "c", "d", "e"] {
        darray.push_back(word.to_string()).unwrap();
    }

    let mut popped = Vec::new();
    while let Ok(word) = darray.pop_back() {
        popped.push(word);
    }
    assert_eq!(popped, ["e", "d", "c", "b", "a"]);
    assert_eq!(darray.capacity(), Ok(1));
}

#[test]
fn test_move_only_elements() {
    struct Token(Box<u32>);

    let darray: DArray<Token> = DArray::builder().capacity(2).build().unwrap();
    for value in 0..5 {
        darray.push_back(Token(Box::new(value))).unwrap();
    }
    assert_eq!(*darray.pop_back().unwrap().0, 4);
    assert_eq!(*darray.at(0).unwrap().0, 0);
}
