pub(crate) fn assert_len(what: &str, expected: usize, value: usize) {
    assert!(
        value == expected,
        "{what} length must be {expected}, got {value}!"
    );
}

pub(crate) fn assert_multiple_of(what: &str, factor: usize, value: usize) {
    assert!(
        value != 0 && value % factor == 0,
        "{what} length must be a non zero multiple of {factor}, got {value}!"
    );
}
