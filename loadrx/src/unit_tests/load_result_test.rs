use crate::{LoadError, LoadResult};

#[test]
fn test_plain_value_succeeds() {
    let result: Result<u64, LoadError> = 100_000u64.into_load_result();
    assert_eq!(result, Ok(100_000));
}

#[test]
fn test_result_ok() {
    let value: Result<&str, String> = Ok("rates");
    assert_eq!(LoadResult::<&str>::into_load_result(value), Ok("rates"));
}

#[test]
fn test_result_err_keeps_message() {
    let value: Result<u64, &str> = Err("Operation failed");
    assert_eq!(
        LoadResult::<u64>::into_load_result(value),
        Err(LoadError::Message("Operation failed".to_string()))
    );
}

#[test]
fn test_result_err_without_message() {
    let value: Result<u64, String> = Err(String::new());
    assert_eq!(
        LoadResult::<u64>::into_load_result(value),
        Err(LoadError::Unspecified)
    );
}

#[test]
fn test_option() {
    assert_eq!(LoadResult::<bool>::into_load_result(Some(false)), Ok(false));
    assert_eq!(
        LoadResult::<bool>::into_load_result(None::<bool>),
        Err(LoadError::Unspecified)
    );
}
