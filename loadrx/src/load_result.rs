use crate::LoadError;
use std::fmt::Display;

/// Anything a loader future may resolve to.
///
/// Plain values always succeed, `Result`s fail with the error's message, and
/// `None` fails with [`LoadError::Unspecified`].
pub trait LoadResult<T> {
    fn into_load_result(self) -> Result<T, LoadError>;
}

impl<T> LoadResult<T> for T {
    fn into_load_result(self) -> Result<T, LoadError> {
        Ok(self)
    }
}

impl<T, E> LoadResult<T> for Result<T, E>
where
    E: Display,
{
    fn into_load_result(self) -> Result<T, LoadError> {
        self.map_err(|error| LoadError::from_display(&error))
    }
}

impl<T> LoadResult<T> for Option<T> {
    fn into_load_result(self) -> Result<T, LoadError> {
        self.ok_or(LoadError::Unspecified)
    }
}
