//! Result type alias for anonbench

use super::errors::BenchError;

/// Result type alias for anonbench operations
///
/// # Examples
///
/// ```
/// use anonbench::domain::result::Result;
/// use anonbench::domain::errors::BenchError;
///
/// fn checked_size(size: i64) -> Result<usize> {
///     usize::try_from(size).map_err(|_| BenchError::InvalidSize { size })
/// }
///
/// assert!(checked_size(-1).is_err());
/// ```
pub type Result<T> = std::result::Result<T, BenchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_with_question_mark() -> Result<()> {
        fn inner() -> Result<i32> {
            Ok(42)
        }

        let value = inner()?;
        assert_eq!(value, 42);
        Ok(())
    }

    #[test]
    fn test_result_err() {
        let result: Result<i32> = Err(BenchError::Validation("test error".to_string()));
        assert!(result.is_err());
    }
}
