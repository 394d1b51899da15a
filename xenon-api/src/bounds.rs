//! Count and range limits enforced before a request leaves the process

use crate::error::ValidationError;

/// Inclusive limit on how many values a list parameter may carry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bound {
    pub min: usize,
    pub max: usize,
}

impl Bound {
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    pub const fn up_to(max: usize) -> Self {
        Self { min: 1, max }
    }

    /// Check `count` against this bound, naming `parameter` in the error
    pub fn check(&self, parameter: &str, count: usize) -> Result<(), ValidationError> {
        check_count(parameter, count, *self)
    }
}

pub fn check_count(parameter: &str, count: usize, bound: Bound) -> Result<(), ValidationError> {
    if count > bound.max {
        return Err(ValidationError::TooMany {
            parameter: parameter.to_string(),
            max: bound.max,
        });
    }
    if count < bound.min {
        return Err(ValidationError::TooFew {
            parameter: parameter.to_string(),
            min: bound.min,
        });
    }
    Ok(())
}

pub fn check_range<T>(parameter: &str, value: T, min: T, max: T) -> Result<(), ValidationError>
where
    T: PartialOrd + std::fmt::Display,
{
    if value < min || value > max {
        return Err(ValidationError::range_error(parameter, min, max, value));
    }
    Ok(())
}

/// Check an optional page size, treating it as a count of returned items
pub fn check_limit(parameter: &str, limit: Option<u32>, bound: Bound) -> Result<(), ValidationError> {
    match limit {
        Some(limit) => check_count(parameter, limit as usize, bound),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALBUMS: Bound = Bound::up_to(20);

    #[test]
    fn test_count_at_both_edges_passes() {
        assert!(check_count("album_ids", 1, ALBUMS).is_ok());
        assert!(check_count("album_ids", 20, ALBUMS).is_ok());
    }

    #[test]
    fn test_count_over_max() {
        let err = ALBUMS.check("album_ids", 21).unwrap_err();
        assert_eq!(
            err,
            ValidationError::TooMany {
                parameter: "album_ids".to_string(),
                max: 20
            }
        );
    }

    #[test]
    fn test_count_under_min() {
        let err = ALBUMS.check("album_ids", 0).unwrap_err();
        assert!(matches!(err, ValidationError::TooFew { min: 1, .. }));
    }

    #[test]
    fn test_range() {
        assert!(check_range("volume_percent", 0, 0, 100).is_ok());
        assert!(check_range("volume_percent", 100, 0, 100).is_ok());
        assert!(matches!(
            check_range("volume_percent", 101, 0, 100),
            Err(ValidationError::RangeError { .. })
        ));
    }

    #[test]
    fn test_absent_limit_is_not_checked() {
        assert!(check_limit("limit", None, ALBUMS).is_ok());
        assert!(check_limit("limit", Some(0), ALBUMS).is_err());
    }
}
