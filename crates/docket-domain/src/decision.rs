//! Threshold decision - probability to binary label

/// Cutoff applied everywhere a probability becomes a label
pub const DEFAULT_THRESHOLD: f64 = 0.6;

/// Convert a probability into a binary risk label
///
/// # Examples
///
/// ```
/// use docket_domain::{decide, DEFAULT_THRESHOLD};
///
/// assert!(decide(0.6, DEFAULT_THRESHOLD));
/// assert!(!decide(0.599999, DEFAULT_THRESHOLD));
/// ```
pub fn decide(probability: f64, threshold: f64) -> bool {
    probability >= threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_is_inclusive() {
        assert!(decide(0.6, DEFAULT_THRESHOLD));
        assert!(decide(1.0, DEFAULT_THRESHOLD));
        assert!(!decide(0.599999, DEFAULT_THRESHOLD));
        assert!(!decide(0.0, DEFAULT_THRESHOLD));
    }

    #[test]
    fn test_nan_is_never_positive() {
        assert!(!decide(f64::NAN, DEFAULT_THRESHOLD));
    }
}
