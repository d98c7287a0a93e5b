//! Input Sanitization
//!
//! Normalizes degenerate numeric inputs instead of failing.
//!
//! Functions:
//! - Count clamping (negative limits become zero)
//! - Interval clamping
//! - Mastery level clamping
//! - Float epoch timestamps (NaN is treated as infinitely past)

use chrono::{DateTime, Utc};

use crate::types::LEVEL_COUNT;

/// Largest interval a `chrono::Duration` can hold (seconds)
pub const MAX_INTERVAL_SECS: i64 = i64::MAX / 1_000;

/// 清理数量参数，负数视为 0
pub fn sanitize_count(raw: i64) -> usize {
    if raw <= 0 {
        0
    } else {
        usize::try_from(raw).unwrap_or(usize::MAX)
    }
}

/// 清理时间间隔（秒），负数视为 0
pub fn sanitize_interval_secs(raw: i64) -> i64 {
    raw.clamp(0, MAX_INTERVAL_SECS)
}

/// 将任意整数理解度限制在 [0, 5]
pub fn clamp_level(raw: i64) -> u8 {
    raw.clamp(0, LEVEL_COUNT as i64 - 1) as u8
}

/// 将浮点秒数转换为时间戳
///
/// NaN and negative infinity map to the earliest representable instant,
/// positive infinity to the latest. Finite values outside chrono's range are
/// clamped to the nearer bound.
pub fn timestamp_from_epoch_secs(secs: f64) -> DateTime<Utc> {
    if secs.is_nan() || secs == f64::NEG_INFINITY {
        return DateTime::<Utc>::MIN_UTC;
    }
    if secs == f64::INFINITY {
        return DateTime::<Utc>::MAX_UTC;
    }

    let whole = secs.floor();
    let nanos = (((secs - whole) * 1e9) as u32).min(999_999_999);

    DateTime::from_timestamp(whole as i64, nanos).unwrap_or(if secs < 0.0 {
        DateTime::<Utc>::MIN_UTC
    } else {
        DateTime::<Utc>::MAX_UTC
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== sanitize_count 测试 ====================

    #[test]
    fn test_sanitize_count_negative() {
        assert_eq!(sanitize_count(-1), 0);
        assert_eq!(sanitize_count(i64::MIN), 0);
    }

    #[test]
    fn test_sanitize_count_passthrough() {
        assert_eq!(sanitize_count(0), 0);
        assert_eq!(sanitize_count(10), 10);
    }

    // ==================== sanitize_interval_secs 测试 ====================

    #[test]
    fn test_sanitize_interval_secs() {
        assert_eq!(sanitize_interval_secs(-3600), 0);
        assert_eq!(sanitize_interval_secs(3600), 3600);
        assert_eq!(sanitize_interval_secs(i64::MAX), MAX_INTERVAL_SECS);
    }

    // ==================== clamp_level 测试 ====================

    #[test]
    fn test_clamp_level_bounds() {
        assert_eq!(clamp_level(-1), 0);
        assert_eq!(clamp_level(0), 0);
        assert_eq!(clamp_level(5), 5);
        assert_eq!(clamp_level(6), 5);
        assert_eq!(clamp_level(i64::MAX), 5);
    }

    // ==================== timestamp_from_epoch_secs 测试 ====================

    #[test]
    fn test_timestamp_nan_is_infinitely_past() {
        assert_eq!(timestamp_from_epoch_secs(f64::NAN), DateTime::<Utc>::MIN_UTC);
        assert_eq!(
            timestamp_from_epoch_secs(f64::NEG_INFINITY),
            DateTime::<Utc>::MIN_UTC
        );
    }

    #[test]
    fn test_timestamp_positive_infinity() {
        assert_eq!(timestamp_from_epoch_secs(f64::INFINITY), DateTime::<Utc>::MAX_UTC);
    }

    #[test]
    fn test_timestamp_finite_values() {
        let ts = timestamp_from_epoch_secs(1_760_486_400.5);
        assert_eq!(ts.timestamp(), 1_760_486_400);
        assert_eq!(ts.timestamp_subsec_millis(), 500);

        let before_epoch = timestamp_from_epoch_secs(-1.5);
        assert_eq!(before_epoch.timestamp(), -2);
    }

    #[test]
    fn test_timestamp_out_of_range_clamps() {
        assert_eq!(timestamp_from_epoch_secs(1e300), DateTime::<Utc>::MAX_UTC);
        assert_eq!(timestamp_from_epoch_secs(-1e300), DateTime::<Utc>::MIN_UTC);
    }
}
