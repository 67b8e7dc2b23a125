//! Notification id derivation.

/// Numeric id the platform uses for a scheduled alert.
pub type NotificationId = u32;

/// Maps a reminder id string to a stable non-negative 32-bit alert id.
///
/// Folds each UTF-16 code unit as `hash = hash * 31 + unit` with 32-bit
/// wrapping arithmetic, then takes the absolute value. `i32::MIN` maps to
/// `2^31`, which still fits the unsigned range.
pub fn derive_notification_id(reminder_id: &str) -> NotificationId {
    let hash = reminder_id
        .encode_utf16()
        .fold(0_i32, |hash, unit| hash.wrapping_mul(31).wrapping_add(i32::from(unit)));
    hash.unsigned_abs()
}

#[cfg(test)]
mod tests {
    use super::derive_notification_id;

    #[test]
    fn empty_id_maps_to_zero() {
        assert_eq!(derive_notification_id(""), 0);
    }

    #[test]
    fn short_ids_match_polynomial_hash() {
        // 'a' = 97, 'b' = 98 -> 97 * 31 + 98
        assert_eq!(derive_notification_id("ab"), 3105);
    }

    #[test]
    fn overflowing_ids_stay_deterministic_and_non_negative() {
        let id = "11111111-2222-4333-8444-555555555555";
        let first = derive_notification_id(id);
        assert_eq!(first, derive_notification_id(id));
        assert!(i64::from(first) >= 0);
    }

    #[test]
    fn negative_hash_is_folded_to_absolute_value() {
        // Java/JS string hash of "polygenelubricants" is i32::MIN.
        assert_eq!(derive_notification_id("polygenelubricants"), 1_u32 << 31);
    }
}
