//! Unique test identifiers, so parallel tests never share a player or
//! session name.

use ulid::Ulid;

/// `{prefix}-{ulid}`
///
/// ```
/// use engine_test_support::unique_helpers::unique_str;
///
/// let a = unique_str("player");
/// let b = unique_str("player");
/// assert_ne!(a, b);
/// assert!(a.starts_with("player-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// `count` distinct ids sharing `prefix`, in creation order.
pub fn unique_ids(prefix: &str, count: usize) -> Vec<String> {
    (0..count)
        .map(|seat| format!("{}{}-{}", prefix, seat + 1, Ulid::new()))
        .collect()
}
