//! Serde helpers for request bodies.

use serde::{Deserialize, Deserializer};

/// Deserialize a tri-state field: missing, `null`, or a value.
///
/// Pair with `#[serde(default)]` so a missing key yields `None`:
///
/// - missing → `None`
/// - `null` → `Some(None)`
/// - value → `Some(Some(value))`
///
/// Used for `expired_at` on updates, where `null` clears the expiry and a
/// missing key leaves it untouched.
pub fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(de).map(Some)
}
