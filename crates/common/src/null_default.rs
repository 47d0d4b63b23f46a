//! Field deserializers for documents produced by Go services, where a nil
//! slice or map is written as `null`.

use serde::{Deserialize, Deserializer};

/// Reads `null` as `T::default()`. Pair with `#[serde(default)]` so an absent
/// key behaves the same way.
pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
