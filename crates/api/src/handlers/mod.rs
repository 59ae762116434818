pub mod alerts;
pub mod auth;
pub mod clinicians;
pub mod comments;
pub mod patients;
pub mod registry;
pub mod sensor_frames;
pub mod users;

use serde::{Deserialize, Deserializer};

/// Wrap a present field (including an explicit `null`) in `Some`, so update
/// bodies can tell "absent" from "clear".
///
/// Use with `#[serde(default, deserialize_with = "present")]`.
pub(crate) fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
