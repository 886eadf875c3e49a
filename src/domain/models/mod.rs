pub mod account;
pub mod auth;
pub mod budget;
pub mod club;
pub mod dashboard;
pub mod event;
pub mod member;
pub mod prize;
pub mod report;

use serde::{Deserialize, Deserializer};

/// Patch field reader: absent stays `None`, an explicit `null` becomes `Some(None)`.
pub(crate) fn clearable<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
