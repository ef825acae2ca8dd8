use serde::{Deserialize, Deserializer, Serializer};
use time::PrimitiveDateTime;

use mnema_storage::timestamp;

pub fn serialize<S>(value: &PrimitiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
	S: Serializer,
{
	let formatted = timestamp::format(*value).map_err(serde::ser::Error::custom)?;

	serializer.serialize_str(&formatted)
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<PrimitiveDateTime, D::Error>
where
	D: Deserializer<'de>,
{
	let raw = String::deserialize(deserializer)?;

	timestamp::parse(&raw).map_err(serde::de::Error::custom)
}
