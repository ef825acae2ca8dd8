use time::{
	Duration, OffsetDateTime, PrimitiveDateTime, format_description::BorrowedFormatItem,
	macros::format_description,
};

use crate::Result;

// Stored without an offset for storage-engine portability. Microsecond precision keeps
// the text form stable across a write/read round trip.
const FORMAT: &[BorrowedFormatItem<'static>] =
	format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:6]");

/// Current wall-clock time as a naive UTC timestamp, truncated to microseconds so the
/// in-memory value equals its own persisted text form.
pub fn now() -> PrimitiveDateTime {
	let now = OffsetDateTime::now_utc();
	let now = now - Duration::nanoseconds(i64::from(now.nanosecond() % 1_000));

	PrimitiveDateTime::new(now.date(), now.time())
}

pub fn format(value: PrimitiveDateTime) -> Result<String> {
	Ok(value.format(&FORMAT)?)
}

pub fn parse(raw: &str) -> Result<PrimitiveDateTime> {
	Ok(PrimitiveDateTime::parse(raw, &FORMAT)?)
}
