/// The whole persistence surface is this one table. `embedding` is nullable at the
/// engine level but every row the service writes carries one.
pub const SCHEMA: &str = "\
CREATE TABLE IF NOT EXISTS notes (
	id INTEGER PRIMARY KEY AUTOINCREMENT,
	content TEXT NOT NULL,
	created_at TEXT NOT NULL,
	embedding TEXT
)";
