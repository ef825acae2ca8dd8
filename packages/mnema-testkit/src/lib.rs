mod error;

pub use error::{Error, Result};

use std::{
	env, fs, io,
	path::{Path, PathBuf},
};

use uuid::Uuid;

/// A throwaway SQLite database file under the system temp directory. `cleanup` (or
/// `Drop` as a fallback) removes the file and its WAL siblings.
pub struct TestDatabase {
	path: PathBuf,
	cleaned: bool,
}
impl TestDatabase {
	pub fn new() -> Self {
		let mut path = env::temp_dir();

		path.push(format!("mnema_test_{}.db", Uuid::new_v4().simple()));

		Self { path, cleaned: false }
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	/// The path in the string form `mnema_config::Sqlite` carries.
	pub fn sqlite_path(&self) -> String {
		self.path.to_string_lossy().into_owned()
	}

	pub fn cleanup(mut self) -> Result<()> {
		self.cleanup_inner()
	}

	fn cleanup_inner(&mut self) -> Result<()> {
		if self.cleaned {
			return Ok(());
		}

		for suffix in ["", "-wal", "-shm"] {
			let mut file = self.path.clone().into_os_string();

			file.push(suffix);

			match fs::remove_file(PathBuf::from(file)) {
				Ok(()) => {},
				Err(err) if err.kind() == io::ErrorKind::NotFound => {},
				Err(err) => return Err(err.into()),
			}
		}

		self.cleaned = true;

		Ok(())
	}
}
impl Default for TestDatabase {
	fn default() -> Self {
		Self::new()
	}
}
impl Drop for TestDatabase {
	fn drop(&mut self) {
		if let Err(err) = self.cleanup_inner() {
			eprintln!("Test database cleanup failed: {err}.");
		}
	}
}

/// Deterministic bag-of-words embedding for tests that must rank results without a
/// network. Tokens hash to a slot via FNV-1a, so shared vocabulary raises cosine
/// similarity and identical text embeds identically.
pub fn term_frequency_embedding(text: &str, dimensions: usize) -> Vec<f32> {
	let mut vec = vec![0.0; dimensions];

	if dimensions == 0 {
		return vec;
	}

	for token in text.split(|c: char| !c.is_alphanumeric()).filter(|token| !token.is_empty()) {
		let slot = (fnv1a(token.to_lowercase().as_bytes()) % dimensions as u64) as usize;

		vec[slot] += 1.0;
	}

	vec
}

fn fnv1a(bytes: &[u8]) -> u64 {
	let mut hash: u64 = 0xcbf2_9ce4_8422_2325;

	for byte in bytes {
		hash ^= u64::from(*byte);
		hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
	}

	hash
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn embedding_is_deterministic() {
		let a = term_frequency_embedding("cats are mammals", 64);
		let b = term_frequency_embedding("cats are mammals", 64);

		assert_eq!(a, b);
		assert!(a.iter().any(|value| *value > 0.0));
	}

	#[test]
	fn casing_does_not_change_the_embedding() {
		assert_eq!(
			term_frequency_embedding("Rust Borrow Checker", 64),
			term_frequency_embedding("rust borrow checker", 64),
		);
	}

	#[test]
	fn cleanup_removes_the_database_file() {
		let db = TestDatabase::new();
		let path = db.path().to_path_buf();

		fs::write(&path, b"stub").expect("Failed to create test file.");
		db.cleanup().expect("Cleanup failed.");

		assert!(!path.exists());
	}
}
