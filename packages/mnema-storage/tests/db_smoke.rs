use time::macros::datetime;

use mnema_config::Sqlite;
use mnema_storage::{db::Db, models::NoteRow, timestamp};
use mnema_testkit::TestDatabase;

fn sqlite_config(db: &TestDatabase) -> Sqlite {
	Sqlite { path: db.sqlite_path(), pool_max_conns: 2 }
}

#[tokio::test]
async fn schema_setup_is_idempotent() {
	let test_db = TestDatabase::new();
	let db = Db::connect(&sqlite_config(&test_db)).await.expect("connect failed");

	db.ensure_schema().await.expect("first ensure_schema failed");
	db.ensure_schema().await.expect("second ensure_schema failed");

	let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM notes")
		.fetch_one(&db.pool)
		.await
		.expect("count failed");

	assert_eq!(count, 0);
}

#[tokio::test]
async fn note_rows_round_trip() {
	let test_db = TestDatabase::new();
	let db = Db::connect(&sqlite_config(&test_db)).await.expect("connect failed");

	db.ensure_schema().await.expect("ensure_schema failed");

	let created_at = datetime!(2023-01-01 12:00:00.000042);
	let created_text = timestamp::format(created_at).expect("format failed");
	let embedding_text = serde_json::to_string(&vec![0.1_f32, 0.2, 0.3]).expect("encode failed");
	let id: i64 = sqlx::query_scalar(
		"INSERT INTO notes (content, created_at, embedding) VALUES (?, ?, ?) RETURNING id",
	)
	.bind("stored note")
	.bind(&created_text)
	.bind(&embedding_text)
	.fetch_one(&db.pool)
	.await
	.expect("insert failed");

	let row: NoteRow = sqlx::query_as("SELECT id, content, created_at, embedding FROM notes WHERE id = ?")
		.bind(id)
		.fetch_one(&db.pool)
		.await
		.expect("fetch failed");
	let note = row.into_note().expect("decode failed");

	assert_eq!(note.id, id);
	assert_eq!(note.content, "stored note");
	assert_eq!(note.created_at, created_at);
	assert_eq!(note.embedding, Some(vec![0.1, 0.2, 0.3]));
}

#[tokio::test]
async fn null_embeddings_decode_to_none() {
	let test_db = TestDatabase::new();
	let db = Db::connect(&sqlite_config(&test_db)).await.expect("connect failed");

	db.ensure_schema().await.expect("ensure_schema failed");

	let created_text = timestamp::format(timestamp::now()).expect("format failed");

	sqlx::query("INSERT INTO notes (content, created_at) VALUES (?, ?)")
		.bind("no embedding yet")
		.bind(&created_text)
		.execute(&db.pool)
		.await
		.expect("insert failed");

	let row: NoteRow = sqlx::query_as("SELECT id, content, created_at, embedding FROM notes")
		.fetch_one(&db.pool)
		.await
		.expect("fetch failed");
	let note = row.into_note().expect("decode failed");

	assert!(note.embedding.is_none());
}
