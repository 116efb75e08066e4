use uuid::Uuid;

use crate::{Result, db::Db, models::SearchHistoryEntry};

pub async fn insert_search(db: &Db, entry: &SearchHistoryEntry) -> Result<()> {
	sqlx::query(
		"\
INSERT INTO search_history (search_id, user_id, query, intent, result_ids, searched_at)
VALUES ($1, $2, $3, $4, $5, $6)",
	)
	.bind(Uuid::new_v4())
	.bind(entry.user_id)
	.bind(entry.query.as_str())
	.bind(&entry.intent)
	.bind(&entry.result_ids)
	.bind(entry.searched_at)
	.execute(&db.pool)
	.await?;

	Ok(())
}
