use uuid::Uuid;

use crate::{Result, db::Db, models::MatchRecord};

pub async fn fetch_match(db: &Db, user_id: Uuid, product_id: Uuid) -> Result<Option<MatchRecord>> {
	let record = sqlx::query_as::<_, MatchRecord>(
		"SELECT user_id, product_id, percentage, reasons, calculated_at, expires_at \
		 FROM match_records WHERE user_id = $1 AND product_id = $2",
	)
	.bind(user_id)
	.bind(product_id)
	.fetch_optional(&db.pool)
	.await?;

	Ok(record)
}

/// Last write wins: concurrent recomputations for the same pair derive the
/// same inputs, so the race is benign.
pub async fn upsert_match(db: &Db, record: &MatchRecord) -> Result<()> {
	sqlx::query(
		"\
INSERT INTO match_records (user_id, product_id, percentage, reasons, calculated_at, expires_at)
VALUES ($1, $2, $3, $4, $5, $6)
ON CONFLICT (user_id, product_id) DO UPDATE
SET
	percentage = EXCLUDED.percentage,
	reasons = EXCLUDED.reasons,
	calculated_at = EXCLUDED.calculated_at,
	expires_at = EXCLUDED.expires_at",
	)
	.bind(record.user_id)
	.bind(record.product_id)
	.bind(record.percentage)
	.bind(record.reasons.as_deref())
	.bind(record.calculated_at)
	.bind(record.expires_at)
	.execute(&db.pool)
	.await?;

	Ok(())
}
