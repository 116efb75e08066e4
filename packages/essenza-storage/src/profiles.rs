use serde_json::Value;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{Error, Result, db::Db, models::PreferenceProfile};

#[derive(Debug, sqlx::FromRow)]
struct ProfileRow {
	user_id: Uuid,
	families: Value,
	intensity: Option<String>,
	occasions: Value,
	climates: Value,
	updated_at: OffsetDateTime,
}

pub async fn fetch_profile(db: &Db, user_id: Uuid) -> Result<Option<PreferenceProfile>> {
	let row = sqlx::query_as::<_, ProfileRow>(
		"SELECT user_id, families, intensity, occasions, climates, updated_at \
		 FROM preference_profiles WHERE user_id = $1",
	)
	.bind(user_id)
	.fetch_optional(&db.pool)
	.await?;
	let Some(row) = row else {
		return Ok(None);
	};

	Ok(Some(PreferenceProfile {
		user_id: row.user_id,
		families: string_list(row.families, "families")?,
		intensity: row.intensity,
		occasions: string_list(row.occasions, "occasions")?,
		climates: string_list(row.climates, "climates")?,
		updated_at: row.updated_at,
	}))
}

fn string_list(value: Value, label: &str) -> Result<Vec<String>> {
	serde_json::from_value(value)
		.map_err(|err| Error::InvalidRow(format!("profile {label} is not a string array: {err}")))
}
