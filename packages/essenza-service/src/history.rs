use serde_json::Value;
use time::OffsetDateTime;
use tracing::warn;
use uuid::Uuid;

use essenza_domain::intent::ParsedIntent;
use essenza_storage::models::SearchHistoryEntry;

use crate::EssenzaService;

impl EssenzaService {
	/// Best-effort history write. Anonymous searches are skipped, and a
	/// failed insert is logged and dropped: history must never block or fail
	/// the search that produced it.
	pub async fn record_search(
		&self,
		user_id: Option<Uuid>,
		query: &str,
		intent: &ParsedIntent,
		result_ids: &[Uuid],
	) {
		let Some(user_id) = user_id else {
			return;
		};
		let entry = SearchHistoryEntry {
			user_id,
			query: query.to_string(),
			intent: serde_json::to_value(intent).unwrap_or(Value::Null),
			result_ids: result_ids.to_vec(),
			searched_at: OffsetDateTime::now_utc(),
		};

		if let Err(err) = self.stores.history.record(&entry).await {
			warn!(error = %err, %user_id, "Failed to record search history.");
		}
	}
}
