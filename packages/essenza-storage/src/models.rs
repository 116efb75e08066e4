use serde_json::Value;
use time::OffsetDateTime;
use uuid::Uuid;

/// A catalog product with its brand and scent-family names resolved.
#[derive(Debug, Clone)]
pub struct Product {
	pub product_id: Uuid,
	pub sku: String,
	pub name: String,
	pub brand: String,
	pub families: Vec<String>,
	pub gender: String,
	pub occasion: Option<String>,
	pub climate: Option<String>,
	pub event: Option<String>,
	pub concentration: String,
	pub price: i64,
	pub intensity: String,
	pub sillage: String,
	pub longevity: String,
	pub notes: Value,
	pub seasonal: Value,
	pub time_of_day: Value,
	pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProductRecord {
	pub product_id: Uuid,
	pub sku: String,
	pub name: String,
	pub brand: String,
	pub gender: String,
	pub occasion: Option<String>,
	pub climate: Option<String>,
	pub event: Option<String>,
	pub concentration: String,
	pub price: i64,
	pub intensity: String,
	pub sillage: String,
	pub longevity: String,
	pub notes: Value,
	pub seasonal: Value,
	pub time_of_day: Value,
	pub created_at: OffsetDateTime,
}
impl ProductRecord {
	pub fn into_product(self, families: Vec<String>) -> Product {
		Product {
			product_id: self.product_id,
			sku: self.sku,
			name: self.name,
			brand: self.brand,
			families,
			gender: self.gender,
			occasion: self.occasion,
			climate: self.climate,
			event: self.event,
			concentration: self.concentration,
			price: self.price,
			intensity: self.intensity,
			sillage: self.sillage,
			longevity: self.longevity,
			notes: self.notes,
			seasonal: self.seasonal,
			time_of_day: self.time_of_day,
			created_at: self.created_at,
		}
	}
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ScentFamily {
	pub family_id: Uuid,
	pub name: String,
	pub slug: String,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MatchRecord {
	pub user_id: Uuid,
	pub product_id: Uuid,
	pub percentage: i32,
	pub reasons: Option<String>,
	pub calculated_at: OffsetDateTime,
	pub expires_at: OffsetDateTime,
}

/// A user's declared fragrance preferences. The match engine reads it; only
/// the onboarding/profile flow writes it.
#[derive(Debug, Clone)]
pub struct PreferenceProfile {
	pub user_id: Uuid,
	pub families: Vec<String>,
	pub intensity: Option<String>,
	pub occasions: Vec<String>,
	pub climates: Vec<String>,
	pub updated_at: OffsetDateTime,
}
impl PreferenceProfile {
	/// Matching requires every dimension: 1-5 favored families, an intensity,
	/// and at least one occasion and climate.
	pub fn is_complete(&self) -> bool {
		(1..=5).contains(&self.families.len())
			&& self.intensity.is_some()
			&& !self.occasions.is_empty()
			&& !self.climates.is_empty()
	}
}

#[derive(Debug, Clone)]
pub struct SearchHistoryEntry {
	pub user_id: Uuid,
	pub query: String,
	pub intent: Value,
	pub result_ids: Vec<Uuid>,
	pub searched_at: OffsetDateTime,
}
