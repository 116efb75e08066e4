use tracing::warn;
use uuid::Uuid;

use essenza_domain::{
	intent::{ParsedIntent, PriceSort, TimeOfDay},
	slug,
};

use crate::EssenzaService;

/// The query-ready projection of a [`ParsedIntent`]: display values flattened
/// to catalog strings, family names resolved to slugs, plus the storefront's
/// own facet predicates (brands, free text) that share the executor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompiledFilter {
	pub gender: Option<String>,
	pub occasion: Option<String>,
	pub intensity: Option<String>,
	pub climate: Option<String>,
	pub event: Option<String>,
	pub price_min: Option<i64>,
	pub price_max: Option<i64>,
	pub family_slugs: Option<Vec<String>>,
	pub brand_ids: Option<Vec<Uuid>>,
	pub text: Option<String>,
	pub time_of_day: Option<TimeOfDay>,
	pub sort_by_price: Option<PriceSort>,
	pub limit: Option<u32>,
}

impl EssenzaService {
	/// Deterministic for a fixed family catalog. Only the family resolution
	/// touches a store, and a failed lookup falls through to heuristic slugs
	/// instead of aborting the compilation.
	pub async fn compile_filter(&self, intent: &ParsedIntent) -> CompiledFilter {
		let family_slugs = match &intent.families {
			Some(names) => Some(self.resolve_family_slugs(names).await),
			None => None,
		};

		CompiledFilter {
			gender: intent.gender.map(|value| value.as_str().to_string()),
			occasion: intent.occasion.map(|value| value.as_str().to_string()),
			intensity: intent.intensity.map(|value| value.as_str().to_string()),
			climate: intent.climate.map(|value| value.as_str().to_string()),
			event: intent.event.map(|value| value.as_str().to_string()),
			price_min: intent.price_range.and_then(|range| range.min),
			price_max: intent.price_range.and_then(|range| range.max),
			family_slugs,
			brand_ids: None,
			text: None,
			time_of_day: intent.time_of_day,
			sort_by_price: intent.sort_by_price,
			limit: intent.limit,
		}
	}

	async fn resolve_family_slugs(&self, names: &[String]) -> Vec<String> {
		let catalog = match self.stores.catalog.list_families().await {
			Ok(families) => families,
			Err(err) => {
				warn!(error = %err, "Family catalog lookup failed; deriving slugs heuristically.");

				Vec::new()
			},
		};

		names
			.iter()
			.map(|name| {
				let trimmed = name.trim();

				catalog
					.iter()
					.find(|family| family.name == trimmed)
					.map(|family| family.slug.clone())
					.unwrap_or_else(|| slug::slugify(trimmed))
			})
			.collect()
	}
}
