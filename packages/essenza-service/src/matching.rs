use std::collections::HashMap;

use futures::future::join_all;
use serde_json::Value;
use time::{Duration, OffsetDateTime};
use tracing::warn;
use uuid::Uuid;

use essenza_domain::score;
use essenza_storage::models::{MatchRecord, PreferenceProfile, Product};

use crate::{EssenzaService, ServiceError, ServiceResult, provider_err, storage_err};

#[derive(Debug, Clone, serde::Serialize)]
pub struct MatchOutcome {
	pub percentage: i32,
	pub reasons: Option<String>,
	/// True when the score came from a still-valid cached record and no
	/// model call was made.
	pub cached: bool,
}

impl EssenzaService {
	/// Returns the compatibility percentage for a (user, product) pair,
	/// serving a cached record while it is fresh and recomputing once it
	/// expires. Recomputation requires a complete preference profile and an
	/// active product; both misses surface as their own error variants so
	/// the UI can hide the badge instead of failing the page.
	pub async fn get_match(&self, user_id: Uuid, product_id: Uuid) -> ServiceResult<MatchOutcome> {
		let now = OffsetDateTime::now_utc();

		if let Some(record) =
			self.stores.matches.fetch(user_id, product_id).await.map_err(storage_err)?
			&& now < record.expires_at
		{
			return Ok(MatchOutcome {
				percentage: record.percentage,
				reasons: record.reasons,
				cached: true,
			});
		}

		let profile = self
			.stores
			.profiles
			.fetch(user_id)
			.await
			.map_err(storage_err)?
			.filter(PreferenceProfile::is_complete)
			.ok_or(ServiceError::ProfileIncomplete { user_id })?;
		let product = self
			.stores
			.catalog
			.fetch_product(product_id)
			.await
			.map_err(storage_err)?
			.ok_or(ServiceError::ProductNotFound { product_id })?;
		let messages = build_match_messages(&profile, &product);
		let raw = self
			.completion
			.complete(&self.cfg.providers.matcher, &messages)
			.await
			.map_err(provider_err)?;
		let percentage = match score::parse_score(&raw) {
			Some(value) => value,
			None => {
				warn!(
					raw = %raw.trim(),
					"Match score unparseable or out of range; using the neutral fallback."
				);

				self.cfg.matching.fallback_score
			},
		};
		let record = MatchRecord {
			user_id,
			product_id,
			percentage,
			reasons: None,
			calculated_at: now,
			expires_at: now + Duration::days(self.cfg.matching.cache_ttl_days),
		};

		self.stores.matches.upsert(&record).await.map_err(storage_err)?;

		Ok(MatchOutcome { percentage, reasons: record.reasons, cached: false })
	}

	/// One independent computation per product, issued concurrently. A
	/// failing entry is dropped from the map; siblings are unaffected.
	pub async fn batch_match(
		&self,
		user_id: Uuid,
		product_ids: &[Uuid],
	) -> HashMap<Uuid, MatchOutcome> {
		let computations = product_ids.iter().map(|product_id| {
			let product_id = *product_id;

			async move { (product_id, self.get_match(user_id, product_id).await) }
		});
		let mut outcomes = HashMap::new();

		for (product_id, result) in join_all(computations).await {
			match result {
				Ok(outcome) => {
					outcomes.insert(product_id, outcome);
				},
				Err(err) => {
					warn!(%product_id, error = %err, "Skipping failed match computation.");
				},
			}
		}

		outcomes
	}
}

fn build_match_messages(profile: &PreferenceProfile, product: &Product) -> Vec<Value> {
	let system = "Sos un asesor de perfumería. Compará el perfil del cliente con el perfume y \
		respondé SOLO con un número entero entre 0 y 100: el porcentaje de compatibilidad. Sin \
		texto adicional.";
	let user = format!("{}\n\n{}", format_profile_block(profile), format_product_block(product));

	vec![
		serde_json::json!({ "role": "system", "content": system }),
		serde_json::json!({ "role": "user", "content": user }),
	]
}

// Both blocks are fixed-order so cached scores stay comparable across
// recomputations of the same pair.
fn format_profile_block(profile: &PreferenceProfile) -> String {
	format!(
		"PERFIL DEL CLIENTE\n\
		Familias favoritas: {}\n\
		Intensidad preferida: {}\n\
		Ocasiones: {}\n\
		Climas: {}",
		profile.families.join(", "),
		profile.intensity.as_deref().unwrap_or("-"),
		profile.occasions.join(", "),
		profile.climates.join(", "),
	)
}

fn format_product_block(product: &Product) -> String {
	format!(
		"PERFUME\n\
		Nombre: {}\n\
		Marca: {}\n\
		Familias: {}\n\
		Género: {}\n\
		Concentración: {}\n\
		Notas de salida: {}\n\
		Notas de corazón: {}\n\
		Notas de fondo: {}\n\
		Intensidad: {}\n\
		Estela: {}\n\
		Duración: {}\n\
		Temporadas: {}\n\
		Día/Noche: {}",
		product.name,
		product.brand,
		product.families.join(", "),
		product.gender,
		product.concentration,
		note_layer(&product.notes, "top"),
		note_layer(&product.notes, "heart"),
		note_layer(&product.notes, "base"),
		product.intensity,
		product.sillage,
		product.longevity,
		map_entries(&product.seasonal),
		map_entries(&product.time_of_day),
	)
}

fn note_layer(notes: &Value, layer: &str) -> String {
	notes
		.get(layer)
		.and_then(Value::as_array)
		.map(|items| {
			items.iter().filter_map(Value::as_str).collect::<Vec<_>>().join(", ")
		})
		.unwrap_or_default()
}

fn map_entries(document: &Value) -> String {
	document
		.as_object()
		.map(|map| {
			map.iter().map(|(key, value)| format!("{key} {value}")).collect::<Vec<_>>().join(", ")
		})
		.unwrap_or_default()
}

#[cfg(test)]
mod tests {
	use time::OffsetDateTime;

	use super::*;

	fn sample_profile() -> PreferenceProfile {
		PreferenceProfile {
			user_id: Uuid::new_v4(),
			families: vec!["Floral".to_string(), "Cítrico".to_string()],
			intensity: Some("Moderada".to_string()),
			occasions: vec!["Diurno".to_string()],
			climates: vec!["Calor".to_string()],
			updated_at: OffsetDateTime::UNIX_EPOCH,
		}
	}

	fn sample_product() -> Product {
		Product {
			product_id: Uuid::new_v4(),
			sku: "ESS-001".to_string(),
			name: "Jardín de Verano".to_string(),
			brand: "Essenza".to_string(),
			families: vec!["Floral".to_string()],
			gender: "Mujer".to_string(),
			occasion: None,
			climate: None,
			event: None,
			concentration: "EDP".to_string(),
			price: 950_000,
			intensity: "Moderada".to_string(),
			sillage: "Media".to_string(),
			longevity: "6-8 horas".to_string(),
			notes: serde_json::json!({
				"top": ["bergamota"],
				"heart": ["jazmín"],
				"base": ["almizcle"]
			}),
			seasonal: serde_json::json!({ "verano": 90, "invierno": 30 }),
			time_of_day: serde_json::json!({ "day": 85, "night": 45 }),
			created_at: OffsetDateTime::UNIX_EPOCH,
		}
	}

	#[test]
	fn profile_block_keeps_fixed_order() {
		let block = format_profile_block(&sample_profile());
		let families = block.find("Familias favoritas").expect("families missing");
		let intensity = block.find("Intensidad preferida").expect("intensity missing");
		let occasions = block.find("Ocasiones").expect("occasions missing");
		let climates = block.find("Climas").expect("climates missing");

		assert!(families < intensity && intensity < occasions && occasions < climates);
	}

	#[test]
	fn product_block_lists_note_layers_in_order() {
		let block = format_product_block(&sample_product());
		let top = block.find("Notas de salida: bergamota").expect("top notes missing");
		let heart = block.find("Notas de corazón: jazmín").expect("heart notes missing");
		let base = block.find("Notas de fondo: almizcle").expect("base notes missing");

		assert!(top < heart && heart < base);
		assert!(block.starts_with("PERFUME\nNombre: Jardín de Verano"));
	}

	#[test]
	fn missing_note_layer_renders_empty() {
		assert_eq!(note_layer(&serde_json::json!({}), "top"), "");
	}
}
