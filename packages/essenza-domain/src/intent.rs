use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Structured search intent extracted from a free-text query.
///
/// Every field is independently optional: absence means "do not filter on
/// this dimension", never "filter for empty". Values arrive as untrusted
/// model JSON and must pass through [`ParsedIntent::from_untrusted`], which
/// checks each field against its closed value set and nulls out anything
/// unknown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParsedIntent {
	pub gender: Option<Gender>,
	pub occasion: Option<Occasion>,
	pub intensity: Option<Intensity>,
	pub climate: Option<Climate>,
	pub event: Option<EventKind>,
	pub price_range: Option<PriceRange>,
	pub families: Option<Vec<String>>,
	pub time_of_day: Option<TimeOfDay>,
	pub sort_by_price: Option<PriceSort>,
	pub limit: Option<u32>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
	pub min: Option<i64>,
	pub max: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
	Hombre,
	Mujer,
	Unisex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Occasion {
	Diurno,
	Nocturno,
	Formal,
	Casual,
	#[serde(rename = "Romántico")]
	Romantico,
	Deportivo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intensity {
	Baja,
	Moderada,
	Alta,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Climate {
	Calor,
	#[serde(rename = "Frío")]
	Frio,
	Templado,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
	#[serde(rename = "Tereré")]
	Terere,
	Asado,
	Fiesta,
	Cita,
	Trabajo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
	Day,
	Night,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceSort {
	Asc,
	Desc,
}

impl Gender {
	pub fn parse(raw: &str) -> Option<Self> {
		match raw.trim() {
			"Hombre" => Some(Self::Hombre),
			"Mujer" => Some(Self::Mujer),
			"Unisex" => Some(Self::Unisex),
			_ => None,
		}
	}

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Hombre => "Hombre",
			Self::Mujer => "Mujer",
			Self::Unisex => "Unisex",
		}
	}
}

impl Occasion {
	pub fn parse(raw: &str) -> Option<Self> {
		match raw.trim() {
			"Diurno" => Some(Self::Diurno),
			"Nocturno" => Some(Self::Nocturno),
			"Formal" => Some(Self::Formal),
			"Casual" => Some(Self::Casual),
			"Romántico" => Some(Self::Romantico),
			"Deportivo" => Some(Self::Deportivo),
			_ => None,
		}
	}

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Diurno => "Diurno",
			Self::Nocturno => "Nocturno",
			Self::Formal => "Formal",
			Self::Casual => "Casual",
			Self::Romantico => "Romántico",
			Self::Deportivo => "Deportivo",
		}
	}
}

impl Intensity {
	pub fn parse(raw: &str) -> Option<Self> {
		match raw.trim() {
			"Baja" => Some(Self::Baja),
			"Moderada" => Some(Self::Moderada),
			"Alta" => Some(Self::Alta),
			_ => None,
		}
	}

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Baja => "Baja",
			Self::Moderada => "Moderada",
			Self::Alta => "Alta",
		}
	}
}

impl Climate {
	pub fn parse(raw: &str) -> Option<Self> {
		match raw.trim() {
			"Calor" => Some(Self::Calor),
			"Frío" => Some(Self::Frio),
			"Templado" => Some(Self::Templado),
			_ => None,
		}
	}

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Calor => "Calor",
			Self::Frio => "Frío",
			Self::Templado => "Templado",
		}
	}
}

impl EventKind {
	pub fn parse(raw: &str) -> Option<Self> {
		match raw.trim() {
			"Tereré" => Some(Self::Terere),
			"Asado" => Some(Self::Asado),
			"Fiesta" => Some(Self::Fiesta),
			"Cita" => Some(Self::Cita),
			"Trabajo" => Some(Self::Trabajo),
			_ => None,
		}
	}

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Terere => "Tereré",
			Self::Asado => "Asado",
			Self::Fiesta => "Fiesta",
			Self::Cita => "Cita",
			Self::Trabajo => "Trabajo",
		}
	}
}

impl TimeOfDay {
	pub fn parse(raw: &str) -> Option<Self> {
		match raw.trim() {
			"day" => Some(Self::Day),
			"night" => Some(Self::Night),
			_ => None,
		}
	}

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Day => "day",
			Self::Night => "night",
		}
	}
}

impl PriceSort {
	pub fn parse(raw: &str) -> Option<Self> {
		match raw.trim() {
			"asc" => Some(Self::Asc),
			"desc" => Some(Self::Desc),
			_ => None,
		}
	}

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Asc => "asc",
			Self::Desc => "desc",
		}
	}
}

impl ParsedIntent {
	/// Validates a raw model payload into a [`ParsedIntent`]. Unknown enum
	/// values, wrong types, and missing fields all collapse to `None`; the
	/// raw JSON never reaches the filter pipeline.
	pub fn from_untrusted(value: &Value) -> Self {
		let gender = field_str(value, "gender").and_then(Gender::parse);
		let occasion = field_str(value, "occasion").and_then(Occasion::parse);
		let intensity = field_str(value, "intensity").and_then(Intensity::parse);
		let climate = field_str(value, "climate").and_then(Climate::parse);
		let event = field_str(value, "event").and_then(EventKind::parse);
		let time_of_day = field_str(value, "timeOfDay").and_then(TimeOfDay::parse);
		let sort_by_price = field_str(value, "sortByPrice").and_then(PriceSort::parse);
		let price_range = value.get("priceRange").and_then(parse_price_range);
		let families = value.get("families").and_then(parse_families);
		let limit = value
			.get("limit")
			.and_then(Value::as_u64)
			.filter(|raw| *raw > 0)
			.and_then(|raw| u32::try_from(raw).ok());

		Self {
			gender,
			occasion,
			intensity,
			climate,
			event,
			price_range,
			families,
			time_of_day,
			sort_by_price,
			limit,
		}
	}

	pub fn is_unfiltered(&self) -> bool {
		*self == Self::default()
	}
}

fn field_str<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
	value.get(key).and_then(Value::as_str)
}

fn parse_price_range(value: &Value) -> Option<PriceRange> {
	if !value.is_object() {
		return None;
	}

	let min = field_i64(value, "min");
	let max = field_i64(value, "max");

	if min.is_none() && max.is_none() {
		return None;
	}

	Some(PriceRange { min, max })
}

fn field_i64(value: &Value, key: &str) -> Option<i64> {
	let raw = value.get(key)?;

	raw.as_i64().or_else(|| raw.as_f64().map(|number| number as i64)).filter(|number| *number >= 0)
}

fn parse_families(value: &Value) -> Option<Vec<String>> {
	let items = value.as_array()?;
	let names: Vec<String> = items
		.iter()
		.filter_map(Value::as_str)
		.map(str::trim)
		.filter(|name| !name.is_empty())
		.map(str::to_string)
		.collect();

	if names.is_empty() { None } else { Some(names) }
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn validates_known_values() {
		let raw = serde_json::json!({
			"gender": "Mujer",
			"occasion": "Romántico",
			"intensity": "Alta",
			"climate": "Frío",
			"event": "Tereré",
			"timeOfDay": "night",
			"sortByPrice": "desc",
			"limit": 1,
			"priceRange": { "min": 500000, "max": 1200000 },
			"families": ["Floral", "Amaderado"]
		});
		let intent = ParsedIntent::from_untrusted(&raw);

		assert_eq!(intent.gender, Some(Gender::Mujer));
		assert_eq!(intent.occasion, Some(Occasion::Romantico));
		assert_eq!(intent.intensity, Some(Intensity::Alta));
		assert_eq!(intent.climate, Some(Climate::Frio));
		assert_eq!(intent.event, Some(EventKind::Terere));
		assert_eq!(intent.time_of_day, Some(TimeOfDay::Night));
		assert_eq!(intent.sort_by_price, Some(PriceSort::Desc));
		assert_eq!(intent.limit, Some(1));
		assert_eq!(intent.price_range, Some(PriceRange { min: Some(500_000), max: Some(1_200_000) }));
		assert_eq!(intent.families.as_deref(), Some(["Floral".to_string(), "Amaderado".to_string()].as_slice()));
	}

	#[test]
	fn unknown_values_collapse_to_none() {
		let raw = serde_json::json!({
			"gender": "Robot",
			"occasion": 7,
			"timeOfDay": "dawn",
			"sortByPrice": "sideways",
			"limit": 0,
			"families": []
		});
		let intent = ParsedIntent::from_untrusted(&raw);

		assert!(intent.is_unfiltered());
	}

	#[test]
	fn partial_price_range_is_kept() {
		let raw = serde_json::json!({ "priceRange": { "max": 800000 } });
		let intent = ParsedIntent::from_untrusted(&raw);

		assert_eq!(intent.price_range, Some(PriceRange { min: None, max: Some(800_000) }));
	}

	#[test]
	fn non_object_payload_is_unfiltered() {
		let intent = ParsedIntent::from_untrusted(&serde_json::json!("perfume"));

		assert!(intent.is_unfiltered());
	}

	#[test]
	fn serializes_camel_case_with_spanish_labels() {
		let intent = ParsedIntent {
			occasion: Some(Occasion::Romantico),
			sort_by_price: Some(PriceSort::Asc),
			..Default::default()
		};
		let json = serde_json::to_value(&intent).expect("serialize failed");

		assert_eq!(json["occasion"], "Romántico");
		assert_eq!(json["sortByPrice"], "asc");
	}
}
