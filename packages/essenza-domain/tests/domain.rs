use essenza_domain::{
	intent::{ParsedIntent, PriceSort, TimeOfDay},
	score, slug, suitability,
};

#[test]
fn superlative_payload_round_trips() {
	let raw = serde_json::json!({
		"sortByPrice": "desc",
		"limit": 1,
		"explanation": "El más caro de la casa."
	});
	let intent = ParsedIntent::from_untrusted(&raw);

	assert_eq!(intent.sort_by_price, Some(PriceSort::Desc));
	assert_eq!(intent.limit, Some(1));
	assert_eq!(intent.gender, None);
	assert_eq!(intent.families, None);
}

#[test]
fn family_names_slugify_like_the_catalog() {
	let raw = serde_json::json!({ "families": ["Cítrico", "Oriental Floral"] });
	let intent = ParsedIntent::from_untrusted(&raw);
	let slugs: Vec<String> =
		intent.families.expect("families missing").iter().map(|name| slug::slugify(name)).collect();

	assert_eq!(slugs, vec!["citrico".to_string(), "oriental-floral".to_string()]);
}

#[test]
fn night_filter_and_score_guards_compose() {
	let document = serde_json::json!({ "day": 30, "night": 85 });

	assert!(suitability::passes_time_of_day(&document, TimeOfDay::Night, 70));
	assert!(!suitability::passes_time_of_day(&document, TimeOfDay::Day, 70));
	assert_eq!(score::parse_score("85"), Some(85));
	assert_eq!(score::parse_score("n/a"), None);
}
