use serde_json::Value;

use crate::intent::TimeOfDay;

/// Checks a product's day/night suitability document against the threshold
/// filter. The document is the semi-structured `{"day": n, "night": n}` map
/// the catalog stores as JSON; the backing store cannot filter on it, so this
/// runs over already-fetched rows.
///
/// A missing or non-numeric entry fails the check: a product without declared
/// suitability is not assumed suitable.
pub fn passes_time_of_day(document: &Value, time_of_day: TimeOfDay, threshold: i64) -> bool {
	let Some(score) = suitability_score(document, time_of_day) else {
		return false;
	};

	score >= threshold
}

pub fn suitability_score(document: &Value, time_of_day: TimeOfDay) -> Option<i64> {
	let raw = document.get(time_of_day.as_str())?;

	raw.as_i64().or_else(|| raw.as_f64().map(|number| number as i64))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn passes_at_and_above_threshold() {
		let document = serde_json::json!({ "day": 70, "night": 90 });

		assert!(passes_time_of_day(&document, TimeOfDay::Day, 70));
		assert!(passes_time_of_day(&document, TimeOfDay::Night, 70));
	}

	#[test]
	fn fails_below_threshold() {
		let document = serde_json::json!({ "day": 69, "night": 40 });

		assert!(!passes_time_of_day(&document, TimeOfDay::Day, 70));
		assert!(!passes_time_of_day(&document, TimeOfDay::Night, 70));
	}

	#[test]
	fn missing_entry_fails() {
		let document = serde_json::json!({ "day": 80 });

		assert!(!passes_time_of_day(&document, TimeOfDay::Night, 70));
		assert!(!passes_time_of_day(&serde_json::json!(null), TimeOfDay::Day, 70));
	}

	#[test]
	fn accepts_float_scores() {
		let document = serde_json::json!({ "night": 82.5 });

		assert!(passes_time_of_day(&document, TimeOfDay::Night, 70));
	}
}
