use serde_json::Value;
use tracing::warn;

use essenza_domain::intent::ParsedIntent;

use crate::EssenzaService;

/// Result of interpreting a free-text query. `degraded` marks the
/// widen-to-unfiltered fallback taken when the model's output could not be
/// used; callers and tests can assert on it explicitly.
#[derive(Debug, Clone)]
pub struct ParseOutcome {
	pub intent: ParsedIntent,
	pub explanation: String,
	pub degraded: bool,
}
impl ParseOutcome {
	fn degraded() -> Self {
		Self {
			intent: ParsedIntent::default(),
			explanation: DEGRADED_EXPLANATION.to_string(),
			degraded: true,
		}
	}
}

const DEGRADED_EXPLANATION: &str = "No pude interpretar bien tu búsqueda, así que te muestro todo \
	el catálogo. ¡Contame un poco más y afinamos la próxima!";

const DEFAULT_EXPLANATION: &str = "Acá tenés los perfumes que encontré para tu búsqueda.";

const PARSER_SYSTEM_PROMPT: &str = r#"Sos el intérprete de búsquedas de una perfumería online. Convertí la consulta del cliente en un JSON con esta forma exacta (todos los campos son opcionales; omití lo que la consulta no mencione):

{
  "gender": "Hombre" | "Mujer" | "Unisex",
  "occasion": "Diurno" | "Nocturno" | "Formal" | "Casual" | "Romántico" | "Deportivo",
  "intensity": "Baja" | "Moderada" | "Alta",
  "climate": "Calor" | "Frío" | "Templado",
  "event": "Tereré" | "Asado" | "Fiesta" | "Cita" | "Trabajo",
  "priceRange": { "min": número, "max": número },
  "families": ["nombre de familia olfativa"],
  "timeOfDay": "day" | "night",
  "sortByPrice": "asc" | "desc",
  "limit": número,
  "explanation": "respuesta corta para el cliente"
}

Reglas fijas:
- "el más caro" o "el perfume más caro": sortByPrice = "desc" y limit = 1.
- "el más barato" o "el más económico": sortByPrice = "asc" y limit = 1.
- "para la noche": timeOfDay = "night". "para el día": timeOfDay = "day".
- Frases de intimidad o de pareja: occasion = "Romántico" e intensity = "Alta".
- Frases de conquista o de llamar la atención: intensity = "Alta" y occasion = "Nocturno".
- "el que más piropos recibe" o frases de elogios: occasion = "Nocturno" e intensity = "Alta".
- "barato" o "económico" sin superlativo: priceRange = { "max": 800000 }.
- "caro" o "premium" sin superlativo: priceRange = { "min": 1000000 }.

La "explanation" es informal y cercana: máximo 3 oraciones y sin referencias geográficas. Respondé SOLO con el JSON, sin texto adicional ni bloques de código."#;

impl EssenzaService {
	/// Parses a free-text query into structured intent. Never fails: any
	/// provider or JSON problem degrades to an all-absent intent so the
	/// search widens instead of blocking.
	pub async fn parse_query(&self, query: &str) -> ParseOutcome {
		let messages = build_parser_messages(query);
		let raw = match self.completion.complete(&self.cfg.providers.parser, &messages).await {
			Ok(raw) => raw,
			Err(err) => {
				warn!(error = %err, "Query parsing failed; widening to an unfiltered search.");

				return ParseOutcome::degraded();
			},
		};

		match interpret_response(&raw) {
			Some((intent, explanation)) => ParseOutcome { intent, explanation, degraded: false },
			None => {
				warn!("Query parser returned unparseable JSON; widening to an unfiltered search.");

				ParseOutcome::degraded()
			},
		}
	}
}

pub(crate) fn build_parser_messages(query: &str) -> Vec<Value> {
	vec![
		serde_json::json!({ "role": "system", "content": PARSER_SYSTEM_PROMPT }),
		serde_json::json!({ "role": "user", "content": query }),
	]
}

fn interpret_response(raw: &str) -> Option<(ParsedIntent, String)> {
	let stripped = strip_code_fences(raw);
	let value: Value = serde_json::from_str(stripped).ok()?;
	let intent = ParsedIntent::from_untrusted(&value);
	let explanation = value
		.get("explanation")
		.and_then(Value::as_str)
		.map(str::trim)
		.filter(|text| !text.is_empty())
		.map_or_else(|| DEFAULT_EXPLANATION.to_string(), str::to_string);

	Some((intent, explanation))
}

/// Models wrap JSON in Markdown fences often enough that stripping them is
/// part of the contract, not a nicety.
fn strip_code_fences(raw: &str) -> &str {
	let trimmed = raw.trim();
	let Some(rest) = trimmed.strip_prefix("```") else {
		return trimmed;
	};
	let rest = rest
		.strip_prefix("json")
		.or_else(|| rest.strip_prefix("JSON"))
		.unwrap_or(rest)
		.trim_start();
	let rest = rest.trim_end();

	rest.strip_suffix("```").unwrap_or(rest).trim_end()
}

#[cfg(test)]
mod tests {
	use essenza_domain::intent::PriceSort;

	use super::*;

	#[test]
	fn strips_fenced_json() {
		assert_eq!(strip_code_fences("```json\n{\"limit\": 1}\n```"), "{\"limit\": 1}");
		assert_eq!(strip_code_fences("```{\"limit\": 1}```"), "{\"limit\": 1}");
		assert_eq!(strip_code_fences("  {\"limit\": 1} "), "{\"limit\": 1}");
	}

	#[test]
	fn interprets_fenced_payload() {
		let (intent, explanation) =
			interpret_response("```json\n{\"sortByPrice\": \"asc\", \"limit\": 1, \"explanation\": \"El más accesible.\"}\n```")
				.expect("interpret failed");

		assert_eq!(intent.sort_by_price, Some(PriceSort::Asc));
		assert_eq!(intent.limit, Some(1));
		assert_eq!(explanation, "El más accesible.");
	}

	#[test]
	fn non_json_yields_none() {
		assert!(interpret_response("Lo siento, no entendí la consulta.").is_none());
	}

	#[test]
	fn missing_explanation_gets_default() {
		let (_, explanation) = interpret_response("{\"gender\": \"Hombre\"}").expect("interpret failed");

		assert_eq!(explanation, DEFAULT_EXPLANATION);
	}

	#[test]
	fn prompt_carries_the_fixed_rules() {
		assert!(PARSER_SYSTEM_PROMPT.contains("el más caro"));
		assert!(PARSER_SYSTEM_PROMPT.contains("el más barato"));
		assert!(PARSER_SYSTEM_PROMPT.contains("\"max\": 800000"));
		assert!(PARSER_SYSTEM_PROMPT.contains("\"min\": 1000000"));
		assert!(PARSER_SYSTEM_PROMPT.contains("timeOfDay = \"night\""));
	}
}
