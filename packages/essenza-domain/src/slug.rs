use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

/// Derives a catalog slug from a display name: lowercase, diacritics
/// stripped, non-alphanumeric runs collapsed to single hyphens.
///
/// Used as the fallback when a scent-family name has no exact match in the
/// catalog, so it must stay in sync with how slugs are minted there.
pub fn slugify(name: &str) -> String {
	let stripped: String = name.nfd().filter(|ch| !is_combining_mark(*ch)).collect();
	let mut out = String::with_capacity(stripped.len());
	let mut pending_hyphen = false;

	for ch in stripped.chars() {
		if ch.is_alphanumeric() {
			if pending_hyphen && !out.is_empty() {
				out.push('-');
			}
			pending_hyphen = false;

			for lower in ch.to_lowercase() {
				out.push(lower);
			}
		} else {
			pending_hyphen = true;
		}
	}

	out
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn lowercases_and_hyphenates() {
		assert_eq!(slugify("Amaderado Especiado"), "amaderado-especiado");
	}

	#[test]
	fn strips_diacritics() {
		assert_eq!(slugify("Cítrico"), "citrico");
		assert_eq!(slugify("Ámbar Dulce"), "ambar-dulce");
	}

	#[test]
	fn collapses_whitespace_runs() {
		assert_eq!(slugify("  Flor   de  Azahar "), "flor-de-azahar");
	}

	#[test]
	fn empty_input_yields_empty_slug() {
		assert_eq!(slugify("   "), "");
	}
}
