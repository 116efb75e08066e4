/// Parses a raw match-scorer completion into a 0-100 percentage.
///
/// The scorer is instructed to emit a bare integer, but the response is
/// untrusted: anything non-numeric or outside the range yields `None` and the
/// caller substitutes its neutral fallback instead of failing.
pub fn parse_score(raw: &str) -> Option<i32> {
	let trimmed = raw.trim().trim_end_matches('%').trim();
	let value: i64 = trimmed.parse().ok()?;

	if (0..=100).contains(&value) { Some(value as i32) } else { None }
}
