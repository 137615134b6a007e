use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Encloses the CLIP-G segment in the composed text.
pub const BREAK_CLIPG: &str = "BREAK_CLIPG";
/// Encloses the CLIP-L segment in the composed text.
pub const BREAK_CLIPL: &str = "BREAK_CLIPL";

static COMMA_SPACING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*,\s*").expect("valid regex"));
static COMMA_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r",+").expect("valid regex"));
static SPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" {2,}").expect("valid regex"));

/// Result of one generation call.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PromptOutput {
	/// Prompt with both marker-enclosed segments removed.
	pub prompt: String,
	/// Seed of the request, echoed back.
	pub seed: u64,
	/// Whole composed text, markers removed.
	pub t5: String,
	pub clip_l: String,
	pub clip_g: String,
}

/// Collapses the whitespace around commas, then comma runs.
pub(crate) fn normalize_commas(text: &str) -> String {
	let spaced = COMMA_SPACING.replace_all(text, ",");
	COMMA_RUN.replace_all(&spaced, ",").into_owned()
}

/// Byte range of the text strictly between the first two `marker` occurrences.
fn enclosed(text: &str, marker: &str) -> Option<(usize, usize)> {
	let first = text.find(marker)?;
	let start = first + marker.len();
	let second = text[start..].find(marker)? + start;
	Some((start, second))
}

/// Removes the first `marker` pair and everything between it.
///
/// Commas and spaces at both splice points are trimmed; the two remaining
/// sides are rejoined with a space.
fn cut(text: &str, marker: &str) -> String {
	let Some((start, end)) = enclosed(text, marker) else {
		return text.to_owned();
	};
	let trim = |side: &str| side.trim_matches([',', ' ']).to_owned();
	let before = trim(&text[..start - marker.len()]);
	let after = trim(&text[end + marker.len()..]);
	match (before.is_empty(), after.is_empty()) {
		(true, _) => after,
		(_, true) => before,
		_ => format!("{before} {after}"),
	}
}

fn strip_markers(text: &str) -> String {
	text.replace(BREAK_CLIPL, "").replace(BREAK_CLIPG, "")
}

/// Final clean-up applied to every returned text.
fn finish(text: &str) -> String {
	let text = normalize_commas(text);
	let text = SPACE_RUN.replace_all(&text, " ");
	let text = text.trim();
	text.strip_prefix(',').unwrap_or(text).trim().to_owned()
}

/// Splits composed, marker-bearing text into the prompt and its segments.
///
/// # Behavior
/// - Each segment is read between the first two occurrences of its marker,
///   on its own copy of the comma-normalized text.
/// - A marker that does not occur twice yields an empty segment.
/// - `t5` keeps the enclosed content and only loses the markers.
/// - `prompt` loses both marker pairs together with their content.
pub fn split(text: &str, seed: u64) -> PromptOutput {
	let normalized = normalize_commas(text);

	let segment = |marker: &str| {
		enclosed(&normalized, marker)
			.map(|(start, end)| finish(&strip_markers(&normalized[start..end])))
			.unwrap_or_default()
	};
	let clip_l = segment(BREAK_CLIPL);
	let clip_g = segment(BREAK_CLIPG);

	let t5 = finish(&strip_markers(&normalized));
	// Unpaired markers are not cut, strip whatever is left
	let prompt = finish(&strip_markers(&cut(&cut(&normalized, BREAK_CLIPL), BREAK_CLIPG)));

	PromptOutput { prompt, seed, t5, clip_l, clip_g }
}
