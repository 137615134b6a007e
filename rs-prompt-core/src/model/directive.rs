/// How a single attribute field should be filled.
///
/// Parsed from the raw text a caller supplies for a field:
/// - `"disabled"` (any case) → `Disabled`
/// - text containing a comma → `ChoiceSet` of the trimmed options
/// - `"random"` (any case) → `Random`
/// - anything else, the empty string included → `Explicit`
///
/// The comma check runs before the `random` check, so `"random, red"` is a
/// choice between the literal options `random` and `red`.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldDirective {
	Disabled,
	Random,
	Explicit(String),
	ChoiceSet(Vec<String>),
}

impl FieldDirective {
	pub fn parse(raw: &str) -> Self {
		if raw.eq_ignore_ascii_case("disabled") {
			FieldDirective::Disabled
		} else if raw.contains(',') {
			FieldDirective::ChoiceSet(raw.split(',').map(|choice| choice.trim().to_owned()).collect())
		} else if raw.eq_ignore_ascii_case("random") {
			FieldDirective::Random
		} else {
			FieldDirective::Explicit(raw.to_owned())
		}
	}

	pub fn is_disabled(&self) -> bool {
		matches!(self, FieldDirective::Disabled)
	}

	pub fn is_random(&self) -> bool {
		matches!(self, FieldDirective::Random)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn keywords_are_case_insensitive() {
		assert_eq!(FieldDirective::parse("Disabled"), FieldDirective::Disabled);
		assert_eq!(FieldDirective::parse("RANDOM"), FieldDirective::Random);
	}

	#[test]
	fn comma_text_is_a_trimmed_choice_set() {
		assert_eq!(
			FieldDirective::parse(" red dress,  blue jeans ,"),
			FieldDirective::ChoiceSet(vec!["red dress".into(), "blue jeans".into(), "".into()])
		);
	}

	#[test]
	fn comma_wins_over_random_keyword() {
		assert!(matches!(FieldDirective::parse("random, red"), FieldDirective::ChoiceSet(_)));
	}

	#[test]
	fn anything_else_is_explicit() {
		assert_eq!(FieldDirective::parse(""), FieldDirective::Explicit(String::new()));
		assert_eq!(FieldDirective::parse("randomly"), FieldDirective::Explicit("randomly".into()));
	}
}
