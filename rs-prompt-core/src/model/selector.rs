use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

use super::directive::FieldDirective;
use super::vocabulary::{Category, Vocabulary};
use crate::error::PromptError;

/// Resolves field directives into concrete strings.
///
/// A `Selector` owns the seeded generator of one generation session.
/// Every draw advances that generator, so the order in which fields are
/// resolved decides which values later fields receive.
///
/// ## Draws per operation
/// - `resolve`: one for `Random` and `ChoiceSet`, none otherwise
/// - `coin_flip`: one
/// - `sample_distinct`: one for the size, then the sampling itself
/// - `weight`: one
#[derive(Debug)]
pub struct Selector {
	rng: StdRng,
}

impl Selector {
	pub fn new(seed: u64) -> Self {
		Self { rng: StdRng::seed_from_u64(seed) }
	}

	/// Resolves `directive` against the vocabulary of `category`.
	///
	/// # Errors
	/// Returns `InvalidVocabulary` if a `Random` draw hits an empty vocabulary.
	pub fn resolve(
		&mut self,
		directive: &FieldDirective,
		category: Category,
		vocabulary: &Vocabulary,
	) -> Result<String, PromptError> {
		match directive {
			FieldDirective::Disabled => Ok(String::new()),
			FieldDirective::Explicit(value) => Ok(value.clone()),
			// Never empty: a comma-bearing split yields at least two options
			FieldDirective::ChoiceSet(options) => Ok(options.choose(&mut self.rng).cloned().unwrap_or_default()),
			FieldDirective::Random => self.pick(category, vocabulary),
		}
	}

	/// Picks one vocabulary entry uniformly.
	pub fn pick(&mut self, category: Category, vocabulary: &Vocabulary) -> Result<String, PromptError> {
		vocabulary
			.entries()
			.choose(&mut self.rng)
			.cloned()
			.ok_or_else(|| PromptError::InvalidVocabulary {
				category,
				reason: "cannot draw from an empty vocabulary".to_owned(),
			})
	}

	/// Unweighted coin flip.
	pub fn coin_flip(&mut self) -> bool {
		self.rng.random_bool(0.5)
	}

	/// Samples between `min` and `max` (inclusive) distinct entries.
	///
	/// # Errors
	/// Returns `InvalidVocabulary` if the vocabulary holds fewer than `max`
	/// entries, whatever size ends up drawn.
	pub fn sample_distinct(
		&mut self,
		category: Category,
		vocabulary: &Vocabulary,
		min: usize,
		max: usize,
	) -> Result<Vec<String>, PromptError> {
		if vocabulary.len() < max {
			return Err(PromptError::InvalidVocabulary {
				category,
				reason: format!("needs at least {} entries, has {}", max, vocabulary.len()),
			});
		}

		let amount = self.rng.random_range(min..=max);
		let entries = vocabulary.entries();
		Ok(rand::seq::index::sample(&mut self.rng, entries.len(), amount)
			.iter()
			.map(|index| entries[index].clone())
			.collect())
	}

	/// Uniform value in `[low, high]`, rounded to one decimal place.
	pub fn weight(&mut self, low: f64, high: f64) -> f64 {
		let value: f64 = self.rng.random_range(low..=high);
		(value * 10.0).round() / 10.0
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashSet;

	fn lighting() -> Vocabulary {
		Vocabulary::new(["soft light", "rim light", "neon", "golden hour", "backlit", "candlelight"])
	}

	#[test]
	fn disabled_and_explicit_do_not_draw() {
		let vocabulary = lighting();
		let mut touched = Selector::new(7);
		assert_eq!(touched.resolve(&FieldDirective::Disabled, Category::Lighting, &vocabulary).unwrap(), "");
		assert_eq!(
			touched.resolve(&FieldDirective::Explicit("neon".into()), Category::Lighting, &vocabulary).unwrap(),
			"neon"
		);
		let after = touched.pick(Category::Lighting, &vocabulary).unwrap();

		let mut fresh = Selector::new(7);
		assert_eq!(fresh.pick(Category::Lighting, &vocabulary).unwrap(), after);
	}

	#[test]
	fn same_seed_same_draws() {
		let vocabulary = lighting();
		let mut a = Selector::new(42);
		let mut b = Selector::new(42);
		for _ in 0..20 {
			assert_eq!(
				a.resolve(&FieldDirective::Random, Category::Lighting, &vocabulary).unwrap(),
				b.resolve(&FieldDirective::Random, Category::Lighting, &vocabulary).unwrap()
			);
		}
	}

	#[test]
	fn choice_set_picks_one_option() {
		let directive = FieldDirective::parse("red, blue");
		let mut selector = Selector::new(3);
		for _ in 0..20 {
			let value = selector.resolve(&directive, Category::HairColor, &Vocabulary::default()).unwrap();
			assert!(value == "red" || value == "blue");
		}
	}

	#[test]
	fn random_on_empty_vocabulary_fails() {
		let mut selector = Selector::new(1);
		let result = selector.resolve(&FieldDirective::Random, Category::Pose, &Vocabulary::default());
		assert!(matches!(result, Err(PromptError::InvalidVocabulary { category: Category::Pose, .. })));
	}

	#[test]
	fn sample_is_distinct_and_bounded() {
		let vocabulary = lighting();
		for seed in 0..50 {
			let mut selector = Selector::new(seed);
			let sample = selector.sample_distinct(Category::Lighting, &vocabulary, 2, 5).unwrap();
			assert!((2..=5).contains(&sample.len()));
			let unique: HashSet<_> = sample.iter().collect();
			assert_eq!(unique.len(), sample.len());
			assert!(sample.iter().all(|entry| vocabulary.contains(entry)));
		}
	}

	#[test]
	fn sample_rejects_small_vocabulary() {
		let vocabulary = Vocabulary::new(["a", "b", "c", "d"]);
		let mut selector = Selector::new(0);
		assert!(selector.sample_distinct(Category::Lighting, &vocabulary, 2, 5).is_err());
	}

	#[test]
	fn weight_has_one_decimal() {
		let mut selector = Selector::new(9);
		for _ in 0..50 {
			let weight = selector.weight(1.1, 1.5);
			assert!((1.1..=1.5).contains(&weight));
			assert_eq!(format!("{weight:.1}").parse::<f64>().unwrap(), weight);
		}
	}
}
