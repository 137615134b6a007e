use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use super::directive::FieldDirective;
use super::request::PromptRequest;
use super::selector::Selector;
use super::splitter::{self, BREAK_CLIPG, BREAK_CLIPL, PromptOutput};
use super::vocabulary::{Category, VocabularySet};
use crate::error::PromptError;

static SPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" +").expect("valid regex"));
static COMMA_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r",(?:\s*,)+").expect("valid regex"));

/// Fields appended right after the subject, each resolved unconditionally.
///
/// The `clothing` directive is resolved here against the additional details
/// vocabulary, on top of the clothing connective added afterwards.
const SUBJECT_DETAILS: [(Category, Category); 3] = [
	(Category::Roles, Category::Roles),
	(Category::Hairstyles, Category::Hairstyles),
	(Category::Clothing, Category::AdditionalDetails),
];

/// Fields appended between the CLIP-G and CLIP-L segments, in order.
const APPEARANCE: [Category; 10] = [
	Category::FaceFeatures,
	Category::EyeColors,
	Category::SkinTone,
	Category::AgeGroup,
	Category::Ethnicity,
	Category::Accessories,
	Category::Expression,
	Category::TattoosScars,
	Category::HairColor,
	Category::BodyMarkings,
];

/// Style used when a photograph is requested without a photography style.
const DEFAULT_PHOTO_STYLE: &str = "photography";
/// Lighting entries drawn for a random lighting directive.
const LIGHTING_SAMPLE: (usize, usize) = (2, 5);
/// Emphasis range of the photo type annotation.
const PHOTO_TYPE_WEIGHT: (f64, f64) = (1.1, 1.5);

/// Prompt generator over a fixed set of vocabularies.
///
/// # Responsibilities
/// - Resolve every field of a `PromptRequest` in a fixed order
/// - Stitch the resolved values with their connectives and segment markers
/// - Hand the composed text to the splitter
///
/// The generator only reads its vocabularies: `generate` takes `&self` and
/// every call seeds its own `Selector`.
#[derive(Debug, Clone)]
pub struct Generator {
	vocabularies: VocabularySet,
}

/// Ordered text fragments of a prompt being composed.
///
/// Empty fragments are dropped on push; they would only add spaces.
#[derive(Debug, Default)]
struct Components {
	parts: Vec<String>,
}

impl Components {
	fn push(&mut self, part: impl Into<String>) {
		let part = part.into();
		if !part.is_empty() {
			self.parts.push(part);
		}
	}

	fn join(&self) -> String {
		self.parts.join(" ")
	}
}

impl Generator {
	pub fn new(vocabularies: VocabularySet) -> Self {
		Self { vocabularies }
	}

	/// Creates a generator from a directory of `<category>.json` files.
	///
	/// See `VocabularySet::from_dir`.
	pub fn from_dir<P: AsRef<Path>>(path: P) -> Result<Self, PromptError> {
		Ok(Self::new(VocabularySet::from_dir(path)?))
	}

	pub fn vocabularies(&self) -> &VocabularySet {
		&self.vocabularies
	}

	fn resolve(&self, selector: &mut Selector, request: &PromptRequest, category: Category) -> Result<String, PromptError> {
		self.resolve_with(selector, request, category, category)
	}

	/// Resolves the directive of `field` against the vocabulary of `vocabulary`.
	fn resolve_with(
		&self,
		selector: &mut Selector,
		request: &PromptRequest,
		field: Category,
		vocabulary: Category,
	) -> Result<String, PromptError> {
		selector.resolve(&request.directive(field), vocabulary, self.vocabularies.get(vocabulary))
	}

	/// Generates a prompt and its segments.
	///
	/// # Errors
	/// - `InvalidVocabulary` if a `random` field has an empty vocabulary
	/// - `InvalidVocabulary` if random lighting has fewer than 5 entries
	///
	/// # Notes
	/// - Same vocabularies and request give the same output.
	/// - The resolution order is fixed; changing it changes every draw after it.
	pub fn generate(&self, request: &PromptRequest) -> Result<PromptOutput, PromptError> {
		let mut selector = Selector::new(request.seed);
		let mut components = Components::default();

		components.push(request.custom.as_str());

		let is_photographer = match request.directive(Category::Artform) {
			FieldDirective::Explicit(artform) => artform.eq_ignore_ascii_case("photography"),
			FieldDirective::Random => selector.coin_flip(),
			_ => false,
		};

		if is_photographer {
			let mut style = self.resolve(&mut selector, request, Category::PhotographyStyles)?;
			if style.is_empty() {
				style = DEFAULT_PHOTO_STYLE.to_owned();
			}
			components.push(style);
			if !request.directive(Category::DefaultTags).is_disabled() || !request.subject.is_empty() {
				components.push(" of");
			}
		}

		let tag = self.compose_subject(&mut selector, request, &mut components)?;

		for (field, vocabulary) in SUBJECT_DETAILS {
			components.push(self.resolve_with(&mut selector, request, field, vocabulary)?);
		}

		let places = self.vocabularies.get(Category::Place);
		if let Some(part) = components.parts.iter_mut().rev().find(|part| places.contains(part.as_str())) {
			part.push(',');
		}

		match request.directive(Category::Clothing) {
			FieldDirective::Disabled => (),
			directive => {
				let clothing = selector.resolve(&directive, Category::Clothing, self.vocabularies.get(Category::Clothing))?;
				components.push(", dressed in ");
				components.push(clothing);
			}
		}

		self.push_literal_or_random(&mut selector, request, &mut components, Category::Composition, "")?;
		self.push_literal_or_random(&mut selector, request, &mut components, Category::Pose, "")?;
		components.push(BREAK_CLIPG);

		self.push_literal_or_random(&mut selector, request, &mut components, Category::Background, "")?;
		self.push_literal_or_random(&mut selector, request, &mut components, Category::Place, ",")?;

		match request.directive(Category::Lighting) {
			FieldDirective::Disabled => (),
			FieldDirective::Random => {
				let (min, max) = LIGHTING_SAMPLE;
				let lights = selector.sample_distinct(Category::Lighting, self.vocabularies.get(Category::Lighting), min, max)?;
				components.push(",");
				components.push(lights.join(", "));
			}
			_ => {
				components.push(", ");
				components.push(request.raw(Category::Lighting));
			}
		}
		components.push(BREAK_CLIPG);

		for category in APPEARANCE {
			components.push(self.resolve(&mut selector, request, category)?);
		}

		let tag = tag.to_lowercase();
		if tag.contains("man") {
			components.push(self.resolve(&mut selector, request, Category::FacialHair)?);
		}
		if tag.contains("woman") {
			components.push(self.resolve(&mut selector, request, Category::MakeupStyles)?);
		}
		components.push(BREAK_CLIPL);

		if is_photographer {
			self.compose_photo_credits(&mut selector, request, &mut components)?;
		} else {
			components.push(self.resolve(&mut selector, request, Category::DigitalArtform)?);
			if !request.directive(Category::Artist).is_disabled() {
				let artist = self.resolve(&mut selector, request, Category::Artist)?;
				components.push(format!("by {artist}"));
			}
		}
		components.push(BREAK_CLIPL);

		log::debug!("Composed {} components for seed {}", components.parts.len(), request.seed);

		let text = components.join();
		let text = SPACE_RUN.replace_all(&text, " ").replace("of as", "of");
		let text = COMMA_RUN.replace_all(&text, ",");

		Ok(splitter::split(&text, request.seed))
	}

	/// Appends the subject phrase.
	///
	/// Returns the default tag text the phrase was built from: the drawn tag,
	/// the literal `default_tags` text, or empty when disabled.
	fn compose_subject(
		&self,
		selector: &mut Selector,
		request: &PromptRequest,
		components: &mut Components,
	) -> Result<String, PromptError> {
		let default_tags = request.directive(Category::DefaultTags);
		let body_type = request.directive(Category::BodyTypes);
		let body_vocabulary = self.vocabularies.get(Category::BodyTypes);

		let tag = match default_tags {
			FieldDirective::Disabled => String::new(),
			FieldDirective::Random if request.subject.is_empty() => {
				if !body_type.is_disabled() {
					let body = selector.resolve(&body_type, Category::BodyTypes, body_vocabulary)?;
					components.push("a ");
					components.push(body);
				}
				let tag = selector.pick(Category::DefaultTags, self.vocabularies.get(Category::DefaultTags))?;
				components.push(strip_article(&tag));
				tag
			}
			FieldDirective::Random => String::new(),
			_ => {
				let literal = request.raw(Category::DefaultTags).to_owned();
				if request.subject.is_empty() {
					components.push(literal.as_str());
				}
				literal
			}
		};

		if !request.subject.is_empty() {
			if !body_type.is_disabled() {
				let body = selector.resolve(&body_type, Category::BodyTypes, body_vocabulary)?;
				components.push("a ");
				components.push(body);
			}
			components.push(request.subject.as_str());
		}

		Ok(tag)
	}

	/// Appends `literal` / random value of `category` after a comma.
	///
	/// A random value additionally gets `random_suffix` appended.
	fn push_literal_or_random(
		&self,
		selector: &mut Selector,
		request: &PromptRequest,
		components: &mut Components,
		category: Category,
		random_suffix: &str,
	) -> Result<(), PromptError> {
		match request.directive(category) {
			FieldDirective::Disabled => (),
			FieldDirective::Random => {
				let value = selector.pick(category, self.vocabularies.get(category))?;
				components.push(",");
				components.push(value + random_suffix);
			}
			_ => {
				components.push(",");
				components.push(request.raw(category));
			}
		}
		Ok(())
	}

	/// Appends the photo type emphasis, the device and the photographer.
	fn compose_photo_credits(
		&self,
		selector: &mut Selector,
		request: &PromptRequest,
		components: &mut Components,
	) -> Result<(), PromptError> {
		if !request.directive(Category::PhotoType).is_disabled() {
			let photo_type = self.resolve(selector, request, Category::PhotoType)?;
			if !photo_type.is_empty() && photo_type != "random" && photo_type != "disabled" {
				let (low, high) = PHOTO_TYPE_WEIGHT;
				let weight = selector.weight(low, high);
				components.push(format!(", ({photo_type}:{weight:.1}), "));
			}
		}

		let device = self.resolve(selector, request, Category::Device)?;
		let photographer = self.resolve(selector, request, Category::Photographer)?;
		if request.directive(Category::Device).is_disabled() {
			components.push(device);
		} else {
			components.push(format!(", shot on {device}"));
		}
		if request.directive(Category::Photographer).is_disabled() {
			components.push(photographer);
		} else {
			components.push(format!(", photo by {photographer}"));
		}
		Ok(())
	}
}

/// Drops a leading indefinite article.
fn strip_article(tag: &str) -> &str {
	tag.strip_prefix("a ").or_else(|| tag.strip_prefix("an ")).unwrap_or(tag)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn strips_leading_article_only() {
		assert_eq!(strip_article("a robot"), "robot");
		assert_eq!(strip_article("an owl"), "owl");
		assert_eq!(strip_article("a man with a hat"), "man with a hat");
		assert_eq!(strip_article("samba dancer"), "samba dancer");
	}

	#[test]
	fn components_skip_empty_parts() {
		let mut components = Components::default();
		components.push("a");
		components.push("");
		components.push(String::from("b"));
		assert_eq!(components.join(), "a b");
	}

	#[test]
	fn explicit_default_tags_with_subject_only_feed_traits() {
		let generator = Generator::new(VocabularySet::new().with(Category::FacialHair, ["beard"]));
		let request = PromptRequest::new(0)
			.with_subject("a sailor")
			.with(Category::DefaultTags, "old man")
			.with(Category::FacialHair, "random");
		let output = generator.generate(&request).unwrap();
		assert_eq!(output.prompt, "a sailor beard");
		assert_eq!(output.t5, "a sailor beard");
		assert_eq!(output.clip_l, "");
	}
}
