use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PromptError;
use crate::io;

/// Attribute categories, one vocabulary each.
///
/// The snake_case name of a category is both its request key and the stem
/// of its vocabulary file (`lighting` → `lighting.json`).
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Category {
	Artform,
	PhotoType,
	BodyTypes,
	DefaultTags,
	Roles,
	Hairstyles,
	AdditionalDetails,
	PhotographyStyles,
	Device,
	Photographer,
	Artist,
	DigitalArtform,
	Place,
	Lighting,
	Clothing,
	Composition,
	Pose,
	Background,
	FaceFeatures,
	EyeColors,
	FacialHair,
	SkinTone,
	AgeGroup,
	Ethnicity,
	Accessories,
	Expression,
	TattoosScars,
	MakeupStyles,
	HairColor,
	BodyMarkings,
}

impl Category {
	/// Every category, in the host node's declaration order.
	pub const ALL: [Category; 30] = [
		Category::Artform,
		Category::PhotoType,
		Category::BodyTypes,
		Category::DefaultTags,
		Category::Roles,
		Category::Hairstyles,
		Category::AdditionalDetails,
		Category::PhotographyStyles,
		Category::Device,
		Category::Photographer,
		Category::Artist,
		Category::DigitalArtform,
		Category::Place,
		Category::Lighting,
		Category::Clothing,
		Category::Composition,
		Category::Pose,
		Category::Background,
		Category::FaceFeatures,
		Category::EyeColors,
		Category::FacialHair,
		Category::SkinTone,
		Category::AgeGroup,
		Category::Ethnicity,
		Category::Accessories,
		Category::Expression,
		Category::TattoosScars,
		Category::MakeupStyles,
		Category::HairColor,
		Category::BodyMarkings,
	];

	pub fn name(self) -> &'static str {
		match self {
			Category::Artform => "artform",
			Category::PhotoType => "photo_type",
			Category::BodyTypes => "body_types",
			Category::DefaultTags => "default_tags",
			Category::Roles => "roles",
			Category::Hairstyles => "hairstyles",
			Category::AdditionalDetails => "additional_details",
			Category::PhotographyStyles => "photography_styles",
			Category::Device => "device",
			Category::Photographer => "photographer",
			Category::Artist => "artist",
			Category::DigitalArtform => "digital_artform",
			Category::Place => "place",
			Category::Lighting => "lighting",
			Category::Clothing => "clothing",
			Category::Composition => "composition",
			Category::Pose => "pose",
			Category::Background => "background",
			Category::FaceFeatures => "face_features",
			Category::EyeColors => "eye_colors",
			Category::FacialHair => "facial_hair",
			Category::SkinTone => "skin_tone",
			Category::AgeGroup => "age_group",
			Category::Ethnicity => "ethnicity",
			Category::Accessories => "accessories",
			Category::Expression => "expression",
			Category::TattoosScars => "tattoos_scars",
			Category::MakeupStyles => "makeup_styles",
			Category::HairColor => "hair_color",
			Category::BodyMarkings => "body_markings",
		}
	}
}

impl fmt::Display for Category {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

impl FromStr for Category {
	type Err = PromptError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Category::ALL
			.into_iter()
			.find(|category| category.name() == s)
			.ok_or_else(|| PromptError::UnknownField(s.to_owned()))
	}
}

/// Ordered list of unique candidate strings for one category.
///
/// # Invariants
/// - No entry appears twice
/// - Entries keep the order of their first occurrence
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Vocabulary {
	entries: Vec<String>,
}

impl Vocabulary {
	/// Builds a vocabulary, dropping repeated entries.
	pub fn new<I, S>(entries: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let mut seen = HashSet::new();
		let entries = entries
			.into_iter()
			.map(Into::into)
			.filter(|entry: &String| seen.insert(entry.clone()))
			.collect();
		Self { entries }
	}

	pub fn entries(&self) -> &[String] {
		&self.entries
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Exact, case-sensitive membership test.
	pub fn contains(&self, value: &str) -> bool {
		self.entries.iter().any(|entry| entry == value)
	}
}

/// The vocabularies backing every category.
///
/// A category that was never inserted behaves as an empty vocabulary.
#[derive(Clone, Debug, Default)]
pub struct VocabularySet {
	vocabularies: HashMap<Category, Vocabulary>,
	empty: Vocabulary,
}

impl VocabularySet {
	pub fn new() -> Self {
		Self::default()
	}

	/// Replaces the vocabulary of `category`.
	pub fn insert<I, S>(&mut self, category: Category, entries: I)
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.vocabularies.insert(category, Vocabulary::new(entries));
	}

	/// Chaining variant of `insert`.
	pub fn with<I, S>(mut self, category: Category, entries: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.insert(category, entries);
		self
	}

	pub fn get(&self, category: Category) -> &Vocabulary {
		self.vocabularies.get(&category).unwrap_or(&self.empty)
	}

	/// Loads `<category>.json` for every category found in a directory.
	///
	/// # Errors
	/// - The path is not valid UTF-8 or is not a directory
	/// - A vocabulary file exists but cannot be read or parsed
	///
	/// # Notes
	/// - The category of a file is its name without extension.
	/// - Files that do not name a category are ignored.
	/// - Categories without a file stay empty (logged as a warning).
	pub fn from_dir<P: AsRef<Path>>(path: P) -> Result<Self, PromptError> {
		let string_path = path.as_ref().to_str().ok_or_else(|| {
			std::io::Error::new(
				std::io::ErrorKind::InvalidInput,
				format!("Invalid directory path: {}", path.as_ref().display()),
			)
		})?;
		// Normalize "folder" / "folder/"
		let folder = io::normalize_folder(string_path);

		if !folder.is_dir() {
			return Err(std::io::Error::new(
				std::io::ErrorKind::NotFound,
				format!("Expected a directory, got: {}", folder.display()),
			)
			.into());
		}

		let mut set = Self::new();
		for file in io::list_files(&folder, "json")? {
			let Ok(category) = io::get_filename(&file)?.parse::<Category>() else {
				log::debug!("Ignoring {file}: not a known category");
				continue;
			};

			let raw = io::read_vocabulary_file(folder.join(&file))?;
			let raw_len = raw.len();
			set.insert(category, raw);
			let kept = set.get(category).len();
			if kept < raw_len {
				log::warn!("Removed {} duplicate entries from '{category}'", raw_len - kept);
			}
		}

		for category in Category::ALL {
			if !set.vocabularies.contains_key(&category) {
				log::warn!("No vocabulary file for '{category}' in {}", folder.display());
			}
		}

		log::info!("Loaded {} vocabularies from {}", set.vocabularies.len(), folder.display());
		Ok(set)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::fs;

	#[test]
	fn deduplicates_keeping_first_occurrence() {
		let vocabulary = Vocabulary::new(["b", "a", "b", "c", "a"]);
		assert_eq!(vocabulary.entries(), ["b", "a", "c"]);
	}

	#[test]
	fn category_names_round_trip() {
		for category in Category::ALL {
			assert_eq!(category.name().parse::<Category>().unwrap(), category);
		}
		assert!(matches!("hat".parse::<Category>(), Err(PromptError::UnknownField(_))));
	}

	#[test]
	fn serde_name_matches_display_name() {
		let json = serde_json::to_string(&Category::TattoosScars).unwrap();
		assert_eq!(json, "\"tattoos_scars\"");
	}

	#[test]
	fn missing_category_is_empty() {
		let set = VocabularySet::new().with(Category::Pose, ["standing"]);
		assert_eq!(set.get(Category::Pose).len(), 1);
		assert!(set.get(Category::Lighting).is_empty());
	}

	#[test]
	fn loads_directory() {
		let dir = tempfile::tempdir().unwrap();
		fs::write(dir.path().join("pose.json"), r#"["standing", "sitting", "standing"]"#).unwrap();
		fs::write(dir.path().join("place.json"), r#"["in a forest"]"#).unwrap();
		fs::write(dir.path().join("unrelated.json"), r#"["x"]"#).unwrap();

		let set = VocabularySet::from_dir(dir.path()).unwrap();
		assert_eq!(set.get(Category::Pose).entries(), ["standing", "sitting"]);
		assert!(set.get(Category::Place).contains("in a forest"));
		assert!(set.get(Category::Artist).is_empty());
	}

	#[test]
	fn rejects_file_path() {
		let dir = tempfile::tempdir().unwrap();
		let file = dir.path().join("pose.json");
		fs::write(&file, "[]").unwrap();
		assert!(matches!(VocabularySet::from_dir(&file), Err(PromptError::Io(_))));
	}

	#[cfg(unix)]
	#[test]
	fn rejects_non_utf8_path() {
		use std::ffi::OsStr;
		use std::os::unix::ffi::OsStrExt;

		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join(OsStr::from_bytes(b"data\xff"));

		let Err(PromptError::Io(error)) = VocabularySet::from_dir(&path) else {
			panic!("non UTF-8 path accepted");
		};
		assert_eq!(error.kind(), std::io::ErrorKind::InvalidInput);
	}
}
