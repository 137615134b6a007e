use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::directive::FieldDirective;
use super::vocabulary::Category;
use crate::error::PromptError;

/// Raw directive text of a field that was not set.
pub const DISABLED: &str = "disabled";

/// Input of one generation call.
///
/// Holds the seed, the two free-text fields and the raw directive text of
/// every category. Categories that are not set read as `"disabled"`, so a
/// JSON request only needs to list the fields it uses:
///
/// ```json
/// { "seed": 42, "subject": "a cat", "artform": "photography" }
/// ```
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct PromptRequest {
	pub seed: u64,
	/// Free text placed first, verbatim.
	pub custom: String,
	/// Explicit subject; when empty the subject comes from `default_tags`.
	pub subject: String,
	#[serde(flatten)]
	directives: BTreeMap<Category, String>,
}

impl PromptRequest {
	pub fn new(seed: u64) -> Self {
		Self { seed, ..Self::default() }
	}

	/// Sets the raw directive of `category`.
	pub fn with(mut self, category: Category, raw: &str) -> Self {
		self.directives.insert(category, raw.to_owned());
		self
	}

	pub fn with_subject(mut self, subject: &str) -> Self {
		self.subject = subject.to_owned();
		self
	}

	pub fn with_custom(mut self, custom: &str) -> Self {
		self.custom = custom.to_owned();
		self
	}

	/// Raw directive text of `category` (`"disabled"` when unset).
	pub fn raw(&self, category: Category) -> &str {
		self.directives.get(&category).map(String::as_str).unwrap_or(DISABLED)
	}

	pub fn directive(&self, category: Category) -> FieldDirective {
		FieldDirective::parse(self.raw(category))
	}

	/// Applies a single `field = value` override by field name.
	///
	/// # Errors
	/// - `UnknownField` if `field` names nothing
	/// - `InvalidAssignment` if `seed` is not an unsigned integer
	pub fn set(&mut self, field: &str, value: &str) -> Result<(), PromptError> {
		match field {
			"seed" => {
				self.seed = value
					.trim()
					.parse()
					.map_err(|_| PromptError::InvalidAssignment(format!("seed must be an unsigned integer, got '{value}'")))?;
			}
			"custom" => self.custom = value.to_owned(),
			"subject" => self.subject = value.to_owned(),
			name => {
				let category: Category = name.parse()?;
				self.directives.insert(category, value.to_owned());
			}
		}
		Ok(())
	}

	/// Applies an override written as `field=value`.
	pub fn apply(&mut self, assignment: &str) -> Result<(), PromptError> {
		let (field, value) = assignment
			.split_once('=')
			.ok_or_else(|| PromptError::InvalidAssignment(format!("expected field=value, got '{assignment}'")))?;
		self.set(field.trim(), value)
	}
}
