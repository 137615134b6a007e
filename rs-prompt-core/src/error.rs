use crate::model::vocabulary::Category;

/// Error type for prompt generation and vocabulary loading.
#[derive(Debug, thiserror::Error)]
pub enum PromptError {
	/// A vocabulary cannot serve the requested draw
	#[error("Invalid vocabulary '{category}': {reason}")]
	InvalidVocabulary {
		category: Category,
		reason: String,
	},

	/// A request key that does not name any field
	#[error("Unknown field: {0}")]
	UnknownField(String),

	/// A malformed `field=value` override
	#[error("Invalid assignment: {0}")]
	InvalidAssignment(String),

	#[error(transparent)]
	Io(#[from] std::io::Error),

	#[error(transparent)]
	Json(#[from] serde_json::Error),
}
