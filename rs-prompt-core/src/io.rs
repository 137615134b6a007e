use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

use crate::error::PromptError;

/// Reads a vocabulary file and returns its entries in file order.
///
/// - The file must contain a single JSON array of strings
/// - Duplicates are kept; deduplication happens in `Vocabulary`
pub fn read_vocabulary_file<P: AsRef<Path>>(filename: P) -> Result<Vec<String>, PromptError> {
	let reader = BufReader::new(File::open(filename)?);
	let entries: Vec<String> = serde_json::from_reader(reader)?;
	Ok(entries)
}

/// Extracts the base filename without extension.
///
/// Examples:
/// - `"./data/lighting.json"` → `"lighting"`
/// - `"pose.json"` → `"pose"`
pub fn get_filename<P: AsRef<Path>>(input_path: P) -> io::Result<String> {
	let stem = input_path
		.as_ref()
		.file_stem()
		.ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Path has no filename"))?;

	Ok(stem.to_string_lossy().to_string())
}

/// Normalize a folder path.
///
/// - `"."` or `"./"` resolves to the current working directory
/// - Other paths are returned as-is (not canonicalized)
pub fn normalize_folder(input: &str) -> PathBuf {
	if input == "." || input == "./" {
		env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
	} else {
		PathBuf::from(input)
	}
}

/// Lists all files with a given extension in a directory.
///
/// Returns file names only (no paths), sorted.
pub fn list_files<P: AsRef<Path>>(dir: P, extension: &str) -> io::Result<Vec<String>> {
	let mut files = Vec::new();

	for entry in fs::read_dir(dir)? {
		let path = entry?.path();

		if path.is_file() && path.extension() == Some(std::ffi::OsStr::new(extension)) {
			if let Some(name) = path.file_name() {
				files.push(name.to_string_lossy().to_string());
			}
		}
	}

	files.sort();
	Ok(files)
}
