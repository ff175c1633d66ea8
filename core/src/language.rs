use std::{fmt, str::FromStr};

use langtag::LanguageTagBuf;

#[derive(Debug, thiserror::Error)]
#[error("invalid label language `{value}`: {error}")]
pub struct InvalidLanguage {
	pub value: String,
	pub error: langtag::Error,
}

/// Language of the labels selected by every generated query.
///
/// The tag is validated before being written into a query, so it can only
/// contain the characters allowed by BCP 47.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelLanguage(String);

impl LabelLanguage {
	pub fn new(value: &str) -> Result<Self, InvalidLanguage> {
		match LanguageTagBuf::new(value.as_bytes().to_vec()) {
			Ok(_) => Ok(Self(value.to_owned())),
			Err((error, _)) => Err(InvalidLanguage {
				value: value.to_owned(),
				error,
			}),
		}
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl Default for LabelLanguage {
	fn default() -> Self {
		Self("en".to_owned())
	}
}

impl FromStr for LabelLanguage {
	type Err = InvalidLanguage;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::new(s)
	}
}

impl fmt::Display for LabelLanguage {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}
