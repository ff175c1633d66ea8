use std::fmt;

use serde::{Deserialize, Serialize};

use crate::vocab;

/// Kind of equivalence asserted between two concepts of different schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MatchKind {
	Exact,
	BroadMatch,
	CloseMatch,
	#[default]
	None,
}

impl MatchKind {
	/// Reads the match kind from an equivalence predicate IRI.
	///
	/// Only the SKOS mapping properties are recognized.
	pub fn from_predicate(predicate: &str) -> Self {
		match predicate.strip_prefix(vocab::SKOS) {
			Some("exactMatch") => Self::Exact,
			Some("broadMatch") => Self::BroadMatch,
			Some("closeMatch") => Self::CloseMatch,
			_ => Self::None,
		}
	}

	pub fn is_none(&self) -> bool {
		matches!(self, Self::None)
	}

	/// Rank used when several equivalents compete for the same side.
	///
	/// Lower is preferred.
	pub fn precedence(&self) -> u8 {
		match self {
			Self::Exact => 0,
			Self::BroadMatch => 1,
			Self::CloseMatch => 2,
			Self::None => u8::MAX,
		}
	}

	/// SKOS local name, as displayed to the user.
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Exact => "exactMatch",
			Self::BroadMatch => "broadMatch",
			Self::CloseMatch => "closeMatch",
			Self::None => "",
		}
	}
}

impl fmt::Display for MatchKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn skos_predicates() {
		assert_eq!(
			MatchKind::from_predicate("http://www.w3.org/2004/02/skos/core#exactMatch"),
			MatchKind::Exact
		);
		assert_eq!(
			MatchKind::from_predicate("http://www.w3.org/2004/02/skos/core#broadMatch"),
			MatchKind::BroadMatch
		);
		assert_eq!(
			MatchKind::from_predicate("http://www.w3.org/2004/02/skos/core#closeMatch"),
			MatchKind::CloseMatch
		);
	}

	#[test]
	fn other_predicates() {
		assert!(MatchKind::from_predicate("http://www.w3.org/2004/02/skos/core#related").is_none());
		assert!(MatchKind::from_predicate("https://example.org/ns#exactMatch").is_none());
	}

	#[test]
	fn precedence() {
		assert!(MatchKind::Exact.precedence() < MatchKind::BroadMatch.precedence());
		assert!(MatchKind::BroadMatch.precedence() < MatchKind::CloseMatch.precedence());
		assert!(MatchKind::CloseMatch.precedence() < MatchKind::None.precedence());
	}
}
