use serde::{Deserialize, Serialize};

use crate::{Concept, MatchKind, Side};

/// Concept of another scheme equivalent to the current one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equivalent {
	pub concept: Concept,
	pub kind: MatchKind,
}

impl Equivalent {
	pub fn new(concept: Concept, kind: MatchKind) -> Self {
		Self { concept, kind }
	}
}

/// Where the user currently is.
///
/// An empty `broader`, `left` or `right` means the corresponding affordance
/// must not be offered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
	pub current: Concept,
	pub broader: Option<Concept>,
	pub left: Option<Equivalent>,
	pub right: Option<Equivalent>,
}

impl Classification {
	pub fn new(current: Concept) -> Self {
		Self {
			current,
			broader: None,
			left: None,
			right: None,
		}
	}

	pub fn equivalent(&self, side: Side) -> Option<&Equivalent> {
		match side {
			Side::Left => self.left.as_ref(),
			Side::Right => self.right.as_ref(),
		}
	}

	pub fn left_match(&self) -> MatchKind {
		self.left.as_ref().map(|e| e.kind).unwrap_or_default()
	}

	pub fn right_match(&self) -> MatchKind {
		self.right.as_ref().map(|e| e.kind).unwrap_or_default()
	}
}
