use std::{fmt, str::FromStr};

use iref::Iri;
use serde::{Deserialize, Serialize};

use crate::vocab;

/// Classification scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
	/// Generic entity-classification graph (`wdt:P279` hierarchy).
	Wikidata,

	/// Thesaurus vocabulary (`gvp:broaderPreferred` hierarchy).
	Aat,

	/// Library-classification vocabulary (`skos:broader` hierarchy).
	Nomenclature,
}

/// Ordered IRI prefix table used to classify concepts.
///
/// The first matching prefix wins.
pub const PREFIXES: [(&str, Scheme); 3] = [
	(vocab::NOMENCLATURE, Scheme::Nomenclature),
	(vocab::AAT, Scheme::Aat),
	(vocab::WIKIDATA_ENTITY, Scheme::Wikidata),
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("IRI `{0}` does not belong to any known scheme")]
pub struct UnknownScheme(pub String);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown scheme name `{0}`")]
pub struct UnknownSchemeName(pub String);

impl Scheme {
	pub const ALL: [Self; 3] = [Self::Wikidata, Self::Aat, Self::Nomenclature];

	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Wikidata => "wikidata",
			Self::Aat => "aat",
			Self::Nomenclature => "nomenclature",
		}
	}

	/// Finds the scheme of the given IRI using the prefix table.
	pub fn of(iri: &Iri) -> Result<Self, UnknownScheme> {
		Self::of_str(iri.as_str())
	}

	pub fn of_str(iri: &str) -> Result<Self, UnknownScheme> {
		PREFIXES
			.iter()
			.find(|(prefix, _)| iri.starts_with(*prefix))
			.map(|(_, scheme)| *scheme)
			.ok_or_else(|| UnknownScheme(iri.to_owned()))
	}

	pub fn rotation(&self) -> Rotation {
		match self {
			Self::Wikidata => Rotation::new(*self, Self::Nomenclature, Self::Aat),
			Self::Aat => Rotation::new(*self, Self::Wikidata, Self::Nomenclature),
			Self::Nomenclature => Rotation::new(*self, Self::Aat, Self::Wikidata),
		}
	}
}

impl fmt::Display for Scheme {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Scheme {
	type Err = UnknownSchemeName;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::ALL
			.into_iter()
			.find(|scheme| scheme.as_str() == s)
			.ok_or_else(|| UnknownSchemeName(s.to_owned()))
	}
}

/// Side of the presentation on which an equivalent scheme is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
	Left,
	Right,
}

impl fmt::Display for Side {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Left => f.write_str("left"),
			Self::Right => f.write_str("right"),
		}
	}
}

/// Placement of the two other schemes around the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rotation {
	pub current: Scheme,
	pub left: Scheme,
	pub right: Scheme,
}

impl Rotation {
	fn new(current: Scheme, left: Scheme, right: Scheme) -> Self {
		Self {
			current,
			left,
			right,
		}
	}

	pub fn get(&self, side: Side) -> Scheme {
		match side {
			Side::Left => self.left,
			Side::Right => self.right,
		}
	}

	/// Returns the side on which `scheme` is shown, if it is not the current
	/// scheme.
	pub fn side_of(&self, scheme: Scheme) -> Option<Side> {
		if scheme == self.left {
			Some(Side::Left)
		} else if scheme == self.right {
			Some(Side::Right)
		} else {
			None
		}
	}
}
