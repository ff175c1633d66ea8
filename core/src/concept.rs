use std::fmt;

use iref::{InvalidIri, Iri, IriBuf};
use serde::{Deserialize, Serialize};

use crate::{scheme::UnknownScheme, Scheme};

#[derive(Debug, thiserror::Error)]
pub enum InvalidConcept {
	#[error(transparent)]
	InvalidIri(InvalidIri<String>),

	#[error(transparent)]
	UnknownScheme(#[from] UnknownScheme),
}

/// Node of a scheme hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Concept {
	pub iri: IriBuf,
	pub label: String,
	pub scheme: Scheme,
}

impl Concept {
	/// Creates a concept, finding its scheme from the IRI prefix.
	pub fn new(iri: IriBuf, label: impl Into<String>) -> Result<Self, UnknownScheme> {
		let scheme = Scheme::of(&iri)?;
		Ok(Self {
			iri,
			label: label.into(),
			scheme,
		})
	}

	/// Parses the IRI then creates the concept.
	pub fn parse(iri: &str, label: impl Into<String>) -> Result<Self, InvalidConcept> {
		let iri = IriBuf::new(iri.to_owned()).map_err(InvalidConcept::InvalidIri)?;
		Ok(Self::new(iri, label)?)
	}

	pub fn iri(&self) -> &Iri {
		&self.iri
	}
}

impl fmt::Display for Concept {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} <{}>", self.label, self.iri)
	}
}
