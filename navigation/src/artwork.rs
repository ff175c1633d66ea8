use std::fmt;

use crosswalk::{iref::IriBuf, template::var};
use crosswalk_sparql::Binding;

/// Artwork typed with a concept at or below the current one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artwork {
	pub iri: IriBuf,
	pub label: String,
	pub type_iri: IriBuf,
	pub type_label: String,
}

impl Artwork {
	/// Reads an artwork membership solution.
	///
	/// Returns `None` if a variable is unbound or an IRI is invalid.
	pub fn from_binding(row: &Binding) -> Option<Self> {
		Some(Self {
			iri: IriBuf::new(row.iri(var::ARTWORK)?.to_owned()).ok()?,
			label: row.value(var::ARTWORK_LABEL)?.to_owned(),
			type_iri: IriBuf::new(row.iri(var::TYPE)?.to_owned()).ok()?,
			type_label: row.value(var::TYPE_LABEL)?.to_owned(),
		})
	}
}

impl fmt::Display for Artwork {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "({}){} {}", self.type_label, self.iri, self.label)
	}
}

/// Text block listing the artworks, one per line, in the given order.
pub fn listing(artworks: &[Artwork]) -> String {
	artworks
		.iter()
		.map(ToString::to_string)
		.collect::<Vec<_>>()
		.join("\n")
}
