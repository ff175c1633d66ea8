use std::fmt;

use iref::Iri;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("IRI `{0}` cannot be written in a query")]
pub struct UnsafeIri(pub String);

/// IRI written as a SPARQL `IRIREF` term.
///
/// This is the only way an IRI enters a query template.
#[derive(Debug, Clone, Copy)]
pub struct IriTerm<'a>(&'a str);

impl<'a> IriTerm<'a> {
	pub fn new(iri: &'a Iri) -> Result<Self, UnsafeIri> {
		Self::parse(iri.as_str())
	}

	/// Checks a raw string against the `IRIREF` production.
	///
	/// Used for values that were not parsed as IRIs, such as graph names
	/// given on the command line.
	pub fn parse(value: &'a str) -> Result<Self, UnsafeIri> {
		if !value.is_empty() && value.chars().all(is_iriref_char) {
			Ok(Self(value))
		} else {
			Err(UnsafeIri(value.to_owned()))
		}
	}

	pub fn as_str(&self) -> &'a str {
		self.0
	}
}

fn is_iriref_char(c: char) -> bool {
	!matches!(c, '<' | '>' | '"' | '{' | '}' | '|' | '^' | '`' | '\\' | '\u{0}'..='\u{20}')
}

impl<'a> fmt::Display for IriTerm<'a> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "<{}>", self.0)
	}
}
