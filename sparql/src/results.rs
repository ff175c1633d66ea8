//! SPARQL 1.1 query results JSON format.
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

/// RDF term bound to a result variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Term {
	Uri {
		value: String,
	},
	#[serde(alias = "typed-literal")]
	Literal {
		value: String,

		#[serde(rename = "xml:lang", default, skip_serializing_if = "Option::is_none")]
		lang: Option<String>,

		#[serde(default, skip_serializing_if = "Option::is_none")]
		datatype: Option<String>,
	},
	Bnode {
		value: String,
	},
}

impl Term {
	pub fn iri(value: impl Into<String>) -> Self {
		Self::Uri {
			value: value.into(),
		}
	}

	pub fn literal(value: impl Into<String>, lang: Option<&str>) -> Self {
		Self::Literal {
			value: value.into(),
			lang: lang.map(ToOwned::to_owned),
			datatype: None,
		}
	}

	pub fn value(&self) -> &str {
		match self {
			Self::Uri { value } | Self::Literal { value, .. } | Self::Bnode { value } => value,
		}
	}

	pub fn as_iri(&self) -> Option<&str> {
		match self {
			Self::Uri { value } => Some(value),
			_ => None,
		}
	}
}

/// One solution of a `SELECT` query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Binding(HashMap<String, Term>);

impl Binding {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with(mut self, var: &str, term: Term) -> Self {
		self.0.insert(var.to_owned(), term);
		self
	}

	pub fn get(&self, var: &str) -> Option<&Term> {
		self.0.get(var)
	}

	/// Lexical value bound to `var`, whatever its kind.
	pub fn value(&self, var: &str) -> Option<&str> {
		self.get(var).map(Term::value)
	}

	/// IRI bound to `var`, if it is an IRI.
	pub fn iri(&self, var: &str) -> Option<&str> {
		self.get(var).and_then(Term::as_iri)
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

#[derive(Deserialize)]
struct Document {
	#[serde(default)]
	results: Option<Solutions>,

	#[serde(default)]
	boolean: Option<bool>,
}

#[derive(Deserialize)]
struct Solutions {
	bindings: Vec<Binding>,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Json(#[from] serde_json::Error),

	#[error("missing `results` member")]
	MissingResults,

	#[error("missing `boolean` member")]
	MissingBoolean,
}

/// Reads the solutions of a `SELECT` query.
pub fn parse_bindings(body: &str) -> Result<Vec<Binding>, Error> {
	let document: Document = serde_json::from_str(body)?;
	document
		.results
		.map(|r| r.bindings)
		.ok_or(Error::MissingResults)
}

/// Reads the result of an `ASK` query.
pub fn parse_boolean(body: &str) -> Result<bool, Error> {
	let document: Document = serde_json::from_str(body)?;
	document.boolean.ok_or(Error::MissingBoolean)
}
