//! SPARQL query templates.
//!
//! Each scheme encodes its hierarchy and labels with different predicates.
//! A [`Profile`] captures those differences, and [`Templates`] binds the
//! caller-provided IRIs (through [`IriTerm`]) into the query text.
use std::fmt;

use iref::Iri;

use crate::{
	iri::{IriTerm, UnsafeIri},
	vocab, LabelLanguage, Scheme,
};

/// Result variables of the generated queries.
pub mod var {
	pub const CONCEPT: &str = "concept";
	pub const LABEL: &str = "label";
	pub const PARENT: &str = "parent";
	pub const ARTWORK: &str = "artwork";
	pub const ARTWORK_LABEL: &str = "artworkLabel";
	pub const TYPE: &str = "type";
	pub const TYPE_LABEL: &str = "typeLabel";
	pub const PREDICATE: &str = "p";
	pub const OBJECT: &str = "o";
}

/// How a scheme attaches a label to its concepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelShape {
	/// `rdfs:label`.
	Direct,

	/// `skos:prefLabel`.
	Preferred,

	/// `skosxl:prefLabel` object with a `skosxl:literalForm`.
	Reified,
}

impl LabelShape {
	fn pattern(&self, subject: &str, label: &str) -> String {
		match self {
			Self::Direct => format!("{subject} rdfs:label {label} ."),
			Self::Preferred => format!("{subject} skos:prefLabel {label} ."),
			Self::Reified => format!(
				"{subject} skosxl:prefLabel {label}Object .\n  {label}Object skosxl:literalForm {label} ."
			),
		}
	}
}

/// Per-scheme query knowledge.
#[derive(Debug, Clone, Copy)]
pub struct Profile {
	pub scheme: Scheme,

	/// One-level hierarchy predicate, from narrower to broader.
	pub hierarchy: &'static str,

	pub label: LabelShape,

	/// Whether artworks are typed directly with concepts of this scheme.
	///
	/// Other schemes reach the artwork-typing graph through SKOS mapping
	/// properties.
	pub native: bool,
}

pub const WIKIDATA: Profile = Profile {
	scheme: Scheme::Wikidata,
	hierarchy: "wdt:P279",
	label: LabelShape::Direct,
	native: true,
};

pub const AAT: Profile = Profile {
	scheme: Scheme::Aat,
	hierarchy: "gvp:broaderPreferred",
	label: LabelShape::Reified,
	native: false,
};

pub const NOMENCLATURE: Profile = Profile {
	scheme: Scheme::Nomenclature,
	hierarchy: "skos:broader",
	label: LabelShape::Preferred,
	native: false,
};

impl Scheme {
	pub fn profile(&self) -> &'static Profile {
		match self {
			Self::Wikidata => &WIKIDATA,
			Self::Aat => &AAT,
			Self::Nomenclature => &NOMENCLATURE,
		}
	}
}

impl Profile {
	/// Pattern binding `?type` to every artwork type at or below `?superclass`.
	fn typed_below(&self, superclass: &str) -> String {
		if self.native {
			format!("?type {}* {superclass} .", self.hierarchy)
		} else {
			format!(
				"?class {}* {superclass} .
  {{ ?type skos:exactMatch ?class }}
  UNION
  {{ ?type skos:broadMatch ?class }}
  UNION
  {{ ?type skos:closeMatch ?class }}",
				self.hierarchy
			)
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKind {
	Narrower,
	Broader,
	Label,
	Artworks,
	Equivalents,
}

impl fmt::Display for QueryKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Narrower => f.write_str("narrower"),
			Self::Broader => f.write_str("broader"),
			Self::Label => f.write_str("label"),
			Self::Artworks => f.write_str("artworks"),
			Self::Equivalents => f.write_str("equivalents"),
		}
	}
}

/// Generated query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
	pub kind: QueryKind,
	pub text: String,
}

impl Query {
	fn new(kind: QueryKind, text: String) -> Self {
		Self { kind, text }
	}

	pub fn as_str(&self) -> &str {
		&self.text
	}
}

impl fmt::Display for Query {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.text)
	}
}

/// Query builder.
#[derive(Debug, Clone)]
pub struct Templates {
	language: LabelLanguage,
	crosswalk_graph: String,
}

impl Default for Templates {
	fn default() -> Self {
		Self {
			language: LabelLanguage::default(),
			crosswalk_graph: vocab::CROSSWALK_GRAPH.to_owned(),
		}
	}
}

impl Templates {
	pub fn new(language: LabelLanguage) -> Self {
		Self {
			language,
			..Default::default()
		}
	}

	/// Changes the named graph holding the equivalence triples.
	pub fn with_crosswalk_graph(mut self, graph: &str) -> Result<Self, UnsafeIri> {
		IriTerm::parse(graph)?;
		self.crosswalk_graph = graph.to_owned();
		Ok(self)
	}

	pub fn language(&self) -> &LabelLanguage {
		&self.language
	}

	pub fn crosswalk_graph(&self) -> &str {
		&self.crosswalk_graph
	}

	fn lang_filter(&self, var: &str) -> String {
		format!("FILTER (lang({var}) = \"{}\")", self.language)
	}

	/// Concepts one level below `parent`, restricted to those reaching at
	/// least one artwork.
	pub fn narrower(&self, scheme: Scheme, parent: &Iri) -> Result<Query, UnsafeIri> {
		let profile = scheme.profile();
		let parent = IriTerm::new(parent)?;
		let text = format!(
			"{prologue}
SELECT DISTINCT ?concept ?label
WHERE {{
  BIND ({parent} AS ?parent)
  ?concept {hierarchy} ?parent .
  {label}
  {typed}
  ?artwork wdt:P31 ?type .
  {filter}
}}
ORDER BY ?label ?concept
",
			prologue = vocab::PROLOGUE,
			hierarchy = profile.hierarchy,
			label = profile.label.pattern("?concept", "?label"),
			typed = profile.typed_below("?concept"),
			filter = self.lang_filter("?label"),
		);

		Ok(Query::new(QueryKind::Narrower, text))
	}

	/// Parent of `iri`, one level up.
	pub fn broader(&self, scheme: Scheme, iri: &Iri) -> Result<Query, UnsafeIri> {
		let profile = scheme.profile();
		let iri = IriTerm::new(iri)?;
		let text = format!(
			"{prologue}
SELECT DISTINCT ?parent ?label
WHERE {{
  {iri} {hierarchy} ?parent .
  {label}
  {filter}
}}
ORDER BY ?label ?parent
",
			prologue = vocab::PROLOGUE,
			hierarchy = profile.hierarchy,
			label = profile.label.pattern("?parent", "?label"),
			filter = self.lang_filter("?label"),
		);

		Ok(Query::new(QueryKind::Broader, text))
	}

	/// Label of any concept, whatever its scheme.
	///
	/// No graph is specified since labels come from various graphs.
	pub fn label(&self, iri: &Iri) -> Result<Query, UnsafeIri> {
		let iri = IriTerm::new(iri)?;
		let text = format!(
			"{prologue}
SELECT DISTINCT ?label
WHERE {{
  {{ {preferred} }}
  UNION
  {{ {direct} }}
  UNION
  {{ {reified} }}
  {filter}
}}
ORDER BY ?label
",
			prologue = vocab::PROLOGUE,
			preferred = LabelShape::Preferred.pattern(&iri.to_string(), "?label"),
			direct = LabelShape::Direct.pattern(&iri.to_string(), "?label"),
			reified = LabelShape::Reified.pattern(&iri.to_string(), "?label"),
			filter = self.lang_filter("?label"),
		);

		Ok(Query::new(QueryKind::Label, text))
	}

	/// Artworks typed with `superclass` or any concept below it.
	pub fn artworks(&self, scheme: Scheme, superclass: &Iri) -> Result<Query, UnsafeIri> {
		let profile = scheme.profile();
		let superclass = IriTerm::new(superclass)?;
		let text = format!(
			"{prologue}
SELECT DISTINCT ?artwork ?artworkLabel ?type ?typeLabel
WHERE {{
  BIND ({superclass} AS ?superclass)
  {typed}
  ?type rdfs:label ?typeLabel .
  ?artwork wdt:P31 ?type .
  ?artwork rdfs:label ?artworkLabel .
  {type_filter}
  {filter}
}}
ORDER BY ?typeLabel ?artworkLabel ?artwork
",
			prologue = vocab::PROLOGUE,
			typed = profile.typed_below("?superclass"),
			type_filter = self.lang_filter("?typeLabel"),
			filter = self.lang_filter("?artworkLabel"),
		);

		Ok(Query::new(QueryKind::Artworks, text))
	}

	/// Every `(predicate, object)` pair of `iri` in the equivalence graph.
	pub fn equivalents(&self, iri: &Iri) -> Result<Query, UnsafeIri> {
		let iri = IriTerm::new(iri)?;
		let graph = IriTerm::parse(&self.crosswalk_graph)?;
		let text = format!(
			"SELECT DISTINCT ?p ?o
FROM {graph}
WHERE {{
  {iri} ?p ?o .
}}
"
		);

		Ok(Query::new(QueryKind::Equivalents, text))
	}
}

#[cfg(test)]
mod tests {
	use iref::IriBuf;

	use super::*;

	fn iri(s: &str) -> IriBuf {
		IriBuf::new(s.to_owned()).unwrap()
	}

	#[test]
	fn narrower_uses_scheme_predicate() {
		let t = Templates::default();
		let q = t
			.narrower(Scheme::Aat, &iri("http://vocab.getty.edu/aat/300043071"))
			.unwrap();
		assert_eq!(q.kind, QueryKind::Narrower);
		assert!(q
			.text
			.contains("?concept gvp:broaderPreferred ?parent ."));
		assert!(q.text.contains("?class gvp:broaderPreferred* ?concept ."));
		assert!(q.text.contains("skos:closeMatch"));
		assert!(q.text.contains("skosxl:literalForm ?label"));
		assert!(q.text.contains("FILTER (lang(?label) = \"en\")"));
		assert!(q.text.contains("ORDER BY ?label"));
		assert!(!q.text.contains("skos:broader "));
	}

	#[test]
	fn wikidata_needs_no_equivalence_join() {
		let t = Templates::default();
		let q = t
			.narrower(
				Scheme::Wikidata,
				&iri("http://www.wikidata.org/entity/Q613972"),
			)
			.unwrap();
		assert!(q.text.contains("?type wdt:P279* ?concept ."));
		assert!(!q.text.contains("skos:exactMatch"));

		let q = t
			.artworks(
				Scheme::Wikidata,
				&iri("http://www.wikidata.org/entity/Q613972"),
			)
			.unwrap();
		assert!(q.text.contains("?type wdt:P279* ?superclass ."));
		assert!(!q.text.contains("skos:exactMatch"));
	}

	#[test]
	fn artworks_join_through_matches() {
		let t = Templates::default();
		let q = t
			.artworks(
				Scheme::Nomenclature,
				&iri("https://nomenclature.info/nom/11781"),
			)
			.unwrap();
		assert!(q.text.contains("BIND (<https://nomenclature.info/nom/11781> AS ?superclass)"));
		assert!(q.text.contains("?class skos:broader* ?superclass ."));
		assert!(q.text.contains("{ ?type skos:exactMatch ?class }"));
		assert!(q.text.contains("{ ?type skos:broadMatch ?class }"));
		assert!(q.text.contains("ORDER BY ?typeLabel ?artworkLabel"));
	}

	#[test]
	fn broader_uses_only_native_predicate() {
		let t = Templates::default();
		let q = t
			.broader(
				Scheme::Nomenclature,
				&iri("https://nomenclature.info/nom/11781"),
			)
			.unwrap();
		assert!(q
			.text
			.contains("<https://nomenclature.info/nom/11781> skos:broader ?parent ."));
		assert!(q.text.contains("?parent skos:prefLabel ?label ."));
		assert!(!q.text.contains("wdt:P279 ?parent"));
	}

	#[test]
	fn label_tries_every_shape() {
		let t = Templates::new(LabelLanguage::new("fr").unwrap());
		let q = t.label(&iri("http://vocab.getty.edu/aat/300043071")).unwrap();
		assert!(q.text.contains("skos:prefLabel ?label"));
		assert!(q.text.contains("rdfs:label ?label"));
		assert!(q.text.contains("skosxl:prefLabel ?labelObject"));
		assert!(q.text.contains("FILTER (lang(?label) = \"fr\")"));
	}

	#[test]
	fn equivalents_query_names_its_graph() {
		let t = Templates::default();
		let q = t
			.equivalents(&iri("http://www.wikidata.org/entity/Q613972"))
			.unwrap();
		assert!(q.text.contains("FROM <https://art-classification-crosswalks>"));
		assert!(q.text.contains("<http://www.wikidata.org/entity/Q613972> ?p ?o ."));
	}

	#[test]
	fn same_input_same_text() {
		let t = Templates::default();
		let i = iri("http://www.wikidata.org/entity/Q613972");
		for scheme in [Scheme::Wikidata, Scheme::Aat, Scheme::Nomenclature] {
			assert_eq!(t.narrower(scheme, &i).unwrap(), t.narrower(scheme, &i).unwrap());
			assert_eq!(t.broader(scheme, &i).unwrap(), t.broader(scheme, &i).unwrap());
			assert_eq!(t.artworks(scheme, &i).unwrap(), t.artworks(scheme, &i).unwrap());
		}
	}

	#[test]
	fn unsafe_graph_is_rejected() {
		assert!(Templates::default()
			.with_crosswalk_graph("https://example.org/> } DROP ALL")
			.is_err())
	}
}
