use crosswalk::{
	iref::{Iri, IriBuf},
	template::var,
	Concept, Query, Scheme, Templates, UnsafeIri,
};
use crosswalk_sparql::{Binding, Select};

use crate::Artwork;

/// Query round trips against the backing store.
///
/// A failed query is logged and read as an empty result: the navigation
/// then hides the matching affordance instead of failing.
pub struct Lookup<'a, E> {
	executor: &'a E,
	templates: &'a Templates,
}

impl<'a, E> Clone for Lookup<'a, E> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<'a, E> Copy for Lookup<'a, E> {}

impl<'a, E: Select> Lookup<'a, E> {
	pub fn new(executor: &'a E, templates: &'a Templates) -> Self {
		Self {
			executor,
			templates,
		}
	}

	pub fn templates(&self) -> &'a Templates {
		self.templates
	}

	pub(crate) fn rows(&self, query: Query) -> Vec<Binding> {
		log::debug!("running {} query", query.kind);
		match self.executor.select(query.as_str()) {
			Some(rows) => {
				log::debug!("{} query returned {} row(s)", query.kind, rows.len());
				rows
			}
			None => {
				log::warn!("{} query failed, treated as empty", query.kind);
				Vec::new()
			}
		}
	}

	/// Parent of `iri` in `scheme`.
	///
	/// If there are several parents, the first one is kept. Rows are ordered
	/// by label then IRI.
	pub fn broader(&self, scheme: Scheme, iri: &Iri) -> Result<Option<Concept>, UnsafeIri> {
		let rows = self.rows(self.templates.broader(scheme, iri)?);
		if rows.len() > 1 {
			log::debug!("<{iri}> has {} broader concepts, keeping the first", rows.len())
		}

		Ok(rows
			.iter()
			.find_map(|row| concept(row, var::PARENT)))
	}

	/// Productive concepts one level below `iri`, ordered by label.
	pub fn narrower(&self, scheme: Scheme, iri: &Iri) -> Result<Vec<Concept>, UnsafeIri> {
		Ok(self
			.rows(self.templates.narrower(scheme, iri)?)
			.iter()
			.filter_map(|row| concept(row, var::CONCEPT))
			.collect())
	}

	/// Label of `iri` in the configured language.
	pub fn label(&self, iri: &Iri) -> Result<Option<String>, UnsafeIri> {
		Ok(self
			.rows(self.templates.label(iri)?)
			.into_iter()
			.find_map(|row| row.value(var::LABEL).map(ToOwned::to_owned)))
	}

	pub fn artworks(&self, scheme: Scheme, superclass: &Iri) -> Result<Vec<Artwork>, UnsafeIri> {
		Ok(self
			.rows(self.templates.artworks(scheme, superclass)?)
			.iter()
			.filter_map(Artwork::from_binding)
			.collect())
	}
}

/// Reads the concept bound to `var`, labelled with `?label`.
fn concept(row: &Binding, var: &str) -> Option<Concept> {
	let iri = IriBuf::new(row.iri(var)?.to_owned()).ok()?;
	let label = row.value(var::LABEL).unwrap_or_default();
	match Concept::new(iri, label) {
		Ok(concept) => Some(concept),
		Err(e) => {
			log::warn!("ignoring concept: {e}");
			None
		}
	}
}
