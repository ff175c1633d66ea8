//! Cross-scheme equivalence resolution.
use crosswalk::{
	iref::{Iri, IriBuf},
	template::var,
	Concept, Equivalent, MatchKind, Rotation, Scheme, Side, UnsafeIri,
};
use crosswalk_sparql::{Binding, Select};

use crate::Lookup;

/// Equivalents of a concept in the two other schemes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Equivalents {
	pub left: Option<Equivalent>,
	pub right: Option<Equivalent>,
}

/// Equivalence edge read from the crosswalk graph.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Candidate {
	iri: IriBuf,
	scheme: Scheme,
	kind: MatchKind,
}

impl Candidate {
	fn from_binding(row: &Binding) -> Option<Self> {
		let kind = MatchKind::from_predicate(row.iri(var::PREDICATE)?);
		if kind.is_none() {
			return None;
		}

		let object = row.iri(var::OBJECT)?;
		let scheme = Scheme::of_str(object).ok()?;
		Some(Self {
			iri: IriBuf::new(object.to_owned()).ok()?,
			scheme,
			kind,
		})
	}

	/// Whether `self` takes precedence over `other` for the same side.
	///
	/// The strongest match kind wins, then the smallest IRI.
	fn beats(&self, other: &Self) -> bool {
		(self.kind.precedence(), self.iri.as_str()) < (other.kind.precedence(), other.iri.as_str())
	}
}

/// Picks at most one candidate per side of `rotation`.
fn select_sides(rows: &[Binding], rotation: Rotation) -> [Option<Candidate>; 2] {
	let mut sides: [Option<Candidate>; 2] = [None, None];

	for candidate in rows.iter().filter_map(Candidate::from_binding) {
		let Some(side) = rotation.side_of(candidate.scheme) else {
			continue;
		};

		let i = side_index(side);
		let replace = match &sides[i] {
			Some(current) => candidate.beats(current),
			None => true,
		};

		if replace {
			sides[i] = Some(candidate)
		}
	}

	sides
}

fn side_index(side: Side) -> usize {
	match side {
		Side::Left => 0,
		Side::Right => 1,
	}
}

impl<'a, E: Select> Lookup<'a, E> {
	/// Finds the equivalents of `iri` in the left and right schemes of
	/// `rotation`, then looks up their labels.
	///
	/// An equivalent without label in the configured language is labelled
	/// with its IRI.
	pub fn equivalents(&self, iri: &Iri, rotation: Rotation) -> Result<Equivalents, UnsafeIri> {
		let rows = self.rows(self.templates().equivalents(iri)?);
		let [left, right] = select_sides(&rows, rotation);

		Ok(Equivalents {
			left: self.labelled(left)?,
			right: self.labelled(right)?,
		})
	}

	fn labelled(&self, candidate: Option<Candidate>) -> Result<Option<Equivalent>, UnsafeIri> {
		let Some(candidate) = candidate else {
			return Ok(None);
		};

		let label = match self.label(&candidate.iri)? {
			Some(label) => label,
			None => {
				log::debug!("no label for <{}>", candidate.iri);
				candidate.iri.to_string()
			}
		};

		Ok(Some(Equivalent::new(
			Concept {
				iri: candidate.iri,
				label,
				scheme: candidate.scheme,
			},
			candidate.kind,
		)))
	}
}
