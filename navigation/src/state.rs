use std::fmt;

use crosswalk::{
	iref::{Iri, IriBuf},
	Classification, Concept, Rotation, Scheme,
};

use crate::{artwork, Artwork};

/// Where the user is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
	pub classification: Classification,
	pub rotation: Rotation,
}

impl NavigationState {
	pub fn new(classification: Classification) -> Self {
		let rotation = classification.current.scheme.rotation();
		Self {
			classification,
			rotation,
		}
	}

	pub fn current(&self) -> &Concept {
		&self.classification.current
	}

	pub fn scheme(&self) -> Scheme {
		self.rotation.current
	}
}

/// Navigation command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
	/// Moves to the equivalent concept in another scheme.
	SwitchScheme(Scheme),

	/// Moves to one of the narrower concepts of the current concept.
	DrillInto(IriBuf),

	GoToBroader,
}

impl fmt::Display for Transition {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::SwitchScheme(scheme) => write!(f, "switch to {scheme}"),
			Self::DrillInto(iri) => write!(f, "drill into <{iri}>"),
			Self::GoToBroader => f.write_str("go to broader"),
		}
	}
}

/// Fully assembled state published after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
	/// Sequence number of the transition that produced this snapshot.
	pub sequence: u64,

	pub state: NavigationState,

	/// Narrower concepts of the current concept, ordered by label.
	pub narrower: Vec<Concept>,

	/// Artworks typed at or below the current concept.
	pub artworks: Vec<Artwork>,
}

impl Snapshot {
	pub fn classification(&self) -> &Classification {
		&self.state.classification
	}

	pub fn narrower_concept(&self, iri: &Iri) -> Option<&Concept> {
		self.narrower.iter().find(|c| c.iri() == iri)
	}

	/// One drill command per narrower concept, in display order.
	pub fn drill_commands(&self) -> Vec<Transition> {
		self.narrower
			.iter()
			.map(|c| Transition::DrillInto(c.iri.clone()))
			.collect()
	}

	/// Commands switching to the resolved equivalents, left first.
	pub fn switch_commands(&self) -> Vec<Transition> {
		let c = self.classification();
		[&c.left, &c.right]
			.into_iter()
			.flatten()
			.map(|e| Transition::SwitchScheme(e.concept.scheme))
			.collect()
	}

	/// Every command allowed from this snapshot.
	pub fn commands(&self) -> Vec<Transition> {
		let mut commands = self.switch_commands();
		if self.classification().broader.is_some() {
			commands.push(Transition::GoToBroader)
		}
		commands.extend(self.drill_commands());
		commands
	}

	pub fn artwork_listing(&self) -> String {
		artwork::listing(&self.artworks)
	}
}
