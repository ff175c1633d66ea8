use std::{
	panic,
	sync::{
		atomic::{AtomicU64, Ordering},
		Arc,
	},
	thread::{self, ScopedJoinHandle},
};

use crossbeam::channel::{self, Receiver, Sender};
use crosswalk::{iref::IriBuf, Classification, Concept, Scheme, Templates, UnsafeIri};
use crosswalk_sparql::Select;
use parking_lot::{Mutex, RwLock};

use crate::{Error, Lookup, NavigationState, Precondition, Snapshot, Transition};

/// Result of a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
	/// The new snapshot has been published.
	Published(Arc<Snapshot>),

	/// The transition leads to the current state (switching to the current
	/// scheme). Nothing was queried.
	Unchanged(Arc<Snapshot>),

	/// Another transition started while this one was running. Its results
	/// were discarded.
	Superseded,
}

/// How the label of the new current concept is obtained.
enum Label {
	Known(String),

	/// Looked up, falling back to the given label if none is found.
	Query(String),
}

/// How the broader concept of the new current concept is obtained.
enum Broader {
	Known(Option<Concept>),
	Query,
}

/// New current concept, captured before any query is sent.
struct Target {
	iri: IriBuf,
	scheme: Scheme,
	label: Label,
	broader: Broader,
}

/// Navigation controller.
///
/// Owns the published [`Snapshot`], which is only ever replaced as a whole
/// by a transition. Every transition runs its queries concurrently and
/// publishes the assembled snapshot once they have all completed, unless a
/// newer transition started in the meantime.
pub struct Controller<E> {
	executor: E,
	templates: Templates,
	sequence: AtomicU64,
	current: RwLock<Arc<Snapshot>>,
	subscribers: Mutex<Vec<Sender<Arc<Snapshot>>>>,
}

impl<E: Select> Controller<E> {
	/// Resolves the seed concept into the initial snapshot.
	pub fn start(executor: E, templates: Templates, seed: Concept) -> Result<Self, Error> {
		log::info!("starting from {seed}");
		let target = Target {
			scheme: seed.scheme,
			iri: seed.iri,
			label: Label::Known(seed.label),
			broader: Broader::Query,
		};

		let initial = resolve(Lookup::new(&executor, &templates), 0, target)?;

		Ok(Self {
			executor,
			templates,
			sequence: AtomicU64::new(0),
			current: RwLock::new(Arc::new(initial)),
			subscribers: Mutex::new(Vec::new()),
		})
	}

	pub fn executor(&self) -> &E {
		&self.executor
	}

	pub fn templates(&self) -> &Templates {
		&self.templates
	}

	/// Latest published snapshot.
	pub fn snapshot(&self) -> Arc<Snapshot> {
		self.current.read().clone()
	}

	/// Receives every snapshot published from now on.
	pub fn subscribe(&self) -> Receiver<Arc<Snapshot>> {
		let (tx, rx) = channel::unbounded();
		self.subscribers.lock().push(tx);
		rx
	}

	pub fn switch_scheme(&self, scheme: Scheme) -> Result<Outcome, Error> {
		self.apply(Transition::SwitchScheme(scheme))
	}

	pub fn drill_into(&self, iri: IriBuf) -> Result<Outcome, Error> {
		self.apply(Transition::DrillInto(iri))
	}

	pub fn go_to_broader(&self) -> Result<Outcome, Error> {
		self.apply(Transition::GoToBroader)
	}

	/// Applies a transition to the latest published snapshot.
	pub fn apply(&self, transition: Transition) -> Result<Outcome, Error> {
		let from = self.snapshot();
		let target = match plan(&from, &transition)? {
			Some(target) => target,
			None => return Ok(Outcome::Unchanged(from)),
		};

		let sequence = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
		log::debug!("transition {sequence}: {transition}");

		let snapshot = resolve(
			Lookup::new(&self.executor, &self.templates),
			sequence,
			target,
		)?;

		Ok(self.publish(snapshot))
	}

	fn publish(&self, snapshot: Snapshot) -> Outcome {
		let mut current = self.current.write();

		let latest = self.sequence.load(Ordering::SeqCst);
		if snapshot.sequence != latest {
			log::info!(
				"discarding transition {} superseded by transition {latest}",
				snapshot.sequence
			);
			return Outcome::Superseded;
		}

		let snapshot = Arc::new(snapshot);
		*current = snapshot.clone();
		self.subscribers
			.lock()
			.retain(|tx| tx.send(snapshot.clone()).is_ok());

		log::info!(
			"published transition {}: {}",
			snapshot.sequence,
			snapshot.state.current()
		);
		Outcome::Published(snapshot)
	}
}

/// Checks the preconditions of `transition` and captures its target.
///
/// Returns `None` if the transition leads to the current state.
fn plan(from: &Snapshot, transition: &Transition) -> Result<Option<Target>, Precondition> {
	let c = from.classification();

	let target = match transition {
		Transition::SwitchScheme(scheme) => {
			let Some(side) = from.state.rotation.side_of(*scheme) else {
				return Ok(None);
			};

			let equivalent = c
				.equivalent(side)
				.ok_or(Precondition::Unresolved(*scheme))?;

			Target {
				iri: equivalent.concept.iri.clone(),
				scheme: *scheme,
				label: Label::Known(equivalent.concept.label.clone()),
				broader: Broader::Query,
			}
		}
		Transition::DrillInto(iri) => {
			let concept = from
				.narrower_concept(iri)
				.ok_or_else(|| Precondition::NotNarrower(iri.clone()))?;

			Target {
				iri: concept.iri.clone(),
				scheme: from.state.scheme(),
				label: Label::Query(concept.label.clone()),
				broader: Broader::Known(Some(c.current.clone())),
			}
		}
		Transition::GoToBroader => {
			let broader = c
				.broader
				.as_ref()
				.ok_or_else(|| Precondition::NoBroader(c.current.iri.clone()))?;

			Target {
				iri: broader.iri.clone(),
				scheme: broader.scheme,
				label: Label::Known(broader.label.clone()),
				broader: Broader::Query,
			}
		}
	};

	Ok(Some(target))
}

/// Runs the queries of the target concept concurrently and assembles the
/// snapshot once they are all done.
fn resolve<E: Select>(
	lookup: Lookup<E>,
	sequence: u64,
	target: Target,
) -> Result<Snapshot, Error> {
	let Target {
		iri,
		scheme,
		label,
		broader,
	} = target;
	let rotation = scheme.rotation();

	let (label, broader, narrower, equivalents, artworks) = thread::scope(|s| {
		let iri = &iri;

		let label = s.spawn(move || -> Result<String, UnsafeIri> {
			match label {
				Label::Known(label) => Ok(label),
				Label::Query(fallback) => Ok(lookup.label(iri)?.unwrap_or(fallback)),
			}
		});

		let broader = s.spawn(move || match broader {
			Broader::Known(broader) => Ok(broader),
			Broader::Query => lookup.broader(scheme, iri),
		});

		let narrower = s.spawn(move || lookup.narrower(scheme, iri));
		let equivalents = s.spawn(move || lookup.equivalents(iri, rotation));
		let artworks = s.spawn(move || lookup.artworks(scheme, iri));

		(
			join(label),
			join(broader),
			join(narrower),
			join(equivalents),
			join(artworks),
		)
	});

	let equivalents = equivalents?;
	let classification = Classification {
		current: Concept {
			iri,
			label: label?,
			scheme,
		},
		broader: broader?,
		left: equivalents.left,
		right: equivalents.right,
	};

	Ok(Snapshot {
		sequence,
		state: NavigationState::new(classification),
		narrower: narrower?,
		artworks: artworks?,
	})
}

fn join<T>(handle: ScopedJoinHandle<'_, T>) -> T {
	handle.join().unwrap_or_else(|e| panic::resume_unwind(e))
}
