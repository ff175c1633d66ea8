use std::{
	collections::{HashMap, HashSet},
	sync::{Arc, Mutex},
	thread,
};

use crossbeam::channel::{self, Receiver, Sender};
use crosswalk::{
	iref::IriBuf,
	template::var,
	vocab, Concept, MatchKind, Query, Scheme, Templates,
};
use crosswalk_navigation::{Controller, Error, Outcome, Precondition, Snapshot, Transition};
use crosswalk_sparql::{Binding, Select, Term};

const WD_TRAY: &str = "http://www.wikidata.org/entity/Q613972";
const WD_CONTAINER: &str = "http://www.wikidata.org/entity/Q987767";
const WD_SERVING_TRAY: &str = "http://www.wikidata.org/entity/Q7455912";
const AAT_TRAYS: &str = "http://vocab.getty.edu/aat/300043071";
const AAT_CONTAINERS: &str = "http://vocab.getty.edu/aat/300045611";
const NOM_TRAY: &str = "https://nomenclature.info/nom/10425";

/// Blocks one query until released.
struct Gate {
	query: String,
	entered: Sender<()>,
	release: Receiver<()>,
}

/// In-memory store answering the exact text of known queries.
///
/// Unknown queries have no solution.
#[derive(Default)]
struct Store {
	templates: Templates,
	answers: HashMap<String, Vec<Binding>>,
	failing: HashSet<String>,
	gate: Option<Gate>,
	received: Mutex<Vec<String>>,
}

impl Select for Store {
	fn select(&self, query: &str) -> Option<Vec<Binding>> {
		self.received.lock().unwrap().push(query.to_owned());

		if let Some(gate) = &self.gate {
			if gate.query == query {
				gate.entered.send(()).unwrap();
				gate.release.recv().unwrap();
			}
		}

		if self.failing.contains(query) {
			return None;
		}

		Some(self.answers.get(query).cloned().unwrap_or_default())
	}
}

fn iri(s: &str) -> IriBuf {
	IriBuf::new(s.to_owned()).unwrap()
}

fn concept(s: &str, label: &str) -> Concept {
	Concept::parse(s, label).unwrap()
}

fn literal(value: &str) -> Term {
	Term::literal(value, Some("en"))
}

impl Store {
	fn on(&mut self, query: Query, rows: Vec<Binding>) -> &mut Self {
		self.answers.insert(query.text, rows);
		self
	}

	fn fail(&mut self, query: Query) -> &mut Self {
		self.failing.insert(query.text);
		self
	}

	fn narrower(&mut self, scheme: Scheme, parent: &str, children: &[(&str, &str)]) -> &mut Self {
		let q = self.templates.narrower(scheme, &iri(parent)).unwrap();
		let rows = children
			.iter()
			.map(|(c, label)| {
				Binding::new()
					.with(var::CONCEPT, Term::iri(*c))
					.with(var::LABEL, literal(label))
			})
			.collect();
		self.on(q, rows)
	}

	fn broader(&mut self, scheme: Scheme, child: &str, parent: &str, label: &str) -> &mut Self {
		let q = self.templates.broader(scheme, &iri(child)).unwrap();
		let row = Binding::new()
			.with(var::PARENT, Term::iri(parent))
			.with(var::LABEL, literal(label));
		self.on(q, vec![row])
	}

	fn label(&mut self, concept: &str, label: &str) -> &mut Self {
		let q = self.templates.label(&iri(concept)).unwrap();
		self.on(q, vec![Binding::new().with(var::LABEL, literal(label))])
	}

	fn equivalents(&mut self, concept: &str, edges: &[(&str, &str)]) -> &mut Self {
		let q = self.templates.equivalents(&iri(concept)).unwrap();
		let rows = edges
			.iter()
			.map(|(kind, o)| {
				Binding::new()
					.with(var::PREDICATE, Term::iri(format!("{}{kind}", vocab::SKOS)))
					.with(var::OBJECT, Term::iri(*o))
			})
			.collect();
		self.on(q, rows)
	}

	fn artworks(&mut self, scheme: Scheme, superclass: &str, artworks: &[(&str, &str)]) -> &mut Self {
		let q = self.templates.artworks(scheme, &iri(superclass)).unwrap();
		let rows = artworks
			.iter()
			.map(|(a, label)| {
				Binding::new()
					.with(var::ARTWORK, Term::iri(*a))
					.with(var::ARTWORK_LABEL, literal(label))
					.with(var::TYPE, Term::iri(superclass))
					.with(var::TYPE_LABEL, literal("tray"))
			})
			.collect();
		self.on(q, rows)
	}

	fn received(&self) -> Vec<String> {
		self.received.lock().unwrap().clone()
	}
}

/// Three equivalent "tray" concepts, one per scheme.
fn trays() -> Store {
	let mut store = Store::default();
	store
		.broader(Scheme::Wikidata, WD_TRAY, WD_CONTAINER, "container")
		.broader(Scheme::Aat, AAT_TRAYS, AAT_CONTAINERS, "containers")
		.narrower(
			Scheme::Wikidata,
			WD_TRAY,
			&[(WD_SERVING_TRAY, "serving tray")],
		)
		.narrower(Scheme::Wikidata, WD_CONTAINER, &[(WD_TRAY, "tray")])
		.equivalents(
			WD_TRAY,
			&[("exactMatch", AAT_TRAYS), ("exactMatch", NOM_TRAY)],
		)
		.equivalents(
			AAT_TRAYS,
			&[("exactMatch", WD_TRAY), ("closeMatch", NOM_TRAY)],
		)
		.equivalents(
			NOM_TRAY,
			&[("broadMatch", WD_TRAY), ("exactMatch", AAT_TRAYS)],
		)
		.label(WD_TRAY, "tray")
		.label(WD_SERVING_TRAY, "serving tray")
		.label(AAT_TRAYS, "trays")
		.label(NOM_TRAY, "tray")
		.artworks(
			Scheme::Wikidata,
			WD_TRAY,
			&[
				("http://www.wikidata.org/entity/Q1001", "Lacquer tray"),
				("http://www.wikidata.org/entity/Q1002", "Tea tray"),
			],
		)
		.artworks(
			Scheme::Wikidata,
			WD_SERVING_TRAY,
			&[("http://www.wikidata.org/entity/Q1003", "Silver salver")],
		);
	store
}

fn start(store: Store) -> Controller<Store> {
	Controller::start(store, Templates::default(), concept(WD_TRAY, "tray")).unwrap()
}

fn published(outcome: Outcome) -> Arc<Snapshot> {
	match outcome {
		Outcome::Published(snapshot) => snapshot,
		other => panic!("unexpected outcome {other:?}"),
	}
}

#[test]
fn initial_snapshot() {
	let controller = start(trays());
	let s = controller.snapshot();
	let c = s.classification();

	assert_eq!(s.sequence, 0);
	assert_eq!(c.current, concept(WD_TRAY, "tray"));
	assert_eq!(c.broader, Some(concept(WD_CONTAINER, "container")));

	let left = c.left.as_ref().unwrap();
	assert_eq!(left.concept, concept(NOM_TRAY, "tray"));
	assert_eq!(left.kind, MatchKind::Exact);

	let right = c.right.as_ref().unwrap();
	assert_eq!(right.concept, concept(AAT_TRAYS, "trays"));
	assert_eq!(right.kind, MatchKind::Exact);

	assert_eq!(s.narrower, vec![concept(WD_SERVING_TRAY, "serving tray")]);
	assert_eq!(
		s.artwork_listing(),
		"(tray)http://www.wikidata.org/entity/Q1001 Lacquer tray\n(tray)http://www.wikidata.org/entity/Q1002 Tea tray"
	);
	assert_eq!(
		s.drill_commands(),
		vec![Transition::DrillInto(iri(WD_SERVING_TRAY))]
	);
	assert_eq!(
		s.commands(),
		vec![
			Transition::SwitchScheme(Scheme::Nomenclature),
			Transition::SwitchScheme(Scheme::Aat),
			Transition::GoToBroader,
			Transition::DrillInto(iri(WD_SERVING_TRAY)),
		]
	);
}

#[test]
fn switch_to_thesaurus() {
	let controller = start(trays());
	let s = published(controller.switch_scheme(Scheme::Aat).unwrap());
	let c = s.classification();

	assert_eq!(s.sequence, 1);
	assert_eq!(s.state.scheme(), Scheme::Aat);
	assert_eq!(c.current, concept(AAT_TRAYS, "trays"));
	assert_eq!(c.broader, Some(concept(AAT_CONTAINERS, "containers")));

	let others = [s.state.rotation.left, s.state.rotation.right];
	assert!(others.contains(&Scheme::Nomenclature));
	assert!(others.contains(&Scheme::Wikidata));

	// The entity scheme is on the left of the thesaurus.
	assert_eq!(c.left_match(), MatchKind::Exact);
	assert_eq!(c.left.as_ref().unwrap().concept.label, "tray");
	assert_eq!(c.right_match(), MatchKind::CloseMatch);

	assert!(s.narrower.is_empty());
	assert_eq!(s.artwork_listing(), "");
}

#[test]
fn rotating_left_three_times() {
	let controller = start(trays());
	for _ in 0..3 {
		let left = controller.snapshot().state.rotation.left;
		published(controller.switch_scheme(left).unwrap());
	}

	let s = controller.snapshot();
	assert_eq!(s.state.scheme(), Scheme::Wikidata);
	assert_eq!(s.classification().current, concept(WD_TRAY, "tray"));
	assert_eq!(s.sequence, 3);
}

#[test]
fn switching_to_the_current_scheme() {
	let controller = start(trays());
	let before = controller.snapshot();
	assert_eq!(
		controller.switch_scheme(Scheme::Wikidata).unwrap(),
		Outcome::Unchanged(before)
	);
}

#[test]
fn drill_then_go_back() {
	let controller = start(trays());
	let before = controller.snapshot();

	let s = published(controller.drill_into(iri(WD_SERVING_TRAY)).unwrap());
	let c = s.classification();
	assert_eq!(c.current, concept(WD_SERVING_TRAY, "serving tray"));
	assert_eq!(c.broader, Some(before.classification().current.clone()));
	assert!(c.left.is_none() && c.right.is_none());
	assert!(s.narrower.is_empty());
	assert_eq!(
		s.artwork_listing(),
		"(tray)http://www.wikidata.org/entity/Q1003 Silver salver"
	);

	let s = published(controller.go_to_broader().unwrap());
	assert_eq!(s.classification(), before.classification());
	assert_eq!(s.narrower, before.narrower);
	assert_eq!(s.artworks, before.artworks);
}

#[test]
fn repeated_drill_gives_the_same_lists() {
	let controller = start(trays());

	let first = published(controller.drill_into(iri(WD_SERVING_TRAY)).unwrap());
	let parent = published(controller.go_to_broader().unwrap());
	let second = published(controller.drill_into(iri(WD_SERVING_TRAY)).unwrap());

	assert_eq!(second.classification(), first.classification());
	assert_eq!(second.narrower, first.narrower);
	assert_eq!(second.artworks, first.artworks);

	let again = published(controller.go_to_broader().unwrap());
	assert_eq!(again.narrower, parent.narrower);
	assert_eq!(again.artworks, parent.artworks);
	assert_eq!(again.artworks.len(), 2);
}

#[test]
fn drill_label_falls_back_to_the_narrower_list() {
	let mut store = trays();
	let templates = Templates::default();
	store.fail(templates.label(&iri(WD_SERVING_TRAY)).unwrap());
	store.narrower(
		Scheme::Wikidata,
		WD_TRAY,
		&[(WD_SERVING_TRAY, "serving trays")],
	);

	let controller = start(store);
	let s = published(controller.drill_into(iri(WD_SERVING_TRAY)).unwrap());
	assert_eq!(s.classification().current.label, "serving trays");
}

#[test]
fn drill_into_unknown_concept() {
	let controller = start(trays());
	let result = controller.drill_into(iri(AAT_TRAYS));
	assert!(matches!(
		result,
		Err(Error::Precondition(Precondition::NotNarrower(_)))
	));
	assert_eq!(controller.snapshot().sequence, 0);
}

#[test]
fn no_broader_at_the_root() {
	let controller = start(trays());
	let s = published(controller.go_to_broader().unwrap());
	assert_eq!(s.classification().current, concept(WD_CONTAINER, "container"));
	assert_eq!(s.classification().broader, None);
	assert_eq!(s.narrower, vec![concept(WD_TRAY, "tray")]);

	// A root concept without artworks lists nothing.
	assert_eq!(s.artwork_listing(), "");

	assert!(matches!(
		controller.go_to_broader(),
		Err(Error::Precondition(Precondition::NoBroader(_)))
	));
}

#[test]
fn unresolved_equivalent() {
	let mut store = Store::default();
	store.label(WD_TRAY, "tray");

	let controller = start(store);
	let c = controller.snapshot().classification().clone();
	assert_eq!(c.left, None);
	assert_eq!(c.right, None);
	assert_eq!(c.left_match(), MatchKind::None);
	assert!(controller.snapshot().commands().is_empty());

	assert!(matches!(
		controller.switch_scheme(Scheme::Aat),
		Err(Error::Precondition(Precondition::Unresolved(Scheme::Aat)))
	));
}

#[test]
fn failed_queries_hide_affordances() {
	let mut store = trays();
	let templates = Templates::default();
	store
		.fail(templates.narrower(Scheme::Wikidata, &iri(WD_TRAY)).unwrap())
		.fail(templates.broader(Scheme::Wikidata, &iri(WD_TRAY)).unwrap())
		.fail(templates.equivalents(&iri(WD_TRAY)).unwrap());

	let controller = start(store);
	let s = controller.snapshot();
	assert!(s.narrower.is_empty());
	assert_eq!(s.classification().broader, None);
	assert_eq!(s.classification().left, None);
	assert!(!s.artworks.is_empty());
}

#[test]
fn transitions_query_the_new_concept_only() {
	let controller = start(trays());
	let before = controller.executor().received().len();
	controller.switch_scheme(Scheme::Aat).unwrap();

	let received = controller.executor().received();
	let sent = &received[before..];
	assert!(sent.iter().all(|q| !q.contains(&format!("<{WD_CONTAINER}>"))));
	assert!(sent.iter().any(|q| q.contains(&format!("<{AAT_TRAYS}>"))));
}

#[test]
fn subscribers_see_published_snapshots() {
	let controller = start(trays());
	let rx = controller.subscribe();

	controller.switch_scheme(Scheme::Nomenclature).unwrap();
	controller.go_to_broader().ok();

	let s = rx.try_recv().unwrap();
	assert_eq!(s.sequence, 1);
	assert_eq!(s.state.scheme(), Scheme::Nomenclature);
	assert!(rx.try_recv().is_err());
}

#[test]
fn stale_transition_is_discarded() {
	let (entered_tx, entered) = channel::unbounded();
	let (release, release_rx) = channel::unbounded();

	let mut store = trays();
	store.gate = Some(Gate {
		query: Templates::default()
			.narrower(Scheme::Aat, &iri(AAT_TRAYS))
			.unwrap()
			.text,
		entered: entered_tx,
		release: release_rx,
	});

	let controller = start(store);
	let rx = controller.subscribe();

	thread::scope(|s| {
		let slow = s.spawn(|| controller.switch_scheme(Scheme::Aat));

		entered.recv().unwrap();
		let fast = published(controller.switch_scheme(Scheme::Nomenclature).unwrap());
		assert_eq!(fast.sequence, 2);
		release.send(()).unwrap();

		assert_eq!(slow.join().unwrap().unwrap(), Outcome::Superseded);
	});

	let s = controller.snapshot();
	assert_eq!(s.sequence, 2);
	assert_eq!(s.state.scheme(), Scheme::Nomenclature);
	assert_eq!(rx.try_iter().count(), 1);
}
