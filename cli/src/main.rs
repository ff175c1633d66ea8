use std::{
	io::{self, BufRead, Write},
	process::ExitCode,
	time::Duration,
};

use clap::Parser;
use crosswalk::{vocab, Concept, Equivalent, InvalidConcept, LabelLanguage, Templates, UnsafeIri};
use crosswalk_navigation::{Controller, Outcome, Snapshot};
use crosswalk_sparql::{ClientOptions, ConfigError, Method, QueryClient};
use yansi::Paint;

mod command;

use command::Command;

const DEFAULT_ENDPOINT: &str = "https://sparql.vanderbilt.edu/sparql";

const DEFAULT_USER_AGENT: &str = concat!("crosswalk/", env!("CARGO_PKG_VERSION"), " ()");

const DEFAULT_SEED: &str = "http://www.wikidata.org/entity/Q613972";

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
	/// SPARQL endpoint URL.
	#[arg(short = 'E', long, default_value = DEFAULT_ENDPOINT)]
	endpoint: String,

	/// HTTP method used to send queries (`GET` or `POST`).
	#[arg(short = 'M', long, default_value = "GET")]
	method: Method,

	/// User agent, in the form `appname/version (contact)`.
	#[arg(short = 'A', long = "agent", default_value = DEFAULT_USER_AGENT)]
	user_agent: String,

	/// Language of the displayed labels.
	#[arg(long, default_value = "en")]
	language: LabelLanguage,

	/// Named graph holding the equivalences between schemes.
	#[arg(long, default_value = vocab::CROSSWALK_GRAPH)]
	graph: String,

	/// Pause between two requests, in milliseconds.
	#[arg(long, default_value = "100")]
	delay: u64,

	/// Request timeout, in seconds.
	#[arg(long, default_value = "60")]
	timeout: u64,

	/// The endpoint is a shared public service.
	#[arg(long)]
	shared: bool,

	/// Starting concept.
	#[arg(long, default_value = DEFAULT_SEED)]
	seed: String,

	/// Label of the starting concept.
	#[arg(long, default_value = "tray")]
	seed_label: String,

	/// Turn debugging information on.
	#[arg(short, long = "verbose", action = clap::ArgAction::Count)]
	verbosity: u8,
}

#[derive(Debug, thiserror::Error)]
enum Error {
	#[error(transparent)]
	Config(#[from] ConfigError),

	#[error("invalid seed: {0}")]
	Seed(#[from] InvalidConcept),

	#[error("invalid equivalence graph: {0}")]
	Graph(#[from] UnsafeIri),

	#[error(transparent)]
	Navigation(#[from] crosswalk_navigation::Error),

	#[error(transparent)]
	IO(#[from] io::Error),
}

fn main() -> ExitCode {
	let args = Args::parse();

	if let Err(e) = stderrlog::new()
		.verbosity(args.verbosity as usize)
		.init()
	{
		eprintln!("unable to initialize logger: {e}");
		return ExitCode::FAILURE;
	}

	match run(args) {
		Ok(()) => ExitCode::SUCCESS,
		Err(e) => {
			log::error!("{e}");
			ExitCode::FAILURE
		}
	}
}

fn run(args: Args) -> Result<(), Error> {
	let options = ClientOptions::new(args.endpoint)
		.with_method(args.method)
		.with_user_agent(args.user_agent)
		.with_delay(Duration::from_millis(args.delay))
		.with_timeout(Duration::from_secs(args.timeout))
		.shared(args.shared);

	let client = QueryClient::new(options)?;
	let templates = Templates::new(args.language).with_crosswalk_graph(&args.graph)?;
	let seed = Concept::parse(&args.seed, args.seed_label)?;

	let controller = Controller::start(client, templates, seed)?;

	let stdout = io::stdout();
	let mut out = stdout.lock();
	print_snapshot(&mut out, &controller.snapshot())?;

	for line in io::stdin().lock().lines() {
		let line = line?;
		if line.trim().is_empty() {
			continue;
		}

		let command: Command = match line.parse() {
			Ok(command) => command,
			Err(e) => {
				print_warning(&mut out, e)?;
				continue;
			}
		};

		let snapshot = controller.snapshot();
		let transition = match command.transition(&snapshot) {
			Ok(Some(transition)) => transition,
			Ok(None) => match command {
				Command::Quit => break,
				_ => {
					writeln!(out, "{}", command::HELP)?;
					continue;
				}
			},
			Err(e) => {
				print_warning(&mut out, e)?;
				continue;
			}
		};

		match controller.apply(transition) {
			Ok(Outcome::Published(snapshot) | Outcome::Unchanged(snapshot)) => {
				print_snapshot(&mut out, &snapshot)?
			}
			Ok(Outcome::Superseded) => (),
			Err(crosswalk_navigation::Error::Precondition(e)) => print_warning(&mut out, e)?,
			Err(e) => return Err(e.into()),
		}
	}

	Ok(())
}

fn print_warning(out: &mut impl Write, e: impl std::fmt::Display) -> io::Result<()> {
	writeln!(out, "{}: {e}", Paint::yellow("warning").bold())
}

fn print_equivalent(
	out: &mut impl Write,
	name: &str,
	equivalent: Option<&Equivalent>,
) -> io::Result<()> {
	match equivalent {
		Some(e) => writeln!(
			out,
			"  {name} ({}, {}): {}",
			e.concept.scheme,
			Paint::cyan(e.kind),
			e.concept
		),
		None => writeln!(out, "  {name}: {}", Paint::new("none").dimmed()),
	}
}

fn print_snapshot(out: &mut impl Write, snapshot: &Snapshot) -> io::Result<()> {
	let c = snapshot.classification();

	writeln!(out)?;
	writeln!(
		out,
		"{} {} [{}]",
		Paint::new(&c.current.label).bold(),
		c.current.iri,
		Paint::green(c.current.scheme)
	)?;

	match &c.broader {
		Some(broader) => writeln!(out, "  broader: {broader}")?,
		None => writeln!(out, "  broader: {}", Paint::new("none").dimmed())?,
	}

	print_equivalent(out, "left", c.left.as_ref())?;
	print_equivalent(out, "right", c.right.as_ref())?;

	writeln!(out, "{}", Paint::new("narrower:").bold())?;
	for (i, concept) in snapshot.narrower.iter().enumerate() {
		writeln!(out, "  {}. {concept}", i + 1)?
	}

	writeln!(out, "{}", Paint::new("artworks:").bold())?;
	if !snapshot.artworks.is_empty() {
		writeln!(out, "{}", snapshot.artwork_listing())?
	}

	out.flush()
}
