use std::str::FromStr;

use crosswalk_navigation::{Snapshot, Transition};

/// Line typed by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
	Left,
	Right,
	Up,

	/// Drill into the n-th narrower concept, starting from 1.
	Drill(usize),

	Help,
	Quit,
}

#[derive(Debug, thiserror::Error)]
#[error("unknown command `{0}`, type `help` for the list of commands")]
pub struct UnknownCommand(String);

impl FromStr for Command {
	type Err = UnknownCommand;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let s = s.trim();
		match s.to_ascii_lowercase().as_str() {
			"l" | "left" => Ok(Self::Left),
			"r" | "right" => Ok(Self::Right),
			"u" | "up" | "broader" => Ok(Self::Up),
			"h" | "?" | "help" => Ok(Self::Help),
			"q" | "quit" | "exit" => Ok(Self::Quit),
			other => match other.parse() {
				Ok(n) if n > 0 => Ok(Self::Drill(n)),
				_ => Err(UnknownCommand(s.to_owned())),
			},
		}
	}
}

#[derive(Debug, thiserror::Error)]
#[error("there is no narrower concept number {0}")]
pub struct NoSuchConcept(usize);

impl Command {
	/// Navigation transition of this command from the given snapshot.
	///
	/// Returns `None` for commands that do not navigate.
	pub fn transition(&self, snapshot: &Snapshot) -> Result<Option<Transition>, NoSuchConcept> {
		let rotation = snapshot.state.rotation;
		match self {
			Self::Left => Ok(Some(Transition::SwitchScheme(rotation.left))),
			Self::Right => Ok(Some(Transition::SwitchScheme(rotation.right))),
			Self::Up => Ok(Some(Transition::GoToBroader)),
			Self::Drill(n) => snapshot
				.drill_commands()
				.into_iter()
				.nth(n - 1)
				.map(Some)
				.ok_or(NoSuchConcept(*n)),
			Self::Help | Self::Quit => Ok(None),
		}
	}
}

pub const HELP: &str = "commands:
  left, l       switch to the equivalent concept in the left scheme
  right, r      switch to the equivalent concept in the right scheme
  up, u         go to the broader concept
  <n>           drill into the narrower concept number <n>
  help, h       show this message
  quit, q       exit";
