//! Crosswalk navigation engine.
//!
//! A [`Controller`] tracks the current concept across the three schemes and
//! exposes the navigation [`Transition`]s. Each transition queries the
//! backing store through a [`Select`](crosswalk_sparql::Select) executor and
//! publishes an immutable [`Snapshot`].
pub mod artwork;
pub mod controller;
pub mod error;
pub mod lookup;
pub mod resolver;
pub mod state;

pub use artwork::Artwork;
pub use controller::{Controller, Outcome};
pub use error::{Error, Precondition};
pub use lookup::Lookup;
pub use resolver::Equivalents;
pub use state::{NavigationState, Snapshot, Transition};
