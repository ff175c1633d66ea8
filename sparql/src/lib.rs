//! SPARQL 1.1 protocol client.
//!
//! Queries are sent with `GET` or `POST` (see [`Method`]), updates always
//! with `POST`. Requests are spaced by a courtesy pause, even when the
//! client is shared between threads (see [`Throttle`]). Failures are
//! never raised to the caller: they are logged and reported as `None`, which
//! is distinct from a valid empty result.
pub mod client;
pub mod options;
pub mod results;
pub mod throttle;
pub mod transport;

pub use client::{Dataset, QueryClient, QueryForm, QueryOutput, UpdateOutput};
pub use options::{ClientOptions, ConfigError, Method};
pub use results::{Binding, Term};
pub use throttle::Throttle;
pub use transport::{HttpTransport, Request, Response, Transport, TransportError};

/// Anything able to answer `SELECT` queries.
pub trait Select: Send + Sync {
	/// Returns the solutions of the query, or `None` if the query failed.
	fn select(&self, query: &str) -> Option<Vec<Binding>>;
}

impl<'a, S: ?Sized + Select> Select for &'a S {
	fn select(&self, query: &str) -> Option<Vec<Binding>> {
		S::select(*self, query)
	}
}

impl<S: ?Sized + Select> Select for std::sync::Arc<S> {
	fn select(&self, query: &str) -> Option<Vec<Binding>> {
		S::select(self, query)
	}
}
