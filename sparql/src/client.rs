use std::{fmt, str::FromStr, time::Instant};

use crosswalk::{IriTerm, UnsafeIri};

use crate::{
	results, Binding, ClientOptions, ConfigError, HttpTransport, Method, Request, Response,
	Select, Throttle, Transport,
};

/// Default media type of `SELECT` and `ASK` results.
pub const SPARQL_RESULTS_JSON: &str = "application/sparql-results+json";

/// Default media type of `CONSTRUCT` and `DESCRIBE` results.
pub const TURTLE: &str = "text/turtle";

/// Default media type of update responses.
pub const JSON: &str = "application/json";

/// SPARQL query form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryForm {
	#[default]
	Select,
	Ask,
	Construct,
	Describe,
}

impl QueryForm {
	pub fn default_media_type(&self) -> &'static str {
		match self {
			Self::Select | Self::Ask => SPARQL_RESULTS_JSON,
			Self::Construct | Self::Describe => TURTLE,
		}
	}

	/// Whether the results are graphs rather than solutions.
	pub fn is_graph(&self) -> bool {
		matches!(self, Self::Construct | Self::Describe)
	}
}

#[derive(Debug, thiserror::Error)]
#[error("unknown query form `{0}`")]
pub struct UnknownQueryForm(String);

impl FromStr for QueryForm {
	type Err = UnknownQueryForm;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"select" => Ok(Self::Select),
			"ask" => Ok(Self::Ask),
			"construct" => Ok(Self::Construct),
			"describe" => Ok(Self::Describe),
			other => Err(UnknownQueryForm(other.to_owned())),
		}
	}
}

impl fmt::Display for QueryForm {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Select => f.write_str("select"),
			Self::Ask => f.write_str("ask"),
			Self::Construct => f.write_str("construct"),
			Self::Describe => f.write_str("describe"),
		}
	}
}

/// Graphs forming the dataset of a request.
///
/// When empty, the dataset is defined by the request text itself
/// (`FROM`/`USING` clauses).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
	pub default_graphs: Vec<String>,
	pub named_graphs: Vec<String>,
}

impl Dataset {
	fn params<'a>(
		&'a self,
		default_name: &'static str,
		named_name: &'static str,
		params: &mut Vec<(&'static str, &'a str)>,
	) {
		params.extend(self.default_graphs.iter().map(|g| (default_name, g.as_str())));
		params.extend(self.named_graphs.iter().map(|g| (named_name, g.as_str())));
	}
}

#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutput {
	Rows(Vec<Binding>),
	Boolean(bool),
	Raw(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutput {
	Json(serde_json::Value),
	Raw(String),
}

/// SPARQL protocol client.
pub struct QueryClient<T = HttpTransport> {
	options: ClientOptions,
	transport: T,
	throttle: Throttle,
}

impl QueryClient {
	/// Creates an HTTP client.
	///
	/// Fails immediately if the options are not valid, for instance when a
	/// shared endpoint is used without user agent.
	pub fn new(options: ClientOptions) -> Result<Self, ConfigError> {
		options.validate()?;
		let transport = HttpTransport::new(&options);
		Ok(Self::build(options, transport))
	}
}

impl<T: Transport> QueryClient<T> {
	pub fn with_transport(options: ClientOptions, transport: T) -> Result<Self, ConfigError> {
		options.validate()?;
		Ok(Self::build(options, transport))
	}

	fn build(options: ClientOptions, transport: T) -> Self {
		Self {
			throttle: Throttle::new(options.delay),
			options,
			transport,
		}
	}

	pub fn options(&self) -> &ClientOptions {
		&self.options
	}

	pub fn transport(&self) -> &T {
		&self.transport
	}

	/// Sends one request, waiting for the throttle first.
	fn send(&self, request: Request) -> Option<Response> {
		self.throttle.acquire();
		let start = Instant::now();
		let result = self.transport.send(&request);
		self.throttle.release();
		log::debug!(
			"{} request to {} done in {:?}",
			request.method,
			self.options.endpoint,
			start.elapsed()
		);

		match result {
			Ok(response) => Some(response),
			Err(e) => {
				log::warn!("request to {} failed: {e}", self.options.endpoint);
				None
			}
		}
	}

	/// Sends a query.
	///
	/// Structured results (`SELECT` and `ASK` with the JSON results media
	/// type) are parsed, and `None` is returned if the endpoint could not be
	/// reached, answered with an error status or sent an invalid document.
	/// Other forms and media types return the received text as is.
	pub fn query(
		&self,
		text: &str,
		form: QueryForm,
		media_type: Option<&str>,
		dataset: &Dataset,
	) -> Option<QueryOutput> {
		let media_type = media_type.unwrap_or(form.default_media_type());
		log::trace!("{form} query:\n{text}");

		let mut params = vec![("query", text)];
		dataset.params("default-graph-uri", "named-graph-uri", &mut params);

		let response = self.send(Request {
			method: self.options.method,
			accept: media_type,
			params,
		})?;

		if form.is_graph() || media_type != SPARQL_RESULTS_JSON {
			return Some(QueryOutput::Raw(response.body));
		}

		if !response.is_success() {
			log::warn!("{form} query failed with status {}", response.status);
			return None;
		}

		let output = match form {
			QueryForm::Ask => results::parse_boolean(&response.body).map(QueryOutput::Boolean),
			_ => results::parse_bindings(&response.body).map(QueryOutput::Rows),
		};

		match output {
			Ok(output) => Some(output),
			Err(e) => {
				log::warn!("invalid {form} query results: {e}");
				None
			}
		}
	}

	pub fn ask(&self, text: &str) -> Option<bool> {
		match self.query(text, QueryForm::Ask, None, &Dataset::default())? {
			QueryOutput::Boolean(b) => Some(b),
			_ => None,
		}
	}

	/// Sends an update request, always with `POST`.
	pub fn update(
		&self,
		text: &str,
		media_type: Option<&str>,
		dataset: &Dataset,
	) -> Option<UpdateOutput> {
		let media_type = media_type.unwrap_or(JSON);
		log::trace!("update:\n{text}");

		let mut params = vec![("update", text)];
		dataset.params("using-graph-uri", "using-named-graph-uri", &mut params);

		let response = self.send(Request {
			method: Method::Post,
			accept: media_type,
			params,
		})?;

		if media_type != JSON {
			return Some(UpdateOutput::Raw(response.body));
		}

		if !response.is_success() {
			log::warn!("update failed with status {}", response.status);
			return None;
		}

		match serde_json::from_str(&response.body) {
			Ok(value) => Some(UpdateOutput::Json(value)),
			Err(e) => {
				log::warn!("invalid update response: {e}");
				None
			}
		}
	}

	/// Loads an RDF document into a graph.
	///
	/// If `bucket` is given, `location` is a key in that S3 bucket.
	pub fn load(
		&self,
		location: &str,
		graph: &str,
		bucket: Option<&str>,
	) -> Result<Option<UpdateOutput>, UnsafeIri> {
		let location = match bucket {
			Some(bucket) => format!("https://{bucket}.s3.amazonaws.com/{location}"),
			None => location.to_owned(),
		};

		let text = format!(
			"LOAD {} INTO GRAPH {}",
			IriTerm::parse(&location)?,
			IriTerm::parse(graph)?
		);

		log::info!("loading {location} into graph {graph}");
		Ok(self.update(&text, None, &Dataset::default()))
	}

	pub fn drop_graph(&self, graph: &str) -> Result<Option<UpdateOutput>, UnsafeIri> {
		let text = format!("DROP GRAPH {}", IriTerm::parse(graph)?);
		log::info!("dropping graph {graph}");
		Ok(self.update(&text, None, &Dataset::default()))
	}
}

impl<T: Transport> Select for QueryClient<T> {
	fn select(&self, query: &str) -> Option<Vec<Binding>> {
		match self.query(query, QueryForm::Select, None, &Dataset::default())? {
			QueryOutput::Rows(rows) => Some(rows),
			_ => None,
		}
	}
}
