use std::{fmt, str::FromStr, time::Duration};

use iref::IriBuf;

/// Endpoints of shared public services, for which a user agent is mandatory.
pub const SHARED_ENDPOINTS: [&str; 2] = [
	"https://query.wikidata.org/sparql",
	"https://commons-query.wikimedia.org/sparql",
];

pub const DEFAULT_DELAY: Duration = Duration::from_millis(100);

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// HTTP method used to send queries.
///
/// Updates are always sent with `POST`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
	#[default]
	Get,
	Post,
}

#[derive(Debug, thiserror::Error)]
#[error("unknown HTTP method `{0}`")]
pub struct UnknownMethod(String);

impl FromStr for Method {
	type Err = UnknownMethod;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"get" => Ok(Self::Get),
			"post" => Ok(Self::Post),
			_ => Err(UnknownMethod(s.to_owned())),
		}
	}
}

impl fmt::Display for Method {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Get => f.write_str("GET"),
			Self::Post => f.write_str("POST"),
		}
	}
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("a user agent is required to query the shared endpoint `{0}`")]
	MissingUserAgent(String),

	#[error("invalid endpoint URL `{0}`")]
	InvalidEndpoint(String),
}

#[derive(Debug, Clone)]
pub struct ClientOptions {
	pub endpoint: String,

	pub method: Method,

	/// Recommended format: `appname/version (contact)`.
	pub user_agent: Option<String>,

	/// Pause observed after every request.
	pub delay: Duration,

	/// Bound on every request, after which it is treated as failed.
	pub timeout: Duration,

	/// Marks the endpoint as a shared public service even if it is not in
	/// [`SHARED_ENDPOINTS`].
	pub shared: bool,
}

impl ClientOptions {
	pub fn new(endpoint: impl Into<String>) -> Self {
		Self {
			endpoint: endpoint.into(),
			method: Method::default(),
			user_agent: None,
			delay: DEFAULT_DELAY,
			timeout: DEFAULT_TIMEOUT,
			shared: false,
		}
	}

	pub fn with_method(mut self, method: Method) -> Self {
		self.method = method;
		self
	}

	pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
		self.user_agent = Some(user_agent.into());
		self
	}

	pub fn with_delay(mut self, delay: Duration) -> Self {
		self.delay = delay;
		self
	}

	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;
		self
	}

	pub fn shared(mut self, shared: bool) -> Self {
		self.shared = shared;
		self
	}

	pub fn is_shared(&self) -> bool {
		self.shared || SHARED_ENDPOINTS.contains(&self.endpoint.as_str())
	}

	/// Non-blank user agent, if any.
	pub fn user_agent(&self) -> Option<&str> {
		self.user_agent
			.as_deref()
			.map(str::trim)
			.filter(|ua| !ua.is_empty())
	}

	pub fn validate(&self) -> Result<(), ConfigError> {
		if IriBuf::new(self.endpoint.clone()).is_err() {
			return Err(ConfigError::InvalidEndpoint(self.endpoint.clone()));
		}

		if self.is_shared() && self.user_agent().is_none() {
			return Err(ConfigError::MissingUserAgent(self.endpoint.clone()));
		}

		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn shared_endpoint_requires_user_agent() {
		let options = ClientOptions::new("https://query.wikidata.org/sparql");
		assert!(matches!(
			options.validate(),
			Err(ConfigError::MissingUserAgent(_))
		));

		let options = options.with_user_agent("   ");
		assert!(options.validate().is_err());

		let options = options.with_user_agent("crosswalk/0.1.0 (mailto:someone@example.org)");
		assert!(options.validate().is_ok())
	}

	#[test]
	fn private_endpoint_allows_no_user_agent() {
		let options = ClientOptions::new("https://sparql.vanderbilt.edu/sparql");
		assert!(options.validate().is_ok());
		assert!(options.shared(true).validate().is_err())
	}

	#[test]
	fn invalid_endpoint() {
		assert!(matches!(
			ClientOptions::new("not a url").validate(),
			Err(ConfigError::InvalidEndpoint(_))
		))
	}

	#[test]
	fn parse_method() {
		assert_eq!("post".parse::<Method>().unwrap(), Method::Post);
		assert_eq!("GET".parse::<Method>().unwrap(), Method::Get);
		assert!("put".parse::<Method>().is_err())
	}
}
