use std::io::{self, Read};

use crate::{ClientOptions, Method};

/// Physical request sent to the endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request<'a> {
	pub method: Method,

	/// Value of the `Accept` header.
	pub accept: &'a str,

	/// URL parameters (`GET`) or form fields (`POST`).
	pub params: Vec<(&'static str, &'a str)>,
}

impl<'a> Request<'a> {
	/// Value of the first parameter with the given name.
	pub fn param(&self, name: &str) -> Option<&'a str> {
		self.params
			.iter()
			.find(|(n, _)| *n == name)
			.map(|(_, value)| *value)
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
	pub status: u16,
	pub body: String,
}

impl Response {
	pub fn new(status: u16, body: impl Into<String>) -> Self {
		Self {
			status,
			body: body.into(),
		}
	}

	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
	#[error(transparent)]
	Http(Box<ureq::Error>),

	#[error(transparent)]
	IO(#[from] io::Error),
}

/// Way of reaching the endpoint.
pub trait Transport: Send + Sync {
	/// Sends the request and returns the response, whatever its status.
	fn send(&self, request: &Request) -> Result<Response, TransportError>;
}

/// HTTP transport, reusing one connection pool for every request.
pub struct HttpTransport {
	agent: ureq::Agent,
	endpoint: String,
}

impl HttpTransport {
	pub fn new(options: &ClientOptions) -> Self {
		let mut builder = ureq::AgentBuilder::new().timeout(options.timeout);
		if let Some(user_agent) = options.user_agent() {
			builder = builder.user_agent(user_agent)
		}

		Self {
			agent: builder.build(),
			endpoint: options.endpoint.clone(),
		}
	}
}

impl Transport for HttpTransport {
	fn send(&self, request: &Request) -> Result<Response, TransportError> {
		let result = match request.method {
			Method::Get => {
				let mut r = self.agent.get(&self.endpoint).set("Accept", request.accept);
				for (name, value) in &request.params {
					r = r.query(name, value)
				}

				r.call()
			}
			Method::Post => self
				.agent
				.post(&self.endpoint)
				.set("Accept", request.accept)
				.send_form(&request.params),
		};

		let (status, response) = match result {
			Ok(response) => (response.status(), response),
			Err(ureq::Error::Status(status, response)) => (status, response),
			Err(e) => return Err(TransportError::Http(Box::new(e))),
		};

		// Unbounded, unlike `into_string`.
		let mut body = String::new();
		response.into_reader().read_to_string(&mut body)?;

		Ok(Response { status, body })
	}
}
