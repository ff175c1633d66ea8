use crosswalk::{iref::IriBuf, Scheme, UnsafeIri};

/// Transition requested from a state that does not allow it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Precondition {
	#[error("no equivalent concept is known in the {0} scheme")]
	Unresolved(Scheme),

	#[error("<{0}> is not a narrower concept of the current concept")]
	NotNarrower(IriBuf),

	#[error("<{0}> has no broader concept")]
	NoBroader(IriBuf),
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Precondition(#[from] Precondition),

	#[error(transparent)]
	UnsafeIri(#[from] UnsafeIri),
}
