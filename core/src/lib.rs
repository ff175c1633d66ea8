//! Crosswalk is a navigator for artwork classification schemes.
//!
//! Three independent taxonomies are supported (see [`Scheme`]): a generic
//! entity-classification graph, a thesaurus vocabulary and a library
//! classification vocabulary. This crate defines the shared data model
//! ([`Concept`], [`Classification`], [`Rotation`], [`MatchKind`]) and the
//! per-scheme SPARQL [`Templates`] used to walk each hierarchy.
pub mod classification;
pub mod concept;
pub mod iri;
pub mod language;
pub mod matching;
pub mod scheme;
pub mod template;
pub mod vocab;

pub use classification::{Classification, Equivalent};
pub use concept::{Concept, InvalidConcept};
pub use iri::{IriTerm, UnsafeIri};
pub use language::{InvalidLanguage, LabelLanguage};
pub use matching::MatchKind;
pub use scheme::{Rotation, Scheme, Side, UnknownScheme};
pub use template::{Profile, Query, QueryKind, Templates};

pub use iref;
