//! Namespaces and well-known IRIs.

pub const WIKIDATA_ENTITY: &str = "http://www.wikidata.org/entity/";
pub const WIKIDATA_DIRECT: &str = "http://www.wikidata.org/prop/direct/";
pub const AAT: &str = "http://vocab.getty.edu/aat/";
pub const GVP: &str = "http://vocab.getty.edu/ontology#";
pub const NOMENCLATURE: &str = "https://nomenclature.info/nom/";
pub const RDFS: &str = "http://www.w3.org/2000/01/rdf-schema#";
pub const SKOS: &str = "http://www.w3.org/2004/02/skos/core#";
pub const SKOSXL: &str = "http://www.w3.org/2008/05/skos-xl#";

/// Named graph holding the cross-scheme equivalence triples.
pub const CROSSWALK_GRAPH: &str = "https://art-classification-crosswalks";

/// Prologue shared by every generated query.
pub const PROLOGUE: &str = "PREFIX wd:     <http://www.wikidata.org/entity/>
PREFIX wdt:    <http://www.wikidata.org/prop/direct/>
PREFIX gvp:    <http://vocab.getty.edu/ontology#>
PREFIX rdfs:   <http://www.w3.org/2000/01/rdf-schema#>
PREFIX skos:   <http://www.w3.org/2004/02/skos/core#>
PREFIX skosxl: <http://www.w3.org/2008/05/skos-xl#>
";
