//! Contract document to TypeScript client generator.
//!
//! This module turns a declarative API contract (route descriptors carrying
//! JSON-Schema-like type shapes) into one TypeScript artifact:
//! - A nested contract type describing each route's input/output shapes
//! - A client interface of invocable functions mirroring the path tree
//! - A factory function producing a client bound to a base URL
//!
//! The pipeline is: decode routes -> build the path trie -> render the
//! artifact, mapping each schema slot to type text along the way. The whole
//! pass is pure and synchronous; retrieval and persistence live outside.

mod contract;
mod emit;
mod mapper;
mod trie;
mod utils;

pub use contract::{
    ContractDocument, LiteralValue, Primitive, RawSchema, RouteDescriptor, RouteSchema, SchemaIr,
};
pub use mapper::{ts_type, FALLBACK_TYPE};
pub use trie::{build_trie, TrieNode, DYNAMIC_SEGMENT};

/// Generate the TypeScript client artifact for a contract document.
///
/// `prefix` is an optional leading path to strip from every route before
/// grouping (for example the mount point of a sub-router). The function is
/// total for any parsed document: malformed schema shapes degrade to the
/// fallback type and never abort the pass.
pub fn generate(document: &ContractDocument, prefix: Option<&str>) -> String {
    let root = trie::build_trie(&document.routes, prefix);
    emit::render_module(&root, document)
}
