//! Artifact rendering.
//!
//! Walks the route trie and renders the final TypeScript text: header,
//! conditional imports, the streaming-callback shape, the contract type,
//! the client interface, a type alias, and the factory function. All three
//! trie-shaped declarations are filled by a single walk (methods first,
//! then children, both in first-insertion order) that maps each route's
//! schema slots once, so the declarations stay mutually consistent.

use indexmap::IndexMap;

use super::contract::{ContractDocument, RawSchema, RouteDescriptor, SchemaIr};
use super::mapper::{ts_type, FALLBACK_TYPE};
use super::trie::TrieNode;
use super::utils::{indent, quote_if_needed};

/// Module the generated artifact imports its runtime helpers from.
const RUNTIME_MODULE: &str = "./runtime";

/// Mapped type text for the schema slots one route carries.
struct RouteTypes {
    body: Option<String>,
    query: Option<String>,
    params: Option<String>,
    response: String,
}

impl RouteTypes {
    fn of(route: &RouteDescriptor) -> RouteTypes {
        let schema = route.schema.as_ref();
        RouteTypes {
            body: mapped(schema.and_then(|s| s.body.as_ref())),
            query: mapped(schema.and_then(|s| s.query.as_ref())),
            params: mapped(schema.and_then(|s| s.params.as_ref())),
            response: mapped(schema.and_then(|s| s.response.as_ref()))
                .unwrap_or_else(|| FALLBACK_TYPE.to_string()),
        }
    }
}

fn mapped(raw: Option<&RawSchema>) -> Option<String> {
    raw.map(|raw| ts_type(&SchemaIr::from_raw(raw)))
}

/// Buffers for the three trie-shaped declarations, filled by one walk.
#[derive(Default)]
struct Sections {
    contract: String,
    client: String,
    factory: String,
}

/// Render the complete artifact. One generation attempt per call, no
/// partial-success mode; malformed individual schemas degrade through the
/// mapper's fallback instead of failing the pass.
pub fn render_module(root: &IndexMap<String, TrieNode>, document: &ContractDocument) -> String {
    let has_streaming = document.routes.iter().any(|route| route.streaming);

    let mut sections = Sections::default();
    render_tree(root, "", 1, &mut sections);

    let mut out = String::new();
    render_header(&mut out, document);
    render_imports(&mut out, has_streaming);
    if has_streaming {
        render_stream_callbacks(&mut out);
    }
    out.push_str("export type ApiContract = {\n");
    out.push_str(&sections.contract);
    out.push_str("};\n\n");
    out.push_str("export interface ApiClient {\n");
    out.push_str(&sections.client);
    out.push_str("}\n\n");
    out.push_str("export type Api = ApiClient;\n\n");
    out.push_str(
        "export function createApiClient(baseUrl: string, defaults?: RequestOptions): ApiClient {\n",
    );
    out.push_str("  return {\n");
    out.push_str(&sections.factory);
    out.push_str("  };\n");
    out.push_str("}\n");
    out
}

fn render_header(out: &mut String, document: &ContractDocument) {
    out.push_str(&format!(
        "// Generated API client for contract v{}.\n",
        document.version
    ));
    out.push_str(&format!(
        "// Generated at {}. Do not edit this file manually.\n\n",
        document.generated_at
    ));
}

fn render_imports(out: &mut String, has_streaming: bool) {
    out.push_str(&format!(
        "import {{ apiFetch, type ApiResponse, type RequestOptions }} from \"{RUNTIME_MODULE}\";\n"
    ));
    if has_streaming {
        out.push_str(&format!(
            "import {{ openStream, type StreamOptions, type StreamSubscription }} from \"{RUNTIME_MODULE}\";\n"
        ));
    }
    out.push('\n');
}

fn render_stream_callbacks(out: &mut String) {
    out.push_str("export interface StreamCallbacks<TEvent> {\n");
    out.push_str("  onEvent: (event: TEvent) => void;\n");
    out.push_str("  onError?: (error: Error) => void;\n");
    out.push_str("  onClose?: () => void;\n");
    out.push_str("}\n\n");
}

// ---------------------------------------------------------------------------
// Trie walk
// ---------------------------------------------------------------------------

/// One recursive walk fills all three declaration bodies, so their key
/// order and nesting can never drift apart. Each route's schema slots are
/// mapped once and shared by the three renderings. The factory body sits
/// one level deeper than the type declarations because of its `return {`
/// wrapper.
fn render_tree(
    nodes: &IndexMap<String, TrieNode>,
    path: &str,
    level: usize,
    sections: &mut Sections,
) {
    for (key, node) in nodes {
        let quoted = quote_if_needed(key);
        let pad = indent(level);
        sections.contract.push_str(&format!("{pad}{quoted}: {{\n"));
        sections.client.push_str(&format!("{pad}{quoted}: {{\n"));
        sections
            .factory
            .push_str(&format!("{}{quoted}: {{\n", indent(level + 1)));

        let child_path = format!("{path}/{key}");
        for (verb, route) in &node.methods {
            let verb_key = quote_if_needed(verb);
            let types = RouteTypes::of(route);
            let member_pad = indent(level + 1);

            sections.contract.push_str(&format!(
                "{member_pad}{verb_key}: {};\n",
                contract_shape(&types)
            ));

            if let Some(description) = &route.description {
                sections
                    .client
                    .push_str(&format!("{member_pad}/** {description} */\n"));
            }
            sections.client.push_str(&format!(
                "{member_pad}{verb_key}: {};\n",
                method_signature(route, &types)
            ));

            sections.factory.push_str(&format!(
                "{}{verb_key}: {},\n",
                indent(level + 2),
                factory_entry(verb, route, &child_path, &types)
            ));
        }

        render_tree(&node.children, &child_path, level + 1, sections);

        sections.contract.push_str(&format!("{pad}}};\n"));
        sections.client.push_str(&format!("{pad}}};\n"));
        sections
            .factory
            .push_str(&format!("{}}},\n", indent(level + 1)));
    }
}

/// Structural descriptor: only the slots whose schema was supplied, plus a
/// `return` field that is always present.
fn contract_shape(types: &RouteTypes) -> String {
    let mut fields = Vec::new();
    if let Some(query) = &types.query {
        fields.push(format!("query: {query}"));
    }
    if let Some(body) = &types.body {
        fields.push(format!("body: {body}"));
    }
    if let Some(params) = &types.params {
        fields.push(format!("params: {params}"));
    }
    fields.push(format!("return: {}", types.response));
    format!("{{ {} }}", fields.join("; "))
}

/// Invocable descriptor for one route. Streaming routes take subscription
/// callbacks and return a subscription handle; everything else takes the
/// supplied slots in fixed order (body, query, params) plus trailing
/// options and returns an enveloped promise.
fn method_signature(route: &RouteDescriptor, types: &RouteTypes) -> String {
    if route.streaming {
        return format!(
            "(callbacks: StreamCallbacks<{}>, options?: StreamOptions) => StreamSubscription",
            types.response
        );
    }

    let mut params = Vec::new();
    if let Some(body) = &types.body {
        params.push(format!("body: {body}"));
    }
    if let Some(query) = &types.query {
        params.push(format!("query: {query}"));
    }
    if let Some(path_params) = &types.params {
        params.push(format!("params: {path_params}"));
    }
    params.push("options?: RequestOptions".to_string());

    format!(
        "({}) => Promise<ApiResponse<{}>>",
        params.join(", "),
        types.response
    )
}

/// One arrow function per route. The path is the canonical trie address,
/// sentinel segments included; parameter substitution happens in the
/// runtime helper. `defaults` is a `RequestOptions` and is spread only into
/// request calls; streaming calls take a `StreamOptions`, a different
/// shape, so their options pass through untouched.
fn factory_entry(verb: &str, route: &RouteDescriptor, path: &str, types: &RouteTypes) -> String {
    if route.streaming {
        return format!("(callbacks, options) => openStream(baseUrl, \"{path}\", callbacks, options)");
    }

    let mut args = Vec::new();
    if types.body.is_some() {
        args.push("body");
    }
    if types.query.is_some() {
        args.push("query");
    }
    if types.params.is_some() {
        args.push("params");
    }
    let payload = if args.is_empty() {
        "{}".to_string()
    } else {
        format!("{{ {} }}", args.join(", "))
    };
    args.push("options");

    format!(
        "({}) => apiFetch(baseUrl, \"{verb}\", \"{path}\", {payload}, {{ ...defaults, ...options }})",
        args.join(", ")
    )
}
