//! Route trie construction.
//!
//! Groups a flat ordered route list into a path-segment tree. Dynamic
//! segments (`:name`) are canonicalized to one fixed sentinel key so routes
//! that differ only in parameter naming collapse onto the same node. An
//! optional prefix is stripped from route paths before grouping.

use indexmap::IndexMap;

use super::contract::RouteDescriptor;

/// Fixed key for dynamic path segments, independent of the original
/// parameter name.
pub const DYNAMIC_SEGMENT: &str = ":param";

/// One node in the path-segment tree. `methods` and `children` are
/// independent namespaces; both preserve first-insertion order.
#[derive(Debug, Default)]
pub struct TrieNode {
    /// Routes terminating at this node, keyed by lowercased verb.
    pub methods: IndexMap<String, RouteDescriptor>,
    /// Child segments below this node.
    pub children: IndexMap<String, TrieNode>,
    /// Whether this node's key is the dynamic sentinel.
    pub is_dynamic: bool,
}

/// Build the route trie from an ordered route list.
///
/// Routes whose path is empty after prefix stripping have no address in the
/// tree and are dropped. Two routes landing on the same node and method key
/// overwrite silently, last-write-wins.
pub fn build_trie(
    routes: &[RouteDescriptor],
    prefix: Option<&str>,
) -> IndexMap<String, TrieNode> {
    let prefix = normalize_prefix(prefix);
    let mut root = IndexMap::new();

    for route in routes {
        let path = strip_route_prefix(&route.path, prefix.as_deref());
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        if segments.is_empty() {
            continue;
        }
        insert_route(&mut root, &segments, route);
    }

    root
}

/// Trim separators from both ends of the prefix, then prepend exactly one.
/// An empty or separator-only prefix is a no-op.
fn normalize_prefix(prefix: Option<&str>) -> Option<String> {
    let trimmed = prefix?.trim_matches('/');
    if trimmed.is_empty() {
        return None;
    }
    Some(format!("/{trimmed}"))
}

/// Strip the normalized prefix on a literal leading match. A path that
/// becomes empty is replaced by the root path marker.
fn strip_route_prefix<'a>(path: &'a str, prefix: Option<&str>) -> &'a str {
    let Some(prefix) = prefix else {
        return path;
    };
    match path.strip_prefix(prefix) {
        Some("") => "/",
        Some(rest) => rest,
        None => path,
    }
}

fn canonical_segment(segment: &str) -> String {
    if segment.starts_with(':') {
        DYNAMIC_SEGMENT.to_string()
    } else {
        segment.to_string()
    }
}

fn insert_route(
    nodes: &mut IndexMap<String, TrieNode>,
    segments: &[&str],
    route: &RouteDescriptor,
) {
    let Some((first, rest)) = segments.split_first() else {
        return;
    };

    let key = canonical_segment(first);
    let is_dynamic = key == DYNAMIC_SEGMENT;
    let node = nodes.entry(key).or_default();
    if is_dynamic {
        node.is_dynamic = true;
    }

    if rest.is_empty() {
        node.methods
            .insert(route.method.to_ascii_lowercase(), route.clone());
    } else {
        insert_route(&mut node.children, rest, route);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn route(method: &str, path: &str) -> RouteDescriptor {
        RouteDescriptor {
            method: method.to_string(),
            path: path.to_string(),
            name: None,
            description: None,
            streaming: false,
            schema: None,
        }
    }

    #[test]
    fn test_methods_share_one_node() {
        let routes = vec![route("GET", "/users"), route("POST", "/users")];
        let root = build_trie(&routes, None);

        assert_eq!(root.len(), 1);
        let users = &root["users"];
        assert_eq!(users.methods.len(), 2);
        assert!(users.methods.contains_key("get"));
        assert!(users.methods.contains_key("post"));
    }

    #[test]
    fn test_dynamic_segments_collapse_to_sentinel() {
        let routes = vec![
            route("GET", "/users/:userId"),
            route("GET", "/posts/:postId"),
        ];
        let root = build_trie(&routes, None);

        assert_eq!(root.len(), 2);
        for key in ["users", "posts"] {
            let node = &root[key];
            assert_eq!(node.children.len(), 1);
            let child = &node.children[DYNAMIC_SEGMENT];
            assert!(child.is_dynamic);
            assert!(child.methods.contains_key("get"));
        }
    }

    #[test]
    fn test_same_position_dynamic_routes_share_a_node() {
        let routes = vec![
            route("GET", "/users/:userId"),
            route("DELETE", "/users/:id"),
        ];
        let root = build_trie(&routes, None);

        let dynamic = &root["users"].children[DYNAMIC_SEGMENT];
        assert_eq!(dynamic.methods.len(), 2);
    }

    #[test]
    fn test_prefix_stripping() {
        let routes = vec![route("GET", "/api/v1/users")];
        let root = build_trie(&routes, Some("/api/v1"));

        assert_eq!(root.len(), 1);
        assert!(root.contains_key("users"));
    }

    #[test]
    fn test_prefix_is_normalized() {
        let routes = vec![route("GET", "/billingRestfulApi/users")];
        let root = build_trie(&routes, Some("billingRestfulApi/"));

        assert_eq!(root.len(), 1);
        assert!(root.contains_key("users"));
    }

    #[test]
    fn test_unmatched_prefix_leaves_path_intact() {
        let routes = vec![route("GET", "/users")];
        let root = build_trie(&routes, Some("/api"));

        assert!(root.contains_key("users"));
    }

    #[test]
    fn test_route_equal_to_prefix_is_dropped() {
        let routes = vec![route("GET", "/api/v1"), route("GET", "/api/v1/users")];
        let root = build_trie(&routes, Some("/api/v1"));

        assert_eq!(root.len(), 1);
        assert!(root.contains_key("users"));
    }

    #[test]
    fn test_root_level_routes_are_dropped() {
        let routes = vec![route("GET", "/"), route("GET", "")];
        let root = build_trie(&routes, None);

        assert!(root.is_empty());
    }

    #[test]
    fn test_duplicate_separators_are_tolerated() {
        let routes = vec![route("GET", "//users///active")];
        let root = build_trie(&routes, None);

        assert!(root["users"].children.contains_key("active"));
    }

    #[test]
    fn test_colliding_routes_overwrite_last_write_wins() {
        let mut first = route("GET", "/users/:a");
        first.name = Some("first".into());
        let mut second = route("GET", "/users/:b");
        second.name = Some("second".into());

        let root = build_trie(&[first, second], None);
        let node = &root["users"].children[DYNAMIC_SEGMENT];
        assert_eq!(node.methods["get"].name.as_deref(), Some("second"));
    }

    #[test]
    fn test_insertion_order_is_preserved() {
        let routes = vec![
            route("GET", "/zebra"),
            route("GET", "/alpha"),
            route("GET", "/mango"),
        ];
        let root = build_trie(&routes, None);

        let keys: Vec<_> = root.keys().cloned().collect();
        assert_eq!(keys, vec!["zebra", "alpha", "mango"]);
    }

    #[test]
    fn test_intermediate_nodes_carry_no_methods() {
        let routes = vec![route("GET", "/users/:id/posts")];
        let root = build_trie(&routes, None);

        assert!(root["users"].methods.is_empty());
        assert!(root["users"].children[DYNAMIC_SEGMENT].methods.is_empty());
    }
}
