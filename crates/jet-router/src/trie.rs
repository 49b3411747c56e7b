//! Prefix trie over pattern tokens
//!
//! Nodes live in an arena and are addressed by index. Each node keeps an
//! ordered edge list; an edge is a literal (prefix-compressed), a regex
//! fragment for a parameter slot or optional group, or a leaf marker.
//! Splitting a literal edge allocates a new node and relinks the parent, so
//! existing subtrees are moved, never copied.

type NodeId = usize;

const ROOT: NodeId = 0;

/// One step of a pattern's path through the trie
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step<'a> {
    Literal(&'a str),
    Pattern(&'a str),
}

#[derive(Debug)]
enum Edge<L> {
    Literal(String, NodeId),
    Pattern(String, NodeId),
    Leaf(L),
}

#[derive(Debug)]
struct Node<L> {
    edges: Vec<Edge<L>>,
}

impl<L> Node<L> {
    fn empty() -> Self {
        Self { edges: Vec::new() }
    }
}

#[derive(Debug)]
pub(crate) struct Trie<L> {
    nodes: Vec<Node<L>>,
}

impl<L> Trie<L> {
    pub(crate) fn new() -> Self {
        Self {
            nodes: vec![Node::empty()],
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.nodes[ROOT].edges.is_empty()
    }

    /// Insert a pattern; returns the leaf it replaced, if any
    pub(crate) fn insert<'a, I>(&mut self, steps: I, leaf: L) -> Option<L>
    where
        I: IntoIterator<Item = Step<'a>>,
    {
        let mut node = ROOT;
        for step in steps {
            node = match step {
                Step::Literal(text) => self.literal_child(node, text),
                Step::Pattern(fragment) => self.pattern_child(node, fragment),
            };
        }

        let edges = &mut self.nodes[node].edges;
        for edge in edges.iter_mut() {
            if let Edge::Leaf(existing) = edge {
                return Some(std::mem::replace(existing, leaf));
            }
        }
        edges.push(Edge::Leaf(leaf));
        None
    }

    fn alloc(&mut self, node: Node<L>) -> NodeId {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    fn literal_child(&mut self, node: NodeId, key: &str) -> NodeId {
        if key.is_empty() {
            return node;
        }

        for i in 0..self.nodes[node].edges.len() {
            let (existing, child) = match &self.nodes[node].edges[i] {
                Edge::Literal(existing, child) => (existing.clone(), *child),
                _ => continue,
            };
            let n = common_prefix_len(&existing, key);
            if n == 0 {
                continue;
            }

            if n == existing.len() {
                // Existing edge covers the head of the key: walk through it
                return self.literal_child(child, &key[n..]);
            }

            if n == key.len() {
                // Key is a proper prefix: key -> { rest-of-existing -> child }
                let mid = self.alloc(Node {
                    edges: vec![Edge::Literal(existing[n..].to_string(), child)],
                });
                self.nodes[node].edges[i] = Edge::Literal(key.to_string(), mid);
                return mid;
            }

            let fresh = self.alloc(Node::empty());
            let mid = self.alloc(Node {
                edges: vec![
                    Edge::Literal(existing[n..].to_string(), child),
                    Edge::Literal(key[n..].to_string(), fresh),
                ],
            });
            self.nodes[node].edges[i] = Edge::Literal(existing[..n].to_string(), mid);
            return fresh;
        }

        let fresh = self.alloc(Node::empty());
        self.nodes[node]
            .edges
            .push(Edge::Literal(key.to_string(), fresh));
        fresh
    }

    fn pattern_child(&mut self, node: NodeId, fragment: &str) -> NodeId {
        let found = self.nodes[node].edges.iter().find_map(|edge| match edge {
            Edge::Pattern(existing, child) if existing == fragment => Some(*child),
            _ => None,
        });
        if let Some(child) = found {
            return child;
        }
        let fresh = self.alloc(Node::empty());
        self.nodes[node]
            .edges
            .push(Edge::Pattern(fragment.to_string(), fresh));
        fresh
    }

    /// Emit the discriminating expression body (without anchors)
    ///
    /// Each leaf becomes an empty `(\z)` capture; `on_leaf` is called for the
    /// leaves in the same order as their capture groups appear.
    pub(crate) fn emit<F: FnMut(&L)>(&self, out: &mut String, mut on_leaf: F) {
        self.emit_node(ROOT, out, &mut on_leaf);
    }

    fn emit_node<F: FnMut(&L)>(&self, id: NodeId, out: &mut String, on_leaf: &mut F) {
        let edges = &self.nodes[id].edges;
        match edges.len() {
            0 => {}
            1 => self.emit_edge(&edges[0], out, on_leaf),
            _ => {
                out.push_str("(?:");
                for (i, edge) in edges.iter().enumerate() {
                    if i > 0 {
                        out.push('|');
                    }
                    self.emit_edge(edge, out, on_leaf);
                }
                out.push(')');
            }
        }
    }

    fn emit_edge<F: FnMut(&L)>(&self, edge: &Edge<L>, out: &mut String, on_leaf: &mut F) {
        match edge {
            Edge::Literal(text, child) => {
                out.push_str(&regex::escape(text));
                self.emit_node(*child, out, on_leaf);
            }
            Edge::Pattern(fragment, child) => {
                out.push_str(fragment);
                self.emit_node(*child, out, on_leaf);
            }
            Edge::Leaf(leaf) => {
                out.push_str(r"(\z)");
                on_leaf(leaf);
            }
        }
    }
}

/// Byte length of the common prefix, backed off to a char boundary
fn common_prefix_len(a: &str, b: &str) -> usize {
    let mut n = a
        .bytes()
        .zip(b.bytes())
        .take_while(|(x, y)| x == y)
        .count();
    while !a.is_char_boundary(n) {
        n -= 1;
    }
    n
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(paths: &[&'static str]) -> (String, Vec<&'static str>) {
        let mut trie = Trie::new();
        for path in paths {
            trie.insert([Step::Literal(path)], *path);
        }
        let mut out = String::new();
        let mut leaves = Vec::new();
        trie.emit(&mut out, |leaf| leaves.push(*leaf));
        (out, leaves)
    }

    #[test]
    fn test_common_prefix_len() {
        assert_eq!(common_prefix_len("baar", "bazz"), 2);
        assert_eq!(common_prefix_len("bar", "barkuz"), 3);
        assert_eq!(common_prefix_len("barrab", "bar"), 3);
        assert_eq!(common_prefix_len("abc", "xyz"), 0);
        // "é" and "è" share their first UTF-8 byte only
        assert_eq!(common_prefix_len("/café", "/cafè"), 4);
    }

    #[test]
    fn test_split_shared_prefix() {
        let (re, leaves) = build(&["aa1", "aa8"]);
        assert_eq!(re, r"aa(?:1(\z)|8(\z))");
        assert_eq!(leaves, vec!["aa1", "aa8"]);
    }

    #[test]
    fn test_split_keeps_sibling_order() {
        let (re, leaves) = build(&["aa1", "bb1", "cc1", "bb8"]);
        assert_eq!(re, r"(?:aa1(\z)|bb(?:1(\z)|8(\z))|cc1(\z))");
        assert_eq!(leaves, vec!["aa1", "bb1", "bb8", "cc1"]);
    }

    #[test]
    fn test_existing_edge_is_prefix_of_new_key() {
        let (re, _) = build(&["aa1", "aa1mm2"]);
        assert_eq!(re, r"aa1(?:(\z)|mm2(\z))");
    }

    #[test]
    fn test_new_key_is_prefix_of_existing_edge() {
        let (re, leaves) = build(&["aa1", "aa"]);
        assert_eq!(re, r"aa(?:1(\z)|(\z))");
        assert_eq!(leaves, vec!["aa1", "aa"]);
    }

    #[test]
    fn test_no_common_prefix_appends() {
        let (re, _) = build(&["aa1", "mm1"]);
        assert_eq!(re, r"(?:aa1(\z)|mm1(\z))");
    }

    #[test]
    fn test_pattern_edges_are_separate_from_literals() {
        let mut trie = Trie::new();
        trie.insert([Step::Literal("/x/"), Step::Pattern("bb1")], 1);
        trie.insert([Step::Literal("/x/"), Step::Literal("bb1")], 2);
        trie.insert([Step::Literal("/x/"), Step::Pattern("bb1")], 3);
        let mut out = String::new();
        let mut leaves = Vec::new();
        trie.emit(&mut out, |l| leaves.push(*l));
        assert_eq!(out, r"/x/(?:bb1(\z)|bb1(\z))");
        // re-inserting the same pattern replaces its leaf in place
        assert_eq!(leaves, vec![3, 2]);
    }

    #[test]
    fn test_literals_are_escaped() {
        let (re, _) = build(&["/books.json"]);
        assert_eq!(re, r"/books\.json(\z)");
    }

    #[test]
    fn test_insert_returns_replaced_leaf() {
        let mut trie = Trie::new();
        assert_eq!(trie.insert([Step::Literal("/a")], 1), None);
        assert_eq!(trie.insert([Step::Literal("/a")], 2), Some(1));
        assert!(!trie.is_empty());
    }
}
