//! Template nodes and the bounded template lookup.
//!
//! Nodes live in a single id-keyed store. Ownership flows outward from the
//! root along `outgoing`; `parent` is only a lookup hint pointing at the
//! node whose traversal first created this one.
//!
//! # Lookup
//! 1. Local search: the node itself, each child, each child's children
//!    (depth 2, never deeper)
//! 2. The same local search at each ancestor, at most `max_ancestor_hops`
//!    hops up the parent chain
//! 3. Otherwise a new node is created under the current one

use super::ids::{IdAllocator, NodeId};
use super::similarity::SimilarityMatcher;
use crate::utils::SearchConfig;
use log::debug;
use std::collections::{BTreeMap, HashMap, HashSet};

/// A log-line template and its observed successors
#[derive(Debug, Clone)]
pub struct TemplateNode {
    /// Unique id, immutable
    pub id: NodeId,

    /// Trimmed template text, immutable
    pub text: String,

    /// Node whose traversal first created (or first reached) this one
    pub parent: Option<NodeId>,

    /// Target id -> number of observed transitions
    pub outgoing: BTreeMap<NodeId, u64>,
}

impl TemplateNode {
    /// Create a node, taking its id from `ids`
    pub fn new(text: &str, ids: &mut IdAllocator, parent: Option<NodeId>) -> Self {
        Self {
            id: ids.next_id(),
            text: text.trim().to_string(),
            parent,
            outgoing: BTreeMap::new(),
        }
    }

    /// Count one more transition to `target`
    pub fn add_transition(&mut self, target: NodeId) {
        *self.outgoing.entry(target).or_insert(0) += 1;
    }

    /// Transitions observed to `target` (0 if never)
    pub fn transition_count(&self, target: NodeId) -> u64 {
        self.outgoing.get(&target).copied().unwrap_or(0)
    }

    /// Successor ids in lookup order
    pub fn children(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.outgoing.keys().copied()
    }
}

/// Store of template nodes plus the resolution algorithm
#[derive(Debug, Clone)]
pub struct TemplateGraph {
    nodes: HashMap<NodeId, TemplateNode>,
    ids: IdAllocator,
    root: NodeId,
    matcher: SimilarityMatcher,
    search: SearchConfig,
}

impl TemplateGraph {
    /// Create a graph holding only the root node
    pub fn new(root_text: &str, matcher: SimilarityMatcher, search: SearchConfig) -> Self {
        let mut ids = IdAllocator::new();
        let root = TemplateNode::new(root_text, &mut ids, None);
        let root_id = root.id;

        let mut nodes = HashMap::new();
        nodes.insert(root_id, root);

        Self {
            nodes,
            ids,
            root: root_id,
            matcher,
            search,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> Option<&TemplateNode> {
        self.nodes.get(&id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn matcher(&self) -> &SimilarityMatcher {
        &self.matcher
    }

    /// Number of ids handed out, root included
    pub fn allocated_ids(&self) -> u64 {
        self.ids.allocated()
    }

    /// Add a node with a fresh id
    pub fn create_node(&mut self, text: &str, parent: Option<NodeId>) -> NodeId {
        let node = TemplateNode::new(text, &mut self.ids, parent);
        let id = node.id;
        debug!("Created node {}: {}", id, node.text);
        self.nodes.insert(id, node);
        id
    }

    /// Set `parent` only if the node has none yet
    pub fn adopt(&mut self, id: NodeId, parent: NodeId) {
        if let Some(node) = self.nodes.get_mut(&id) {
            if node.parent.is_none() {
                node.parent = Some(parent);
            }
        }
    }

    /// Count one transition `from -> to`
    pub fn record_transition(&mut self, from: NodeId, to: NodeId) {
        if let Some(node) = self.nodes.get_mut(&from) {
            node.add_transition(to);
        }
    }

    /// Find or create the node for `text` and record `current -> node`
    pub fn resolve_next(&mut self, current: NodeId, text: &str) -> NodeId {
        let next = match self.search_for_node(current, text) {
            Some(found) => found,
            None => self.create_node(text, Some(current)),
        };

        self.record_transition(current, next);
        next
    }

    /// Bounded lookup around `origin` and up to its ancestors
    pub fn search_for_node(&self, origin: NodeId, text: &str) -> Option<NodeId> {
        let mut visited = self.search.dedup_revisits.then(HashSet::new);

        if let Some(found) = self.search_this_node_and_children(origin, text, visited.as_mut()) {
            return Some(found);
        }

        // Ancestors repeat the local search, which re-checks nodes already
        // seen unless dedup_revisits is on.
        let mut ancestor = self.nodes.get(&origin).and_then(|node| node.parent);
        for _ in 0..self.search.max_ancestor_hops {
            let Some(id) = ancestor else {
                break;
            };

            if let Some(found) = self.search_this_node_and_children(id, text, visited.as_mut()) {
                return Some(found);
            }

            ancestor = self.nodes.get(&id).and_then(|node| node.parent);
        }

        None
    }

    /// Check `origin`, its children and its grandchildren, in that order
    pub fn search_this_node_and_children(
        &self,
        origin: NodeId,
        text: &str,
        mut visited: Option<&mut HashSet<NodeId>>,
    ) -> Option<NodeId> {
        let node = self.nodes.get(&origin)?;
        if self.matches(node, text, visited.as_deref_mut()) {
            return Some(origin);
        }

        for child_id in node.children() {
            let Some(child) = self.nodes.get(&child_id) else {
                continue;
            };
            if self.matches(child, text, visited.as_deref_mut()) {
                return Some(child_id);
            }

            for grandchild_id in child.children() {
                let Some(grandchild) = self.nodes.get(&grandchild_id) else {
                    continue;
                };
                if self.matches(grandchild, text, visited.as_deref_mut()) {
                    return Some(grandchild_id);
                }
            }
        }

        None
    }

    /// Similarity check, skipped for nodes already in `visited`
    fn matches(
        &self,
        node: &TemplateNode,
        text: &str,
        visited: Option<&mut HashSet<NodeId>>,
    ) -> bool {
        if let Some(seen) = visited {
            if !seen.insert(node.id) {
                return false;
            }
        }
        self.matcher.similar_enough(text, &node.text)
    }
}
