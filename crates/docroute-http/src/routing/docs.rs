//! Documentation entries collected by a router
//!
//! Each router owns a [`RouteDocs`] list. Verb registrations append
//! [`DocNode::Route`] entries; mounting a child router appends a
//! [`DocNode::Mount`] holding the child's frozen list together with the mount
//! prefix and the tag derived from it. [`RouteDocs::flatten`] walks the tree once
//! and yields the entries the document is compiled from.

use docroute_openapi::RouteDocEntry;
use std::sync::Arc;

/// A child router's entries as seen from its mount point
#[derive(Debug, Clone)]
pub struct MountedDocs {
    pub prefix: String,
    pub tag: Option<String>,
    pub docs: Arc<RouteDocs>,
}

#[derive(Debug, Clone)]
pub enum DocNode {
    Route(RouteDocEntry),
    Mount(MountedDocs),
}

/// Ordered documentation entries of one router
#[derive(Debug, Clone, Default)]
pub struct RouteDocs {
    nodes: Vec<DocNode>,
}

impl RouteDocs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_route(&mut self, entry: RouteDocEntry) {
        self.nodes.push(DocNode::Route(entry));
    }

    /// Record `child` as mounted at `prefix`. The child list is frozen from here on.
    pub fn push_mount(&mut self, prefix: &str, child: RouteDocs) {
        self.nodes.push(DocNode::Mount(MountedDocs {
            prefix: prefix.to_string(),
            tag: derive_tag(prefix),
            docs: Arc::new(child),
        }));
    }

    pub fn nodes(&self) -> &[DocNode] {
        &self.nodes
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of entries after flattening
    pub fn len(&self) -> usize {
        self.nodes
            .iter()
            .map(|node| match node {
                DocNode::Route(_) => 1,
                DocNode::Mount(mounted) => mounted.docs.len(),
            })
            .sum()
    }

    /// Entries in registration order with mount prefixes applied.
    ///
    /// Paths are concatenated as-is. Tags set closer to the route win over tags
    /// of outer mount points.
    pub fn flatten(&self) -> Vec<RouteDocEntry> {
        let mut entries = Vec::with_capacity(self.len());
        for node in &self.nodes {
            match node {
                DocNode::Route(entry) => entries.push(entry.clone()),
                DocNode::Mount(mounted) => entries.extend(
                    mounted
                        .docs
                        .flatten()
                        .iter()
                        .map(|entry| entry.prefixed(&mounted.prefix, mounted.tag.as_deref())),
                ),
            }
        }
        entries
    }
}

/// Tag for a mount path: its last non-empty segment with the first character
/// upper-cased. Anything after `?` is ignored.
pub fn derive_tag(path: &str) -> Option<String> {
    let path = path.split('?').next().unwrap_or_default();
    let segment = path.split('/').filter(|s| !s.is_empty()).last()?;

    let mut chars = segment.chars();
    chars
        .next()
        .map(|first| first.to_uppercase().chain(chars).collect())
}
