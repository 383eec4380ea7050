//! Leaf path listing pass.

use std::convert::Infallible;
use std::sync::OnceLock;

use nodewalk_core::{
    Leaf, Mapping, Node, Record, Registry, Visitor, WalkOptions, walk_node, walk_record,
};

/// A leaf and the path that reaches it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafPath {
    /// Slash-separated field names, sequence indices and mapping keys.
    pub path: String,
    /// The leaf as displayed by [`Leaf`]'s `Display`.
    pub value: String,
}

/// Traversal state: the segments leading to the current node.
#[derive(Debug, Default)]
pub struct PathTrail {
    segments: Vec<String>,
    found: Vec<LeafPath>,
}

impl PathTrail {
    fn depth(&self) -> usize {
        self.segments.len()
    }

    fn current(&self) -> String {
        format!("/{}", self.segments.join("/"))
    }

    fn enter<F>(&mut self, segment: impl Into<String>, f: F) -> Result<(), Infallible>
    where
        F: FnOnce(&mut Self) -> Result<(), Infallible>,
    {
        self.segments.push(segment.into());
        let result = f(self);
        self.segments.pop();
        result
    }
}

/// Lists every leaf reachable by default traversal with its path.
///
/// Has no handlers; all behavior lives in the overridden hooks.
pub struct PathsPass {
    max_depth: usize,
    skip_types: Vec<String>,
}

impl PathsPass {
    pub fn new(options: &WalkOptions) -> Self {
        Self {
            max_depth: options.max_depth,
            skip_types: options.skip_types.clone(),
        }
    }

    pub fn run(mut self, document: &Node) -> Vec<LeafPath> {
        let mut trail = PathTrail::default();
        match self.visit(document, &mut trail) {
            Ok(()) => trail.found,
            Err(never) => match never {},
        }
    }
}

impl Visitor for PathsPass {
    type Context = PathTrail;
    type Error = Infallible;

    fn registry() -> &'static Registry<Self> {
        static REGISTRY: OnceLock<Registry<PathsPass>> = OnceLock::new();
        REGISTRY.get_or_init(|| Registry::empty("PathsPass"))
    }

    fn visit(&mut self, node: &Node, trail: &mut PathTrail) -> Result<(), Infallible> {
        if self.max_depth > 0 && trail.depth() > self.max_depth {
            return Ok(());
        }
        walk_node(self, node, trail)
    }

    fn visit_record(&mut self, record: &Record, trail: &mut PathTrail) -> Result<(), Infallible> {
        if self.skip_types.iter().any(|t| t == record.type_name()) {
            return Ok(());
        }
        walk_record(self, record, trail)
    }

    fn visit_field(
        &mut self,
        _record: &Record,
        name: &str,
        value: &Node,
        trail: &mut PathTrail,
    ) -> Result<(), Infallible> {
        trail.enter(name, |trail| self.visit(value, trail))
    }

    fn visit_sequence(&mut self, items: &[Node], trail: &mut PathTrail) -> Result<(), Infallible> {
        for (index, item) in items.iter().enumerate() {
            trail.enter(index.to_string(), |trail| self.visit(item, trail))?;
        }
        Ok(())
    }

    fn visit_mapping(
        &mut self,
        mapping: &Mapping,
        trail: &mut PathTrail,
    ) -> Result<(), Infallible> {
        for (key, value) in mapping.iter() {
            trail.enter(key, |trail| self.visit(value, trail))?;
        }
        Ok(())
    }

    fn visit_leaf(&mut self, leaf: &Leaf, trail: &mut PathTrail) -> Result<(), Infallible> {
        let path = trail.current();
        trail.found.push(LeafPath {
            path,
            value: leaf.to_string(),
        });
        Ok(())
    }
}
