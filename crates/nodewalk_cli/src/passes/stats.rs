//! Node counting pass.

use std::collections::BTreeMap;
use std::convert::Infallible;
use std::sync::OnceLock;

use nodewalk_core::{
    Leaf, Node, NodeType, Record, Registry, Signal, Visitor, WalkOptions, walk_record,
};

/// Counts gathered over one document.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Stats {
    /// Records by type name.
    pub records: BTreeMap<String, usize>,
    pub sequences: usize,
    pub mappings: usize,
    /// Leaves by type name; enum leaves count under their enum type.
    pub leaves: BTreeMap<String, usize>,
    /// Records whose contents were skipped by type.
    pub skipped: usize,
}

impl Stats {
    pub fn total_records(&self) -> usize {
        self.records.values().sum()
    }

    pub fn total_leaves(&self) -> usize {
        self.leaves.values().sum()
    }
}

/// Counts every node reached by default traversal.
///
/// Containers are counted by registered handlers that leave the descent
/// decision to [`Visitor::default_stop`], so `--default-stop` limits the
/// count to the outermost container.
pub struct StatsPass {
    default_stop: bool,
    skip_types: Vec<String>,
}

impl StatsPass {
    pub fn new(options: &WalkOptions) -> Self {
        Self {
            default_stop: options.default_stop,
            skip_types: options.skip_types.clone(),
        }
    }

    pub fn run(mut self, document: &Node) -> Stats {
        let mut stats = Stats::default();
        match self.visit(document, &mut stats) {
            Ok(()) => stats,
            Err(never) => match never {},
        }
    }
}

fn count_sequence(_: &mut StatsPass, _: &Node, stats: &mut Stats) -> Result<Signal, Infallible> {
    stats.sequences += 1;
    Ok(Signal::Unspecified)
}

fn count_mapping(_: &mut StatsPass, _: &Node, stats: &mut Stats) -> Result<Signal, Infallible> {
    stats.mappings += 1;
    Ok(Signal::Unspecified)
}

impl Visitor for StatsPass {
    type Context = Stats;
    type Error = Infallible;

    fn registry() -> &'static Registry<Self> {
        static REGISTRY: OnceLock<Registry<StatsPass>> = OnceLock::new();
        REGISTRY.get_or_init(|| {
            Registry::builder("StatsPass")
                .register([NodeType::Sequence], count_sequence)
                .and_then(|b| b.register([NodeType::Mapping], count_mapping))
                .expect("StatsPass handlers are unique")
                .build()
        })
    }

    fn default_stop(&self) -> bool {
        self.default_stop
    }

    fn visit_record(&mut self, record: &Record, stats: &mut Stats) -> Result<(), Infallible> {
        *stats.records.entry(record.type_name().to_string()).or_default() += 1;
        if self.skip_types.iter().any(|t| t == record.type_name()) {
            stats.skipped += 1;
            return Ok(());
        }
        walk_record(self, record, stats)
    }

    fn visit_leaf(&mut self, leaf: &Leaf, stats: &mut Stats) -> Result<(), Infallible> {
        *stats.leaves.entry(leaf.node_type().name().to_string()).or_default() += 1;
        Ok(())
    }
}
