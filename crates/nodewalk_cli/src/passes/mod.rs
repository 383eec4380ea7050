//! Traversal passes available from the command line.

mod paths;
mod stats;

use nodewalk_core::{Node, WalkOptions};

pub use paths::{LeafPath, PathsPass};
pub use stats::{Stats, StatsPass};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassKind {
    Stats,
    Paths,
}

/// What a pass found in one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    Stats(Stats),
    Paths(Vec<LeafPath>),
}

impl PassKind {
    /// Runs a fresh engine of this kind over `document`.
    pub fn run(self, document: &Node, options: &WalkOptions) -> Report {
        match self {
            PassKind::Stats => Report::Stats(StatsPass::new(options).run(document)),
            PassKind::Paths => Report::Paths(PathsPass::new(options).run(document)),
        }
    }
}
