//! Text output formatter

use std::collections::BTreeMap;

use super::DocumentReport;
use crate::passes::{Report, Stats};

pub fn output_text(reports: &[DocumentReport]) {
    for document in reports {
        println!("{}:", document.path.display());
        match &document.report {
            Report::Stats(stats) => output_stats(stats),
            Report::Paths(leaves) => {
                for leaf in leaves {
                    println!("  {} = {}", leaf.path, leaf.value);
                }
            }
        }
    }

    println!();
    println!("Walked {} files", reports.len());
}

fn output_stats(stats: &Stats) {
    println!(
        "  records: {}{}",
        stats.total_records(),
        breakdown(&stats.records)
    );
    println!("  sequences: {}", stats.sequences);
    println!("  mappings: {}", stats.mappings);
    println!(
        "  leaves: {}{}",
        stats.total_leaves(),
        breakdown(&stats.leaves)
    );
    if stats.skipped > 0 {
        println!("  skipped: {}", stats.skipped);
    }
}

fn breakdown(counts: &BTreeMap<String, usize>) -> String {
    if counts.is_empty() {
        return String::new();
    }
    let parts: Vec<_> = counts
        .iter()
        .map(|(name, count)| format!("{} {}", name, count))
        .collect();
    format!(" ({})", parts.join(", "))
}
