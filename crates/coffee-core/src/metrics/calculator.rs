//! Token cost estimation

use crate::types::{TokenMetrics, ToolCatalogEntry, ToolResult};

/// How tool definitions are costed
#[derive(Debug, Clone, Copy)]
pub enum CostModel<'a> {
    /// Every tool costs `verbose` tokens in full and `abbreviated` when offloaded
    Fixed { verbose: u64, abbreviated: u64 },
    /// Costs sized from description lengths
    ///
    /// The baseline is the whole catalog (without offloading every definition
    /// would be sent); the offloaded cost covers only the selected tools.
    CatalogRelative {
        catalog: &'a [ToolCatalogEntry],
        chars_per_token: u32,
    },
}

/// Estimated tokens for a piece of text, unrounded
pub fn estimate_tokens(text: &str, chars_per_token: u32) -> f64 {
    if chars_per_token == 0 {
        return 0.0;
    }
    text.chars().count() as f64 / chars_per_token as f64
}

/// Before/after costs for a set of selected tools
///
/// Pure: the same inputs always give the same metrics.
pub fn compute_metrics(selected: &[ToolResult], model: &CostModel<'_>) -> TokenMetrics {
    match *model {
        CostModel::Fixed { verbose, abbreviated } => fixed_metrics(selected.len(), verbose, abbreviated),
        CostModel::CatalogRelative {
            catalog,
            chars_per_token,
        } => {
            let without: f64 = catalog
                .iter()
                .map(|entry| estimate_tokens(&entry.description, chars_per_token))
                .sum();
            let with: f64 = selected
                .iter()
                .map(|tool| estimate_tokens(selected_description(tool, catalog), chars_per_token))
                .sum();
            TokenMetrics::from_costs(without.round() as u64, with.round() as u64)
        }
    }
}

/// Fixed-cost metrics for `count` tools
///
/// Token constants are unbounded in config; costs saturate instead of
/// overflowing.
pub fn fixed_metrics(count: usize, verbose: u64, abbreviated: u64) -> TokenMetrics {
    let count = count as u64;
    TokenMetrics::from_costs(count.saturating_mul(verbose), count.saturating_mul(abbreviated))
}

/// Description used to cost a selected tool: the catalog entry with the same
/// id, else the tool's own description, else nothing
fn selected_description<'a>(tool: &'a ToolResult, catalog: &'a [ToolCatalogEntry]) -> &'a str {
    catalog
        .iter()
        .find(|entry| entry.id.as_ref() == Some(&tool.id))
        .map(|entry| entry.description.as_str())
        .or(tool.description.as_deref())
        .unwrap_or("")
}
