use once_cell::sync::Lazy;
use regex::Regex;

use crate::{plan::PlanNode, walker::Helpers};

/// Matches the `$n` result marker postgres embeds in subplan names, as in
/// `InitPlan 1 (returns $1)`.
static RESULT_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\d+").expect("Failed to compile the result marker pattern"));

/// A named group of nodes the planner split out of the main tree, usually an
/// initplan or subplan backing a subquery. The aligner pairs these with the
/// parenthesized regions of the query.
#[derive(Debug, Clone, PartialEq)]
pub struct SubplanRecord {
    /// Display name: the `$n` marker when the plan's name carries one,
    /// otherwise the subplan name as-is.
    pub name: String,
    pub one_time_filter: Option<String>,
}

impl SubplanRecord {
    pub fn from_node(node: &PlanNode) -> Option<SubplanRecord> {
        let raw = node.subplan_name.as_deref()?;

        let name = match RESULT_MARKER.find(raw) {
            Some(marker) => marker.as_str().to_string(),
            None => raw.to_string(),
        };

        let one_time_filter = node
            .one_time_filter
            .as_deref()
            .map(|filter| Helpers::strip_outer_parens(filter).to_string());

        Some(SubplanRecord {
            name,
            one_time_filter,
        })
    }

    pub fn sentence(&self) -> String {
        let mut text = format!("Results of this group are stored in \"{}\".", self.name);
        if let Some(filter) = &self.one_time_filter {
            text.push_str(&format!(" A One-Time Filter \"{}\" is applied.", filter));
        }
        text
    }
}
