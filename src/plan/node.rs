use serde::Deserialize;
use serde_json::Number;

use crate::plan::NodeType;

/// One node of an `EXPLAIN (FORMAT JSON)` plan tree. Only the fields the
/// annotator reads are declared; everything else postgres emits (costs per
/// node, width, parallel flags, analyze counters) is ignored on parse.
///
/// `Total Cost` is kept as a raw JSON number so the value prints exactly the
/// way postgres wrote it.
#[derive(Debug, Clone, Deserialize)]
pub struct PlanNode {
    #[serde(rename = "Node Type")]
    pub node_type: String,
    #[serde(rename = "Relation Name")]
    pub relation_name: Option<String>,
    #[serde(rename = "Alias")]
    pub alias: Option<String>,
    #[serde(rename = "Filter")]
    pub filter: Option<String>,
    #[serde(rename = "Index Cond")]
    pub index_cond: Option<String>,
    #[serde(rename = "Hash Cond")]
    pub hash_cond: Option<String>,
    #[serde(rename = "Merge Cond")]
    pub merge_cond: Option<String>,
    #[serde(rename = "Join Filter")]
    pub join_filter: Option<String>,
    #[serde(rename = "Sort Key", default)]
    pub sort_key: Vec<String>,
    #[serde(rename = "Sort Method")]
    pub sort_method: Option<String>,
    #[serde(rename = "Strategy")]
    pub strategy: Option<String>,
    #[serde(rename = "Subplan Name")]
    pub subplan_name: Option<String>,
    #[serde(rename = "One-Time Filter")]
    pub one_time_filter: Option<String>,
    #[serde(rename = "Total Cost")]
    pub total_cost: Option<Number>,
    #[serde(rename = "Plans", default)]
    pub plans: Vec<PlanNode>,
}

impl PlanNode {
    /// Category of this node, resolved from the raw tag.
    pub fn kind(&self) -> NodeType {
        NodeType::from_tag(&self.node_type)
    }
}
