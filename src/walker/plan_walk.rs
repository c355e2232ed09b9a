use std::collections::VecDeque;

use indexmap::IndexMap;
use serde_json::Number;
use tracing::{debug, trace};

use crate::{
    plan::{NodeType, PlanNode},
    walker::{Helpers, JoinRecord, ScanRecord, SubplanRecord},
};

/// Everything one pass over a plan tree collects, queued per category in the
/// order the token aligner consumes it.
#[derive(Debug, Clone, Default)]
pub struct PlanWalk {
    /// Scan records keyed by the node's alias, lowercased. Spelled-out
    /// aliases and postgres' defaulted relation-name aliases land here the
    /// same way.
    pub scans: IndexMap<String, ScanRecord>,
    /// Join records, innermost join of each chain first (see [`PlanWalk::walk`]).
    pub joins: VecDeque<JoinRecord>,
    /// Finished sentences for Sort nodes, in plan order.
    pub sorts: VecDeque<String>,
    /// Finished sentences for aggregate nodes, in plan order.
    pub aggregates: VecDeque<String>,
    pub subplans: VecDeque<SubplanRecord>,
    /// Alias registry, alias spelled the way the plan reports it. Only
    /// aliases that differ from their relation name are registered.
    pub aliases: IndexMap<String, String>,
    /// Estimated cost from the root node.
    pub total_cost: Option<Number>,
}

impl PlanWalk {
    /// Walks a plan tree and collects the annotation records.
    ///
    /// Children are visited in plan order, which postgres emits matching the
    /// FROM clause left to right. Scans, sorts, aggregates and subplan
    /// markers are recorded on the way down; a join is recorded after its
    /// children, so the join queue lists the innermost join of a chain
    /// before the joins built on top of it. The aligner pops scans and
    /// joins front to back, and the pairing is only right under this order.
    pub fn walk(root: &PlanNode) -> PlanWalk {
        let mut walk = PlanWalk {
            total_cost: root.total_cost.clone(),
            ..PlanWalk::default()
        };
        walk.visit(root);
        walk
    }

    fn visit(&mut self, node: &PlanNode) {
        // a subplan marker can sit on any node type
        if let Some(record) = SubplanRecord::from_node(node) {
            self.subplans.push_back(record);
        }

        let kind = node.kind();
        match &kind {
            kind if kind.is_scan() => self.visit_scan(node),
            kind if kind.is_sort() => self.sorts.push_back(Self::sort_sentence(node)),
            kind if kind.is_aggregate() => {
                self.aggregates.push_back(Self::aggregate_sentence(node, kind));
            }
            kind if kind.is_join() => {}
            _ => trace!("no annotation for node type '{}'", node.node_type),
        }

        for child in &node.plans {
            self.visit(child);
        }

        if kind.is_join() {
            self.joins.push_back(JoinRecord::from_node(node));
        }
    }

    fn visit_scan(&mut self, node: &PlanNode) {
        let Some(record) = ScanRecord::from_node(node) else {
            debug!("scan node '{}' reads no named relation, skipped", node.node_type);
            return;
        };

        if !record.alias.is_empty() {
            self.aliases
                .insert(record.alias.clone(), record.relation.clone());
        }

        let key = node
            .alias
            .as_deref()
            .unwrap_or(&record.relation)
            .to_lowercase();
        self.scans.insert(key, record);
    }

    fn sort_sentence(node: &PlanNode) -> String {
        let keys = node.sort_key.join(", ");
        let mut text = format!("This sort is performed with sort key(s) \"{}\".", keys);
        if let Some(method) = &node.sort_method {
            text.push_str(&format!(" The sort method is \"{}\".", method));
        }
        text
    }

    fn aggregate_sentence(node: &PlanNode, kind: &NodeType) -> String {
        let mut clauses: Vec<String> = Vec::new();
        if matches!(kind, NodeType::GroupAggregate | NodeType::HashAggregate) {
            clauses.push(format!("using {}", kind.as_str()));
        }
        if let Some(strategy) = &node.strategy {
            clauses.push(format!("with the strategy \"{}\"", strategy));
        }

        let mut text = match clauses.len() {
            0 => "This aggregation is performed.".to_string(),
            1 => format!("This aggregation is performed {}.", clauses[0]),
            _ => format!(
                "This aggregation is performed {} and {}.",
                clauses[0], clauses[1]
            ),
        };

        if let Some(filter) = &node.filter {
            text.push_str(&format!(
                " The filter \"{}\" is applied.",
                Helpers::strip_outer_parens(filter)
            ));
        }

        text
    }
}
