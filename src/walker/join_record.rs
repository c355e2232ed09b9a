use crate::{plan::PlanNode, walker::Helpers};

/// One join found in the plan, reduced to the text the aligner attaches and
/// the pieces it needs to spot the join condition inside a WHERE clause.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinRecord {
    /// `<node tag>` plus condition and join-filter clauses, when present.
    pub display: String,
    /// First and last operand of the join condition, kept for matching
    /// tokens against conditions the query spells in its WHERE clause.
    pub operands: Option<(String, String)>,
}

impl JoinRecord {
    pub fn from_node(node: &PlanNode) -> JoinRecord {
        let mut display = node.node_type.clone();
        let mut operands = None;

        let condition = node.hash_cond.as_deref().or(node.merge_cond.as_deref());
        if let Some(condition) = condition {
            let flat = Helpers::strip_all_parens(condition);
            display.push_str(&format!(" with condition: \"{}\"", flat));

            let words: Vec<&str> = flat.split_whitespace().collect();
            if let (Some(first), Some(last)) = (words.first(), words.last()) {
                operands = Some((first.to_string(), last.to_string()));
            }
        }

        if let Some(join_filter) = &node.join_filter {
            let connector = if condition.is_some() { "and" } else { "with" };
            display.push_str(&format!(
                " {} join filter: \"{}\"",
                connector,
                Helpers::strip_outer_parens(join_filter)
            ));
        }

        JoinRecord { display, operands }
    }

    /// Whether a token looks like one of the condition's operands. Matches
    /// substrings in either direction so `c_custkey` finds
    /// `customer.c_custkey` and vice versa. Case-insensitive.
    pub fn matches_operand(&self, token: &str) -> bool {
        let Some((first, last)) = &self.operands else {
            return false;
        };

        let token = token.to_lowercase();
        if token.is_empty() {
            return false;
        }

        [first, last].iter().any(|operand| {
            let operand = operand.to_lowercase();
            operand.contains(&token) || token.contains(&operand)
        })
    }
}
