use crate::{plan::PlanNode, walker::Helpers};

/// The row-selecting expression a scan node carried, already stripped of its
/// outer parentheses. A node holding both keeps only the filter, which is
/// the expression postgres re-checks on every row.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanPredicate {
    Filter(String),
    IndexCond(String),
}

/// One table read found in the plan. The walker registers these under the
/// node's alias; the aligner turns them into sentences when the matching
/// token shows up in the query.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanRecord {
    pub relation: String,
    /// Alias shown next to the table name. Empty when the plan's alias is
    /// just the relation name again, which is how postgres reports an
    /// unaliased table.
    pub alias: String,
    /// Raw node tag, e.g. `Seq Scan` or `Index Only Scan`.
    pub kind: String,
    pub predicate: Option<ScanPredicate>,
}

impl ScanRecord {
    /// Builds the record for a scan node, or `None` for scans that read no
    /// named relation (subquery and function scans report no table).
    pub fn from_node(node: &PlanNode) -> Option<ScanRecord> {
        let relation = node.relation_name.clone()?;

        let alias = match &node.alias {
            Some(alias) if *alias != relation => alias.clone(),
            _ => String::new(),
        };

        let predicate = match (&node.filter, &node.index_cond) {
            (Some(filter), _) => Some(ScanPredicate::Filter(
                Helpers::strip_outer_parens(filter).to_string(),
            )),
            (None, Some(cond)) => Some(ScanPredicate::IndexCond(
                Helpers::strip_outer_parens(cond).to_string(),
            )),
            (None, None) => None,
        };

        Some(ScanRecord {
            relation,
            alias,
            kind: node.node_type.clone(),
            predicate,
        })
    }

    /// The annotation sentence for this read.
    pub fn sentence(&self) -> String {
        let mut text = if self.alias.is_empty() {
            format!(
                "The table \"{}\" is read using {} {}.",
                self.relation,
                Helpers::article(&self.kind),
                self.kind
            )
        } else {
            format!(
                "The table \"{}\" ({}) is read using {} {}.",
                self.relation,
                self.alias,
                Helpers::article(&self.kind),
                self.kind
            )
        };

        match &self.predicate {
            Some(ScanPredicate::Filter(filter)) => {
                text.push_str(&format!(" The filter \"{}\" is applied.", filter));
            }
            Some(ScanPredicate::IndexCond(cond)) => {
                text.push_str(&format!(" The index condition \"{}\" is applied.", cond));
            }
            None => {}
        }

        text
    }
}
