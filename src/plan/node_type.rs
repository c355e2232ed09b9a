use std::fmt::Display;

/// Node categories found in the `Node Type` field of `EXPLAIN (FORMAT JSON)`
/// output. Tags that never produce an annotation are still listed so the
/// walker can tell a known structural node from something it has never seen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeType {
    NestedLoop,
    HashJoin,
    MergeJoin,
    SeqScan,
    IndexScan,
    IndexOnlyScan,
    BitmapIndexScan,
    BitmapHeapScan,
    SampleScan,
    TidScan,
    TidRangeScan,
    SubqueryScan,
    FunctionScan,
    TableFunctionScan,
    ValuesScan,
    CteScan,
    NamedTuplestoreScan,
    WorkTableScan,
    ForeignScan,
    CustomScan,
    Sort,
    IncrementalSort,
    Aggregate,
    GroupAggregate,
    HashAggregate,
    Result,
    ProjectSet,
    ModifyTable,
    Append,
    MergeAppend,
    RecursiveUnion,
    BitmapAnd,
    BitmapOr,
    Gather,
    GatherMerge,
    Materialize,
    Memoize,
    Group,
    WindowAgg,
    Unique,
    SetOp,
    LockRows,
    Limit,
    /// Tag this crate does not recognize, kept verbatim.
    Other(String),
}

impl NodeType {
    pub fn from_tag(tag: &str) -> NodeType {
        match tag {
            "Nested Loop" => NodeType::NestedLoop,
            "Hash Join" => NodeType::HashJoin,
            "Merge Join" => NodeType::MergeJoin,
            "Seq Scan" => NodeType::SeqScan,
            "Index Scan" => NodeType::IndexScan,
            "Index Only Scan" => NodeType::IndexOnlyScan,
            "Bitmap Index Scan" => NodeType::BitmapIndexScan,
            "Bitmap Heap Scan" => NodeType::BitmapHeapScan,
            "Sample Scan" => NodeType::SampleScan,
            "Tid Scan" => NodeType::TidScan,
            "Tid Range Scan" => NodeType::TidRangeScan,
            "Subquery Scan" => NodeType::SubqueryScan,
            "Function Scan" => NodeType::FunctionScan,
            "Table Function Scan" => NodeType::TableFunctionScan,
            "Values Scan" => NodeType::ValuesScan,
            "CTE Scan" => NodeType::CteScan,
            "Named Tuplestore Scan" => NodeType::NamedTuplestoreScan,
            "WorkTable Scan" => NodeType::WorkTableScan,
            "Foreign Scan" => NodeType::ForeignScan,
            "Custom Scan" => NodeType::CustomScan,
            "Sort" => NodeType::Sort,
            "Incremental Sort" => NodeType::IncrementalSort,
            "Aggregate" => NodeType::Aggregate,
            "GroupAggregate" => NodeType::GroupAggregate,
            "HashAggregate" => NodeType::HashAggregate,
            "Result" => NodeType::Result,
            "ProjectSet" => NodeType::ProjectSet,
            "ModifyTable" => NodeType::ModifyTable,
            "Append" => NodeType::Append,
            "Merge Append" => NodeType::MergeAppend,
            "Recursive Union" => NodeType::RecursiveUnion,
            "BitmapAnd" => NodeType::BitmapAnd,
            "BitmapOr" => NodeType::BitmapOr,
            "Gather" => NodeType::Gather,
            "Gather Merge" => NodeType::GatherMerge,
            "Materialize" => NodeType::Materialize,
            "Memoize" => NodeType::Memoize,
            "Group" => NodeType::Group,
            "WindowAgg" => NodeType::WindowAgg,
            "Unique" => NodeType::Unique,
            "SetOp" => NodeType::SetOp,
            "LockRows" => NodeType::LockRows,
            "Limit" => NodeType::Limit,
            other => NodeType::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            NodeType::NestedLoop => "Nested Loop",
            NodeType::HashJoin => "Hash Join",
            NodeType::MergeJoin => "Merge Join",
            NodeType::SeqScan => "Seq Scan",
            NodeType::IndexScan => "Index Scan",
            NodeType::IndexOnlyScan => "Index Only Scan",
            NodeType::BitmapIndexScan => "Bitmap Index Scan",
            NodeType::BitmapHeapScan => "Bitmap Heap Scan",
            NodeType::SampleScan => "Sample Scan",
            NodeType::TidScan => "Tid Scan",
            NodeType::TidRangeScan => "Tid Range Scan",
            NodeType::SubqueryScan => "Subquery Scan",
            NodeType::FunctionScan => "Function Scan",
            NodeType::TableFunctionScan => "Table Function Scan",
            NodeType::ValuesScan => "Values Scan",
            NodeType::CteScan => "CTE Scan",
            NodeType::NamedTuplestoreScan => "Named Tuplestore Scan",
            NodeType::WorkTableScan => "WorkTable Scan",
            NodeType::ForeignScan => "Foreign Scan",
            NodeType::CustomScan => "Custom Scan",
            NodeType::Sort => "Sort",
            NodeType::IncrementalSort => "Incremental Sort",
            NodeType::Aggregate => "Aggregate",
            NodeType::GroupAggregate => "GroupAggregate",
            NodeType::HashAggregate => "HashAggregate",
            NodeType::Result => "Result",
            NodeType::ProjectSet => "ProjectSet",
            NodeType::ModifyTable => "ModifyTable",
            NodeType::Append => "Append",
            NodeType::MergeAppend => "Merge Append",
            NodeType::RecursiveUnion => "Recursive Union",
            NodeType::BitmapAnd => "BitmapAnd",
            NodeType::BitmapOr => "BitmapOr",
            NodeType::Gather => "Gather",
            NodeType::GatherMerge => "Gather Merge",
            NodeType::Materialize => "Materialize",
            NodeType::Memoize => "Memoize",
            NodeType::Group => "Group",
            NodeType::WindowAgg => "WindowAgg",
            NodeType::Unique => "Unique",
            NodeType::SetOp => "SetOp",
            NodeType::LockRows => "LockRows",
            NodeType::Limit => "Limit",
            NodeType::Other(tag) => tag,
        }
    }

    pub fn is_join(&self) -> bool {
        matches!(
            self,
            NodeType::NestedLoop | NodeType::HashJoin | NodeType::MergeJoin
        )
    }

    pub fn is_scan(&self) -> bool {
        matches!(
            self,
            NodeType::SeqScan
                | NodeType::IndexScan
                | NodeType::IndexOnlyScan
                | NodeType::BitmapIndexScan
                | NodeType::BitmapHeapScan
                | NodeType::SampleScan
                | NodeType::TidScan
                | NodeType::TidRangeScan
                | NodeType::SubqueryScan
                | NodeType::FunctionScan
                | NodeType::TableFunctionScan
                | NodeType::ValuesScan
                | NodeType::CteScan
                | NodeType::NamedTuplestoreScan
                | NodeType::WorkTableScan
                | NodeType::ForeignScan
                | NodeType::CustomScan
        )
    }

    pub fn is_aggregate(&self) -> bool {
        matches!(
            self,
            NodeType::Aggregate | NodeType::GroupAggregate | NodeType::HashAggregate
        )
    }

    pub fn is_sort(&self) -> bool {
        matches!(self, NodeType::Sort | NodeType::IncrementalSort)
    }
}

impl Display for NodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
