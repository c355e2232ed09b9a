pub mod tokenizer;
pub use tokenizer::tokenize;

pub mod plan;
pub use plan::{ExplainError, ExplainOutput, NodeType, PlanNode};

pub mod walker;
pub use walker::PlanWalk;

pub mod aligner;
pub use aligner::{AlignError, AnnotationMap, TokenAligner, TokenSpan};

pub mod annotate;
pub use annotate::{annotate_explain, annotate_query, AnnotateError, AnnotatedQuery};
