use std::fmt::Display;

use crate::{
    aligner::{AlignError, AnnotationMap, TokenAligner},
    plan::{ExplainError, ExplainOutput, PlanNode},
    tokenizer::tokenize,
    walker::PlanWalk,
};

/// A query with its plan annotations: the map plus the token list its
/// indices point into.
#[derive(Debug, Clone)]
pub struct AnnotatedQuery {
    pub annotations: AnnotationMap,
    pub tokens: Vec<String>,
}

impl Display for AnnotatedQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.tokens.join(" "))?;
        write!(f, "{}", self.annotations)
    }
}

/// Either half of the pipeline failing: reading the plan, or aligning it
/// with the query text.
#[derive(Debug, Clone)]
pub enum AnnotateError {
    Explain(ExplainError),
    Align(AlignError),
}

impl From<ExplainError> for AnnotateError {
    fn from(error: ExplainError) -> Self {
        AnnotateError::Explain(error)
    }
}

impl From<AlignError> for AnnotateError {
    fn from(error: AlignError) -> Self {
        AnnotateError::Align(error)
    }
}

impl Display for AnnotateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnnotateError::Explain(error) => write!(f, "{}", error),
            AnnotateError::Align(error) => write!(f, "{}", error),
        }
    }
}

/// Walks an already parsed plan and aligns its records with the query text
/// the plan was generated from.
pub fn annotate_query(plan: &PlanNode, query: &str) -> Result<AnnotatedQuery, AlignError> {
    let tokens = tokenize(query);
    let walk = PlanWalk::walk(plan);
    let annotations = TokenAligner::attach(&tokens, walk)?;

    Ok(AnnotatedQuery {
        annotations,
        tokens,
    })
}

/// Annotates straight from the text of an `EXPLAIN (FORMAT JSON)` result.
pub fn annotate_explain(explain_json: &str, query: &str) -> Result<AnnotatedQuery, AnnotateError> {
    let output = ExplainOutput::try_from(explain_json)?;
    let annotated = annotate_query(&output.plan, query)?;
    Ok(annotated)
}
