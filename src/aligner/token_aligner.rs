use std::collections::{HashMap, VecDeque};

use indexmap::IndexMap;
use tracing::debug;

use crate::{
    aligner::{AlignError, AnnotationMap, Clause, TokenSpan},
    walker::{JoinRecord, PlanWalk, ScanRecord, SubplanRecord},
};

/// Function names that mark a token as an aggregate call when a SELECT or
/// HAVING clause is scanned. Matched against the uppercased token prefix, so
/// `avg(c_acctbal)` and `avg` both qualify.
const AGGREGATE_NAMES: [&str; 5] = ["AVG", "COUNT", "MAX", "MIN", "SUM"];

/// Attaches the records of a [`PlanWalk`] to positions in the tokenized
/// query, in one left-to-right pass.
///
/// All the pass state lives in the instance and an instance serves exactly
/// one [`TokenAligner::attach`] call, so separate annotations never share
/// anything.
pub struct TokenAligner<'a> {
    tokens: &'a [String],

    scans: IndexMap<String, ScanRecord>,
    joins: VecDeque<JoinRecord>,
    sorts: VecDeque<String>,
    aggregates: VecDeque<String>,
    subplans: VecDeque<SubplanRecord>,

    clause: Option<Clause>,
    clause_start: usize,
    /// Tables seen since the latest FROM keyword.
    tables_in_from: usize,
    /// How often each scan key has shown up anywhere in the token stream,
    /// for resolving the `name_2` keys postgres invents for repeated tables.
    appeared: HashMap<String, usize>,
    open_brackets: Vec<usize>,
    matched_brackets: Vec<(usize, usize)>,

    output: AnnotationMap,
}

impl<'a> TokenAligner<'a> {
    /// Runs the alignment pass and returns the finished annotation map.
    ///
    /// `tokens` and `walk` must come from the same query: the pass counts
    /// tables and pops join records positionally, and a plan that joins
    /// fewer tables than the text lists is a caller mistake.
    pub fn attach(tokens: &'a [String], walk: PlanWalk) -> Result<AnnotationMap, AlignError> {
        let output = AnnotationMap {
            entries: IndexMap::new(),
            cost: walk
                .total_cost
                .as_ref()
                .map(|cost| format!("Total cost of the query plan is: {}.", cost)),
            aliases: walk.aliases,
        };

        let aligner = TokenAligner {
            tokens,
            scans: walk.scans,
            joins: walk.joins,
            sorts: walk.sorts,
            aggregates: walk.aggregates,
            subplans: walk.subplans,
            clause: None,
            clause_start: 0,
            tables_in_from: 0,
            appeared: HashMap::new(),
            open_brackets: Vec::new(),
            matched_brackets: Vec::new(),
            output,
        };

        aligner.run()
    }

    fn run(mut self) -> Result<AnnotationMap, AlignError> {
        // 1) Scan the tokens left to right
        for index in 0..self.tokens.len() {
            self.step(index)?;
        }

        // 2) Close the clause still open at the end of the stream
        self.exit_clause(self.tokens.len())?;

        // 3) Pair leftover bracket regions with subplan records
        self.attach_subplans();

        self.output.entries.sort_keys();
        Ok(self.output)
    }

    fn step(&mut self, index: usize) -> Result<(), AlignError> {
        let token = self.tokens[index].as_str();

        // brackets are tracked independently of the clause state
        match token {
            "(" => self.open_brackets.push(index),
            ")" => {
                // a close with no open is tolerated, the pair logic only
                // works with regions that really nest
                if let Some(open) = self.open_brackets.pop() {
                    self.matched_brackets.push((open, index));
                }
            }
            _ => {}
        }

        if let Some(next) = Clause::from_keyword(token) {
            self.exit_clause(index)?;
            self.clause = Some(next);
            self.clause_start = index;
            if next == Clause::From {
                self.tables_in_from = 0;
            }
        }

        match self.clause {
            Some(Clause::From) => self.from_token(index),
            Some(Clause::Update) | Some(Clause::Delete) => {
                self.lookup_scan(index);
            }
            _ => {}
        }

        Ok(())
    }

    /// FROM-clause token: table lookup, table counting and join attachment.
    fn from_token(&mut self, index: usize) {
        if self.lookup_scan(index) {
            // a table name followed by its alias counts once, on the alias
            if !self.next_is_table(index) {
                self.tables_in_from += 1;
            }

            if self.tables_in_from == 2 {
                let join = self
                    .joins
                    .pop_front()
                    .expect("a second FROM table implies a pending join record");
                self.output
                    .entries
                    .insert(TokenSpan::single(self.clause_start), join.display);
            } else if self.tables_in_from > 2 {
                let join = self
                    .joins
                    .pop_front()
                    .expect("every FROM table past the second implies a pending join record");
                let key = TokenSpan::single(self.clause_start);
                let folded = match self.output.entries.get(&key) {
                    // later joins wrap earlier ones, so the newest comes first
                    Some(existing) => format!("{}, followed by a {}", join.display, existing),
                    None => join.display,
                };
                self.output.entries.insert(key, folded);
            }
            return;
        }

        // a join condition spelled in a WHERE clause: only one table was
        // listed, and a token near it references the join's other side.
        // a relation name about to be aliased is the clause's next table,
        // not such a reference, even when it overlaps an operand
        if self.tables_in_from == 1
            && !self.next_is_table(index)
            && self
                .joins
                .front()
                .is_some_and(|join| join.matches_operand(&self.tokens[index]))
        {
            let join = self
                .joins
                .pop_front()
                .expect("the front join just matched this token");
            self.output
                .entries
                .insert(TokenSpan::single(index), join.display);
        }
    }

    /// Whether the token after `index` is still a key in the scan registry.
    fn next_is_table(&self, index: usize) -> bool {
        self.tokens
            .get(index + 1)
            .is_some_and(|next| self.scans.contains_key(&next.to_lowercase()))
    }

    /// Looks the token up in the scan registry, falling back to the
    /// `name_<count>` key postgres invents when a table is listed twice
    /// without aliases. A hit spends the record and writes its sentence.
    fn lookup_scan(&mut self, index: usize) -> bool {
        let lower = self.tokens[index].to_lowercase();

        let record = if let Some(record) = self.scans.shift_remove(&lower) {
            self.appeared.insert(lower, 1);
            record
        } else if let Some(count) = self.appeared.get_mut(&lower) {
            *count += 1;
            let suffixed = format!("{}_{}", lower, count);
            match self.scans.shift_remove(&suffixed) {
                Some(record) => {
                    // a planner-invented alias is not part of the query
                    self.output.aliases.shift_remove(&suffixed);
                    record
                }
                None => {
                    debug!(
                        "token '{}' repeats but no scan is registered under '{}'",
                        self.tokens[index], suffixed
                    );
                    return false;
                }
            }
        } else {
            return false;
        };

        let span = self.scan_span(index, &record);
        self.output.entries.insert(span, record.sentence());
        true
    }

    /// The span a scan sentence covers: the matched token alone, or paired
    /// with the relation name sitting right before its alias.
    fn scan_span(&self, index: usize, record: &ScanRecord) -> TokenSpan {
        if !record.alias.is_empty() && index > 0 {
            let previous = self.tokens[index - 1].as_str();
            if previous.eq_ignore_ascii_case(&record.relation) {
                return TokenSpan::range(index - 1, index);
            }
        }
        TokenSpan::single(index)
    }

    /// Runs the exit behavior of the clause being left; `end` is exclusive.
    fn exit_clause(&mut self, end: usize) -> Result<(), AlignError> {
        match self.clause {
            Some(Clause::Select) | Some(Clause::Having) => self.attach_aggregates(end),
            Some(clause) if clause.expects_by() => self.attach_sort()?,
            _ => {}
        }
        Ok(())
    }

    /// SELECT/HAVING exit: pairs aggregate calls with aggregate sentences,
    /// scanning the clause back to front.
    fn attach_aggregates(&mut self, end: usize) {
        for index in (self.clause_start..end).rev() {
            if self.aggregates.is_empty() {
                return;
            }
            let upper = self.tokens[index].to_uppercase();
            if AGGREGATE_NAMES.iter().any(|name| upper.starts_with(name)) {
                let sentence = self
                    .aggregates
                    .pop_front()
                    .expect("aggregate queue checked non-empty");
                self.output.entries.insert(TokenSpan::single(index), sentence);
            }
        }
    }

    /// GROUP/ORDER exit: the sort sentence spans the keyword and its BY.
    fn attach_sort(&mut self) -> Result<(), AlignError> {
        if self.sorts.is_empty() {
            return Ok(());
        }

        let by = self.clause_start + 1;
        let has_by = self
            .tokens
            .get(by)
            .is_some_and(|token| token.eq_ignore_ascii_case("by"));
        if !has_by {
            return AlignError::new(
                "expected BY right after the clause keyword",
                self.clause_start,
                self.tokens,
            )
            .err();
        }

        let sentence = self
            .sorts
            .pop_front()
            .expect("sort queue checked non-empty");
        self.output
            .entries
            .insert(TokenSpan::range(self.clause_start, by), sentence);
        Ok(())
    }

    /// Pairs bracketed regions with subplan records. The region that closed
    /// last sits at the back of the matched list and is taken first, which
    /// matches how the planner splits the outermost subquery off first.
    fn attach_subplans(&mut self) {
        while let Some((open, close)) = self.matched_brackets.pop() {
            let Some(record) = self.subplans.pop_front() else {
                break;
            };
            self.output
                .entries
                .insert(TokenSpan::range(open, close), record.sentence());
        }
    }
}
