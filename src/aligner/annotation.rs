use std::fmt::Display;

use indexmap::IndexMap;

/// A run of consecutive token indices covered by one annotation, both ends
/// inclusive. Most annotations sit on a single token; clause keywords with
/// their `BY`, table names with their alias and bracketed subqueries span
/// more.
///
/// The derived ordering (start first, then end) is the order annotations
/// should be presented in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenSpan {
    pub start: usize,
    pub end: usize,
}

impl TokenSpan {
    pub fn single(index: usize) -> TokenSpan {
        TokenSpan { start: index, end: index }
    }

    pub fn range(start: usize, end: usize) -> TokenSpan {
        TokenSpan { start, end }
    }

    pub fn is_single(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, index: usize) -> bool {
        self.start <= index && index <= self.end
    }
}

impl Display for TokenSpan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_single() {
            write!(f, "[{}]", self.start)
        } else {
            write!(f, "[{}..{}]", self.start, self.end)
        }
    }
}

/// The aligner's result: one explanatory sentence per covered token span,
/// plus the two entries that have no position in the text, the plan cost
/// and the alias registry. Display prints the entries in span order with
/// the positionless ones last.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnotationMap {
    /// Sentences keyed by token span, kept sorted by span start.
    pub entries: IndexMap<TokenSpan, String>,
    /// `Total cost of the query plan is: <value>.`, when the plan had one.
    pub cost: Option<String>,
    /// Alias to relation name, spelled the way the query wrote them.
    pub aliases: IndexMap<String, String>,
}

impl AnnotationMap {
    /// Annotation sitting exactly on one token index.
    pub fn at(&self, index: usize) -> Option<&str> {
        self.entries
            .get(&TokenSpan::single(index))
            .map(String::as_str)
    }

    /// First annotation whose span covers the index, single or not.
    pub fn covering(&self, index: usize) -> Option<(TokenSpan, &str)> {
        self.entries
            .iter()
            .find(|(span, _)| span.contains(index))
            .map(|(span, text)| (*span, text.as_str()))
    }

    /// Number of positional entries. The cost and alias extras are not
    /// counted here or in `is_empty`; check those fields directly.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Display for AnnotationMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (span, text) in &self.entries {
            writeln!(f, "{} {}", span, text)?;
        }
        if let Some(cost) = &self.cost {
            writeln!(f, "{}", cost)?;
        }
        for (alias, relation) in &self.aliases {
            writeln!(f, "\"{}\" is an alias of table \"{}\".", alias, relation)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;

    use super::{AnnotationMap, TokenSpan};

    #[test]
    pub fn test_span_ordering_is_start_then_end() {
        let mut spans = vec![
            TokenSpan::range(4, 6),
            TokenSpan::single(2),
            TokenSpan::range(2, 3),
            TokenSpan::single(0),
        ];
        spans.sort();

        assert_eq!(
            spans,
            vec![
                TokenSpan::single(0),
                TokenSpan::single(2),
                TokenSpan::range(2, 3),
                TokenSpan::range(4, 6),
            ]
        );
    }

    #[test]
    pub fn test_span_display() {
        assert_eq!(TokenSpan::single(3).to_string(), "[3]");
        assert_eq!(TokenSpan::range(7, 15).to_string(), "[7..15]");
    }

    #[test]
    pub fn test_lookups() {
        let mut entries = IndexMap::new();
        entries.insert(TokenSpan::single(3), "scan".to_string());
        entries.insert(TokenSpan::range(5, 6), "sort".to_string());
        let map = AnnotationMap { entries, ..AnnotationMap::default() };

        assert_eq!(map.at(3), Some("scan"));
        assert_eq!(map.at(5), None);
        assert_eq!(map.covering(6), Some((TokenSpan::range(5, 6), "sort")));
        assert_eq!(map.covering(4), None);
        assert_eq!(map.len(), 2);
    }

    #[test]
    pub fn test_display_prints_positionless_entries_last() {
        let mut entries = IndexMap::new();
        entries.insert(TokenSpan::single(2), "The table \"customer\" is read using a Seq Scan.".to_string());
        let mut aliases = IndexMap::new();
        aliases.insert("c".to_string(), "customer".to_string());
        let map = AnnotationMap {
            entries,
            cost: Some("Total cost of the query plan is: 61.0.".to_string()),
            aliases,
        };

        let printed = map.to_string();
        assert_eq!(
            printed,
            "[2] The table \"customer\" is read using a Seq Scan.\n\
             Total cost of the query plan is: 61.0.\n\
             \"c\" is an alias of table \"customer\".\n"
        );
    }

    #[test]
    pub fn test_len_and_is_empty_agree_on_the_entry_count() {
        assert!(AnnotationMap::default().is_empty());

        // the positionless extras do not make the map non-empty
        let with_cost = AnnotationMap {
            cost: Some("Total cost of the query plan is: 1.0.".to_string()),
            ..AnnotationMap::default()
        };
        assert_eq!(with_cost.len(), 0);
        assert!(with_cost.is_empty());

        let mut entries = IndexMap::new();
        entries.insert(TokenSpan::single(0), "scan".to_string());
        let with_entry = AnnotationMap { entries, ..AnnotationMap::default() };
        assert_eq!(with_entry.len(), 1);
        assert!(!with_entry.is_empty());
    }
}
