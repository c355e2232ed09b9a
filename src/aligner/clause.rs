/// The clauses the aligner tracks while scanning tokens. WHERE and SET are
/// deliberately not here: tokens after them keep the previous clause state,
/// which is how the FROM logic gets to see join conditions a query spells in
/// its WHERE clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clause {
    From,
    Select,
    Group,
    Order,
    Update,
    Delete,
    Having,
}

impl Clause {
    /// Resolves a token to the clause it opens, case-insensitively.
    pub fn from_keyword(token: &str) -> Option<Clause> {
        match token.to_uppercase().as_str() {
            "FROM" => Some(Clause::From),
            "SELECT" => Some(Clause::Select),
            "GROUP" => Some(Clause::Group),
            "ORDER" => Some(Clause::Order),
            "UPDATE" => Some(Clause::Update),
            "DELETE" => Some(Clause::Delete),
            "HAVING" => Some(Clause::Having),
            _ => None,
        }
    }

    /// Whether the clause expects a `BY` right after its keyword.
    pub fn expects_by(&self) -> bool {
        matches!(self, Clause::Group | Clause::Order)
    }
}

#[cfg(test)]
mod tests {
    use super::Clause;

    #[test]
    pub fn test_keywords_resolve_case_insensitively() {
        assert_eq!(Clause::from_keyword("from"), Some(Clause::From));
        assert_eq!(Clause::from_keyword("FROM"), Some(Clause::From));
        assert_eq!(Clause::from_keyword("Select"), Some(Clause::Select));
        assert_eq!(Clause::from_keyword("GROUP"), Some(Clause::Group));
        assert_eq!(Clause::from_keyword("order"), Some(Clause::Order));
        assert_eq!(Clause::from_keyword("Update"), Some(Clause::Update));
        assert_eq!(Clause::from_keyword("delete"), Some(Clause::Delete));
        assert_eq!(Clause::from_keyword("having"), Some(Clause::Having));
    }

    #[test]
    pub fn test_non_keywords_keep_the_current_clause() {
        assert_eq!(Clause::from_keyword("where"), None);
        assert_eq!(Clause::from_keyword("set"), None);
        assert_eq!(Clause::from_keyword("customer"), None);
        assert_eq!(Clause::from_keyword("("), None);
    }

    #[test]
    pub fn test_expects_by() {
        assert!(Clause::Group.expects_by());
        assert!(Clause::Order.expects_by());
        assert!(!Clause::From.expects_by());
        assert!(!Clause::Having.expects_by());
    }
}
