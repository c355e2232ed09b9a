pub struct Helpers;

impl Helpers {
    /// Strips one enclosing parenthesis pair, the way `EXPLAIN` prints
    /// filter and condition expressions. Inner parentheses stay untouched.
    pub fn strip_outer_parens(text: &str) -> &str {
        let trimmed = text.trim();
        match trimmed.strip_prefix('(').and_then(|rest| rest.strip_suffix(')')) {
            Some(inner) => inner,
            None => trimmed,
        }
    }

    /// Removes every parenthesis, keeping the rest of the text as-is.
    pub fn strip_all_parens(text: &str) -> String {
        text.chars().filter(|ch| *ch != '(' && *ch != ')').collect()
    }

    /// Indefinite article for a node-type name, picked by its first letter.
    pub fn article(word: &str) -> &'static str {
        match word.chars().next().map(|ch| ch.to_ascii_lowercase()) {
            Some('a' | 'e' | 'i' | 'o' | 'u') => "an",
            _ => "a",
        }
    }
}
