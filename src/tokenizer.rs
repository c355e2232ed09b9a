/// Splits a query into whitespace-separated tokens, with commas and
/// parentheses isolated as single-character tokens. Case and spelling are
/// preserved, and no SQL grammar is applied, so the indices of the result
/// are stable positions the annotation map can point back into.
pub fn tokenize(query: &str) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    let mut word = String::new();

    for current in query.chars() {
        if current.is_whitespace() {
            if !word.is_empty() {
                tokens.push(std::mem::take(&mut word));
            }
        } else if matches!(current, ',' | '(' | ')') {
            if !word.is_empty() {
                tokens.push(std::mem::take(&mut word));
            }
            tokens.push(current.to_string());
        } else {
            word.push(current);
        }
    }

    if !word.is_empty() {
        tokens.push(word);
    }

    tokens
}
