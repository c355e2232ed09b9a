use std::fmt::Display;

/// The token stream broke an assumption the aligner cannot recover from.
/// Today that is a single case: a GROUP or ORDER keyword with no BY behind
/// it while a sort record was waiting.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignError {
    pub message: String,
    pub token: String,
    pub index: usize,
}

impl AlignError {
    pub fn new(message: &str, index: usize, tokens: &[String]) -> Self {
        Self {
            message: message.to_string(),
            token: tokens.get(index).cloned().unwrap_or_default(),
            index,
        }
    }

    pub fn err<T>(self) -> Result<T, AlignError> {
        Err(self)
    }
}

impl Display for AlignError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "AlignError: {}\n  at token [{}] -> '{}'",
            self.message, self.index, self.token
        )
    }
}

#[cfg(test)]
mod tests {
    use super::AlignError;

    #[test]
    pub fn test_new_captures_the_offending_token() {
        let tokens: Vec<String> = ["select", "x", "group", "name"]
            .iter()
            .map(|token| token.to_string())
            .collect();

        let error = AlignError::new("expected BY after the keyword", 2, &tokens);

        assert_eq!(error.token, "group");
        assert_eq!(error.index, 2);
        assert_eq!(
            error.to_string(),
            "AlignError: expected BY after the keyword\n  at token [2] -> 'group'"
        );
    }

    #[test]
    pub fn test_err_wraps_into_a_result() {
        let tokens: Vec<String> = vec![];
        let result: Result<(), AlignError> = AlignError::new("boom", 9, &tokens).err();

        let error = result.expect_err("Expected the error to pass through");
        assert_eq!(error.token, "");
        assert_eq!(error.index, 9);
    }
}
