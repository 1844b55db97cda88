use crate::error::BindError;

/// Outcome of binding one argument list.
///
/// `Errors` is never empty, and a `Parsed` instance is only produced once
/// every conversion and constraint succeeded.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseResult<T> {
    Parsed(T),
    Errors(Vec<BindError>),
}

impl<T> ParseResult<T> {
    pub fn is_parsed(&self) -> bool {
        matches!(self, Self::Parsed(_))
    }

    /// Help was requested instead of a normal run.
    pub fn is_help(&self) -> bool {
        matches!(self, Self::Errors(errors) if errors.first().is_some_and(BindError::stops_processing))
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Parsed(value) => Some(value),
            Self::Errors(_) => None,
        }
    }

    pub fn errors(&self) -> &[BindError] {
        match self {
            Self::Parsed(_) => &[],
            Self::Errors(errors) => errors,
        }
    }

    pub fn into_result(self) -> Result<T, Vec<BindError>> {
        match self {
            Self::Parsed(value) => Ok(value),
            Self::Errors(errors) => Err(errors),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ParseResult<U> {
        match self {
            Self::Parsed(value) => ParseResult::Parsed(f(value)),
            Self::Errors(errors) => ParseResult::Errors(errors),
        }
    }
}

impl<T> From<ParseResult<T>> for Result<T, Vec<BindError>> {
    fn from(result: ParseResult<T>) -> Self {
        result.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors() {
        let parsed: ParseResult<i32> = ParseResult::Parsed(3);
        assert!(parsed.is_parsed());
        assert!(!parsed.is_help());
        assert_eq!(parsed.value(), Some(&3));
        assert!(parsed.errors().is_empty());
        assert_eq!(parsed.map(|v| v * 2).into_result(), Ok(6));

        let help: ParseResult<i32> = ParseResult::Errors(vec![BindError::HelpRequested]);
        assert!(help.is_help());
        assert_eq!(help.value(), None);
        assert_eq!(help.errors(), &[BindError::HelpRequested]);
    }
}
