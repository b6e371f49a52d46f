use regex::Regex;

/// Comparison applied by leaf conditions. Parsed from the fixed symbol table used on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// `==`
    Equals,
    /// `!=`
    DoesntEqual,
    /// `*`
    Contains,
    /// `!*`
    DoesntContain,
    /// `^`
    StartsWith,
    /// `!^`
    DoesntStartWith,
    /// `$`
    EndsWith,
    /// `!$`
    DoesntEndWith,
    /// `regex`. An invalid pattern never matches.
    MatchesRegex,
    /// `in`. Comparison value is a newline-separated list.
    IsOneOf,
    /// `not in`
    IsntOneOf,
    /// `?`
    Exists,
    /// `!?`
    DoesntExist,
    /// `>`
    IsGreaterThan,
    /// `>=`
    IsGreaterThanOrEqual,
    /// `<`
    IsLessThan,
    /// `<=`
    IsLessThanOrEqual,
    /// Unrecognized symbol. Always evaluates to `false`.
    Invalid,
}

impl Operator {
    /// Parse an operator symbol. Unknown symbols map to [`Operator::Invalid`].
    pub fn from_symbol(symbol: &str) -> Operator {
        match symbol {
            "==" => Operator::Equals,
            "!=" => Operator::DoesntEqual,
            "*" => Operator::Contains,
            "!*" => Operator::DoesntContain,
            "^" => Operator::StartsWith,
            "!^" => Operator::DoesntStartWith,
            "$" => Operator::EndsWith,
            "!$" => Operator::DoesntEndWith,
            "regex" => Operator::MatchesRegex,
            "in" => Operator::IsOneOf,
            "not in" => Operator::IsntOneOf,
            "?" => Operator::Exists,
            "!?" => Operator::DoesntExist,
            ">" => Operator::IsGreaterThan,
            ">=" => Operator::IsGreaterThanOrEqual,
            "<" => Operator::IsLessThan,
            "<=" => Operator::IsLessThanOrEqual,
            _ => Operator::Invalid,
        }
    }

    /// Applying `Operator` to the values. Returns `false` if the operator cannot be applied (e.g.,
    /// a value is missing or is not a number for numeric comparison).
    pub fn evaluate(&self, candidate: Option<&str>, comparison: Option<&str>) -> bool {
        match self {
            Self::Exists => candidate.is_some(),
            Self::DoesntExist => candidate.is_none(),

            Self::DoesntEqual => !Self::Equals.evaluate(candidate, comparison),
            Self::DoesntContain => !Self::Contains.evaluate(candidate, comparison),
            Self::DoesntStartWith => !Self::StartsWith.evaluate(candidate, comparison),
            Self::DoesntEndWith => !Self::EndsWith.evaluate(candidate, comparison),
            Self::IsntOneOf => !Self::IsOneOf.evaluate(candidate, comparison),

            Self::Invalid => false,

            _ => self.try_evaluate(candidate, comparison).unwrap_or(false),
        }
    }

    /// Try applying a positive operator, returning `None` if either side is missing or cannot be
    /// interpreted.
    fn try_evaluate(&self, candidate: Option<&str>, comparison: Option<&str>) -> Option<bool> {
        let candidate = candidate?;
        let comparison = comparison?;

        match self {
            Self::Equals => Some(candidate == comparison),
            Self::Contains => Some(candidate.contains(comparison)),
            Self::StartsWith => Some(candidate.starts_with(comparison)),
            Self::EndsWith => Some(candidate.ends_with(comparison)),
            Self::MatchesRegex => {
                let regex = Regex::new(comparison).ok()?;
                Some(regex.is_match(candidate))
            }
            Self::IsOneOf => Some(
                comparison
                    .split('\n')
                    .map(str::trim)
                    .any(|value| value == candidate),
            ),

            Self::IsGreaterThan
            | Self::IsGreaterThanOrEqual
            | Self::IsLessThan
            | Self::IsLessThanOrEqual => {
                let candidate: f64 = candidate.trim().parse().ok()?;
                let comparison: f64 = comparison.trim().parse().ok()?;

                Some(match self {
                    Self::IsGreaterThan => candidate > comparison,
                    Self::IsGreaterThanOrEqual => candidate >= comparison,
                    Self::IsLessThan => candidate < comparison,
                    Self::IsLessThanOrEqual => candidate <= comparison,
                    _ => {
                        // unreachable
                        return None;
                    }
                })
            }

            // Handled in `evaluate()`.
            _ => None,
        }
    }
}

impl From<&str> for Operator {
    fn from(value: &str) -> Self {
        Operator::from_symbol(value)
    }
}

#[cfg(test)]
mod tests {
    use super::Operator;

    #[test]
    fn parses_symbol_table() {
        let table = [
            ("==", Operator::Equals),
            ("!=", Operator::DoesntEqual),
            ("*", Operator::Contains),
            ("!*", Operator::DoesntContain),
            ("^", Operator::StartsWith),
            ("!^", Operator::DoesntStartWith),
            ("$", Operator::EndsWith),
            ("!$", Operator::DoesntEndWith),
            ("regex", Operator::MatchesRegex),
            ("in", Operator::IsOneOf),
            ("not in", Operator::IsntOneOf),
            ("?", Operator::Exists),
            ("!?", Operator::DoesntExist),
            (">", Operator::IsGreaterThan),
            (">=", Operator::IsGreaterThanOrEqual),
            ("<", Operator::IsLessThan),
            ("<=", Operator::IsLessThanOrEqual),
        ];
        for (symbol, operator) in table {
            assert_eq!(Operator::from_symbol(symbol), operator, "symbol {symbol:?}");
        }
    }

    #[test]
    fn unknown_operator_is_always_false() {
        for symbol in ["", "=", "===", "contains", "IN", "~"] {
            let operator = Operator::from_symbol(symbol);
            assert_eq!(operator, Operator::Invalid);
            assert!(!operator.evaluate(Some("a"), Some("a")));
            assert!(!operator.evaluate(None, None));
            assert!(!operator.evaluate(Some("1"), None));
            assert!(!operator.evaluate(None, Some("1")));
        }
    }

    #[test]
    fn equals() {
        assert!(Operator::Equals.evaluate(Some("Home"), Some("Home")));
        assert!(!Operator::Equals.evaluate(Some("Home"), Some("home")));
        assert!(!Operator::Equals.evaluate(None, Some("Home")));
        assert!(Operator::DoesntEqual.evaluate(Some("Settings"), Some("Home")));
        assert!(!Operator::DoesntEqual.evaluate(Some("Home"), Some("Home")));
    }

    #[test]
    fn contains() {
        assert!(Operator::Contains.evaluate(Some("onboarding"), Some("board")));
        assert!(!Operator::Contains.evaluate(Some("onboarding"), Some("xyz")));
        assert!(Operator::DoesntContain.evaluate(Some("onboarding"), Some("xyz")));
        assert!(!Operator::Contains.evaluate(None, Some("board")));
    }

    #[test]
    fn starts_and_ends_with() {
        assert!(Operator::StartsWith.evaluate(Some("Settings"), Some("Set")));
        assert!(!Operator::StartsWith.evaluate(Some("Settings"), Some("ings")));
        assert!(Operator::DoesntStartWith.evaluate(Some("Settings"), Some("ings")));
        assert!(Operator::EndsWith.evaluate(Some("Settings"), Some("ings")));
        assert!(!Operator::EndsWith.evaluate(Some("Settings"), Some("Set")));
        assert!(Operator::DoesntEndWith.evaluate(Some("Settings"), Some("Set")));
    }

    #[test]
    fn matches_regex() {
        assert!(Operator::MatchesRegex.evaluate(Some("test@example.com"), Some("^test.*")));
        assert!(!Operator::MatchesRegex.evaluate(Some("example@test.com"), Some("^test.*")));
        // invalid pattern
        assert!(!Operator::MatchesRegex.evaluate(Some("(("), Some("((")));
    }

    #[test]
    fn is_one_of() {
        let values = Some("alice\nbob\n charlie ");
        assert!(Operator::IsOneOf.evaluate(Some("alice"), values));
        assert!(Operator::IsOneOf.evaluate(Some("charlie"), values));
        assert!(!Operator::IsOneOf.evaluate(Some("dave"), values));
        assert!(!Operator::IsOneOf.evaluate(None, values));
        assert!(Operator::IsntOneOf.evaluate(Some("dave"), values));
        assert!(!Operator::IsntOneOf.evaluate(Some("bob"), values));
    }

    #[test]
    fn exists() {
        assert!(Operator::Exists.evaluate(Some(""), None));
        assert!(!Operator::Exists.evaluate(None, Some("x")));
        assert!(Operator::DoesntExist.evaluate(None, None));
        assert!(!Operator::DoesntExist.evaluate(Some("x"), None));
    }

    #[test]
    fn numeric_comparisons() {
        assert!(Operator::IsGreaterThan.evaluate(Some("19"), Some("18")));
        assert!(!Operator::IsGreaterThan.evaluate(Some("18"), Some("18")));
        assert!(Operator::IsGreaterThanOrEqual.evaluate(Some("18"), Some("18.0")));
        assert!(Operator::IsLessThan.evaluate(Some("1.5"), Some("2")));
        assert!(!Operator::IsLessThan.evaluate(Some("2"), Some("2")));
        assert!(Operator::IsLessThanOrEqual.evaluate(Some("-3"), Some("2")));
    }

    #[test]
    fn numeric_comparison_with_non_numbers_is_false() {
        assert!(!Operator::IsGreaterThan.evaluate(Some("abc"), Some("1")));
        assert!(!Operator::IsLessThan.evaluate(Some("1"), Some("abc")));
        assert!(!Operator::IsGreaterThanOrEqual.evaluate(None, Some("1")));
        assert!(!Operator::IsLessThanOrEqual.evaluate(Some("1"), None));
    }
}
