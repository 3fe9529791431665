use strum::IntoEnumIterator;

/// Reserved words of the canonical command phrasing.
///
/// None of these can be used as a remembered name.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, strum::EnumString, strum::Display, strum::EnumIter, strum::AsRefStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum Keyword {
    // commands
    Remember,
    As,
    Of,
    Tell,
    Me,
    About,
    Clear,
    Remind,
    More,
    // control
    For,
    In,
    To,
    Step,
    If,
    Then,
    Else,
    // comparison
    Is,
    Not,
    Greater,
    Less,
    Than,
    At,
    Least,
    Most,
    // arithmetic
    Plus,
    Minus,
    Times,
    Divided,
    By,
    Modulo,
    Negative,
    // values
    List,
    And,
    True,
    False,
    Point,
}

impl Keyword {
    /// Looks a word up case-insensitively.
    pub fn lookup(word: &str) -> Option<Self> {
        let lowered = word.to_lowercase();
        Keyword::iter().find(|k| k.as_ref() == lowered)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_all_keywords_round_trip() {
        for keyword in Keyword::iter() {
            let text = keyword.to_string();
            assert_eq!(Keyword::from_str(&text).unwrap(), keyword);
        }
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(Keyword::lookup("Remember"), Some(Keyword::Remember));
        assert_eq!(Keyword::lookup("MODULO"), Some(Keyword::Modulo));
        assert_eq!(Keyword::lookup("evens"), None);
    }
}
