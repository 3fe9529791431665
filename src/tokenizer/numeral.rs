//! English number words.
//!
//! A numeral is a run of number words such as `two hundred forty one`. The
//! tokenizer yields one [`Numeral`] per word; [`compose`] folds a run into its
//! integer value and rejects sequences no speaker would say (`one two`).

use strum::IntoEnumIterator;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, strum::EnumString, strum::Display, strum::EnumIter, strum::AsRefStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum Numeral {
    Zero,
    One,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Eleven,
    Twelve,
    Thirteen,
    Fourteen,
    Fifteen,
    Sixteen,
    Seventeen,
    Eighteen,
    Nineteen,
    Twenty,
    Thirty,
    Forty,
    Fifty,
    Sixty,
    Seventy,
    Eighty,
    Ninety,
    Hundred,
    Thousand,
    Million,
    Billion,
    Trillion,
}

/// How a number word combines with its neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumeralKind {
    /// zero to nine
    Unit(i64),
    /// ten to nineteen
    Teen(i64),
    /// twenty, thirty, ... ninety
    Tens(i64),
    Hundred,
    /// thousand and above
    Scale(i64),
}

impl Numeral {
    pub fn lookup(word: &str) -> Option<Self> {
        let lowered = word.to_lowercase();
        Numeral::iter().find(|n| n.as_ref() == lowered)
    }

    pub fn kind(&self) -> NumeralKind {
        use Numeral::*;
        match self {
            Zero => NumeralKind::Unit(0),
            One => NumeralKind::Unit(1),
            Two => NumeralKind::Unit(2),
            Three => NumeralKind::Unit(3),
            Four => NumeralKind::Unit(4),
            Five => NumeralKind::Unit(5),
            Six => NumeralKind::Unit(6),
            Seven => NumeralKind::Unit(7),
            Eight => NumeralKind::Unit(8),
            Nine => NumeralKind::Unit(9),
            Ten => NumeralKind::Teen(10),
            Eleven => NumeralKind::Teen(11),
            Twelve => NumeralKind::Teen(12),
            Thirteen => NumeralKind::Teen(13),
            Fourteen => NumeralKind::Teen(14),
            Fifteen => NumeralKind::Teen(15),
            Sixteen => NumeralKind::Teen(16),
            Seventeen => NumeralKind::Teen(17),
            Eighteen => NumeralKind::Teen(18),
            Nineteen => NumeralKind::Teen(19),
            Twenty => NumeralKind::Tens(20),
            Thirty => NumeralKind::Tens(30),
            Forty => NumeralKind::Tens(40),
            Fifty => NumeralKind::Tens(50),
            Sixty => NumeralKind::Tens(60),
            Seventy => NumeralKind::Tens(70),
            Eighty => NumeralKind::Tens(80),
            Ninety => NumeralKind::Tens(90),
            Hundred => NumeralKind::Hundred,
            Thousand => NumeralKind::Scale(1_000),
            Million => NumeralKind::Scale(1_000_000),
            Billion => NumeralKind::Scale(1_000_000_000),
            Trillion => NumeralKind::Scale(1_000_000_000_000),
        }
    }

    /// The single digit this word names, for the digits after `point`.
    pub fn digit(&self) -> Option<u32> {
        match self.kind() {
            NumeralKind::Unit(v) => Some(v as u32),
            _ => None,
        }
    }
}

/// Folds a run of number words into an integer.
///
/// Returns `None` for an empty run, for word orders that do not form a
/// number, and on overflow.
pub fn compose(words: &[Numeral]) -> Option<i64> {
    let mut total: i64 = 0;
    let mut group: i64 = 0;
    let mut last: Option<NumeralKind> = None;

    if words.is_empty() {
        return None;
    }

    for word in words {
        let kind = word.kind();
        match kind {
            NumeralKind::Unit(v) => {
                if matches!(last, Some(NumeralKind::Unit(_)) | Some(NumeralKind::Teen(_))) {
                    return None;
                }
                group = group.checked_add(v)?;
            }
            NumeralKind::Teen(v) | NumeralKind::Tens(v) => {
                if matches!(
                    last,
                    Some(NumeralKind::Unit(_)) | Some(NumeralKind::Teen(_)) | Some(NumeralKind::Tens(_))
                ) {
                    return None;
                }
                group = group.checked_add(v)?;
            }
            NumeralKind::Hundred => {
                if matches!(last, Some(NumeralKind::Hundred)) {
                    return None;
                }
                let base = if group == 0 { 1 } else { group };
                group = base.checked_mul(100)?;
            }
            NumeralKind::Scale(scale) => {
                if matches!(last, Some(NumeralKind::Scale(_))) {
                    return None;
                }
                let base = if group == 0 { 1 } else { group };
                total = total.checked_add(base.checked_mul(scale)?)?;
                group = 0;
            }
        }
        last = Some(kind);
    }

    total.checked_add(group)
}

#[cfg(test)]
mod tests {
    use super::Numeral::*;
    use super::*;

    #[test]
    fn test_compose_simple() {
        assert_eq!(compose(&[Zero]), Some(0));
        assert_eq!(compose(&[Seventeen]), Some(17));
        assert_eq!(compose(&[Twenty, Three]), Some(23));
    }

    #[test]
    fn test_compose_scales() {
        assert_eq!(compose(&[Two, Hundred, Forty, One]), Some(241));
        assert_eq!(compose(&[Hundred]), Some(100));
        assert_eq!(
            compose(&[Three, Million, Five, Hundred, Thousand, Twelve]),
            Some(3_500_012)
        );
        assert_eq!(compose(&[Nineteen, Hundred, Eighty, Four]), Some(1984));
    }

    #[test]
    fn test_compose_rejects_nonsense() {
        assert_eq!(compose(&[]), None);
        assert_eq!(compose(&[One, Two]), None);
        assert_eq!(compose(&[Twenty, Thirty]), None);
        assert_eq!(compose(&[Three, Twenty]), None);
        assert_eq!(compose(&[Thousand, Million]), None);
    }

    #[test]
    fn test_lookup() {
        assert_eq!(Numeral::lookup("Twelve"), Some(Twelve));
        assert_eq!(Numeral::lookup("dozen"), None);
        assert_eq!(Seven.digit(), Some(7));
        assert_eq!(Seventy.digit(), None);
    }
}
