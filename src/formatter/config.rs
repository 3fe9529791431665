use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormatterConfig {
    /// Largest denominator tried when spelling a float as a fraction.
    #[serde(default = "default_max_denominator")]
    pub max_denominator: u32,
    /// Digits spelled after "point" when no fraction fits.
    #[serde(default = "default_max_decimal_digits")]
    pub max_decimal_digits: usize,
}

fn default_max_denominator() -> u32 {
    10
}

fn default_max_decimal_digits() -> usize {
    6
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            max_denominator: default_max_denominator(),
            max_decimal_digits: default_max_decimal_digits(),
        }
    }
}
