//! Numbers as English words.

use super::config::FormatterConfig;

const ONES: [&str; 20] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen",
    "nineteen",
];

const TENS: [&str; 10] = [
    "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];

const SCALES: [(u64, &str); 6] = [
    (1_000_000_000_000_000_000, "quintillion"),
    (1_000_000_000_000_000, "quadrillion"),
    (1_000_000_000_000, "trillion"),
    (1_000_000_000, "billion"),
    (1_000_000, "million"),
    (1_000, "thousand"),
];

/// `241` becomes `two hundred forty one`, `-3` becomes `negative three`.
pub fn integer_to_words(n: i64) -> String {
    if n < 0 {
        return format!("negative {}", unsigned_to_words(n.unsigned_abs()));
    }
    unsigned_to_words(n as u64)
}

fn unsigned_to_words(n: u64) -> String {
    if n == 0 {
        return ONES[0].to_string();
    }

    let mut parts = Vec::new();
    let mut rest = n;
    for (scale, word) in SCALES {
        if rest >= scale {
            parts.push(format!("{} {}", below_thousand(rest / scale), word));
            rest %= scale;
        }
    }
    if rest > 0 {
        parts.push(below_thousand(rest));
    }
    parts.join(" ")
}

// 1..=999
fn below_thousand(n: u64) -> String {
    let mut parts = Vec::new();
    if n >= 100 {
        parts.push(format!("{} hundred", ONES[(n / 100) as usize]));
    }
    let rest = (n % 100) as usize;
    if rest >= 20 {
        parts.push(TENS[rest / 10].to_string());
        if rest % 10 != 0 {
            parts.push(ONES[rest % 10].to_string());
        }
    } else if rest > 0 {
        parts.push(ONES[rest].to_string());
    }
    parts.join(" ")
}

/// Spells a float.
///
/// Whole numbers are spelled as integers. Otherwise the smallest fitting
/// denominator up to `max_denominator` is used (`two and a half`, `two
/// thirds`), and failing that the digits after `point`.
pub fn float_to_words(x: f64, config: &FormatterConfig) -> String {
    if x.is_nan() {
        return "not a number".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "infinity" } else { "negative infinity" }.to_string();
    }
    if x < 0.0 {
        return format!("negative {}", float_to_words(-x, config));
    }
    if x.fract() == 0.0 && x < 1e18 {
        return unsigned_to_words(x as u64);
    }
    fraction_words(x, config.max_denominator)
        .unwrap_or_else(|| decimal_words(x, config.max_decimal_digits))
}

fn fraction_words(x: f64, max_denominator: u32) -> Option<String> {
    let whole = x.trunc();
    if whole >= 1e18 {
        return None;
    }
    let fraction = x - whole;

    let (numerator, denominator) = (2..=max_denominator).find_map(|d| {
        let n = (fraction * d as f64).round();
        let fits = n >= 1.0 && n < d as f64 && (fraction - n / d as f64).abs() < 1e-9;
        fits.then_some((n as u64, d))
    })?;

    let name = denominator_name(denominator, numerator > 1);
    let whole = whole as u64;
    Some(if whole == 0 {
        format!("{} {}", unsigned_to_words(numerator), name)
    } else if numerator == 1 {
        let article = if name.starts_with(['a', 'e', 'i', 'o', 'u']) {
            "an"
        } else {
            "a"
        };
        format!("{} and {} {}", unsigned_to_words(whole), article, name)
    } else {
        format!(
            "{} and {} {}",
            unsigned_to_words(whole),
            unsigned_to_words(numerator),
            name
        )
    })
}

/// `half`, `third`, `quarter`, `fifth`, ... and their plurals.
fn denominator_name(denominator: u32, plural: bool) -> String {
    match (denominator, plural) {
        (2, false) => return "half".to_string(),
        (2, true) => return "halves".to_string(),
        (4, false) => return "quarter".to_string(),
        (4, true) => return "quarters".to_string(),
        _ => {}
    }

    let cardinal = unsigned_to_words(denominator as u64);
    let (head, last) = match cardinal.rsplit_once(' ') {
        Some((head, last)) => (format!("{} ", head), last.to_string()),
        None => (String::new(), cardinal.clone()),
    };
    let ordinal = match last.as_str() {
        "one" => "first".to_string(),
        "two" => "second".to_string(),
        "three" => "third".to_string(),
        "five" => "fifth".to_string(),
        "eight" => "eighth".to_string(),
        "nine" => "ninth".to_string(),
        "twelve" => "twelfth".to_string(),
        word if word.ends_with('y') => format!("{}ieth", &word[..word.len() - 1]),
        word => format!("{}th", word),
    };
    let suffix = if plural { "s" } else { "" };
    format!("{}{}{}", head, ordinal, suffix)
}

fn decimal_words(x: f64, digits: usize) -> String {
    let text = format!("{:.*}", digits, x);
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), ""));
    let whole = whole
        .parse::<u64>()
        .map(unsigned_to_words)
        .unwrap_or_else(|_| whole.to_string());
    let fraction = fraction.trim_end_matches('0');
    if fraction.is_empty() {
        return whole;
    }

    let spelled: Vec<&str> = fraction
        .chars()
        .filter_map(|c| c.to_digit(10))
        .map(|d| ONES[d as usize])
        .collect();
    format!("{} point {}", whole, spelled.join(" "))
}
