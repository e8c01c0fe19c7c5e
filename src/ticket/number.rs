// src/ticket/number.rs

//! Browser-style number conversion for the ticket's text elements.
//!
//! Parsing mirrors what a web page's `Number(text)` does with a string, with one
//! difference: blank text is *not* zero here, it is not-a-number. Rendering mirrors the
//! page's number-to-string rule, so `25.0` shows as `25` and a failed parse shows as `NaN`.

use std::fmt;
use std::ops::Mul;
use std::str::FromStr;

/// A parsed number, or the not-a-number indicator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Numeric {
    Value(f64),
    NotANumber,
}

impl Numeric {
    pub fn is_nan(&self) -> bool {
        matches!(self, Numeric::NotANumber)
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Numeric::Value(v) => Some(*v),
            Numeric::NotANumber => None,
        }
    }
}

// Keeps a raw f64 NaN from ever living inside `Value`.
impl From<f64> for Numeric {
    fn from(v: f64) -> Self {
        if v.is_nan() {
            Numeric::NotANumber
        } else {
            Numeric::Value(v)
        }
    }
}

impl Mul for Numeric {
    type Output = Numeric;

    fn mul(self, rhs: Numeric) -> Numeric {
        match (self, rhs) {
            (Numeric::Value(a), Numeric::Value(b)) => Numeric::from(a * b),
            _ => Numeric::NotANumber,
        }
    }
}

impl FromStr for Numeric {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(parse_number(s))
    }
}

impl fmt::Display for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Numeric::NotANumber => f.write_str("NaN"),
            Numeric::Value(v) => f.write_str(&format_number(*v)),
        }
    }
}

// White space and line terminators as the page sees them. Not `char::is_whitespace`:
// that one also takes U+0085, which the page does not.
fn is_page_whitespace(c: char) -> bool {
    matches!(
        c,
        '\t' | '\u{b}' | '\u{c}' | ' ' | '\u{a0}' | '\u{feff}'
            | '\n' | '\r' | '\u{2028}' | '\u{2029}'
            | '\u{1680}' | '\u{2000}'..='\u{200a}' | '\u{202f}' | '\u{205f}' | '\u{3000}'
    )
}

/// Converts element text into a number. Never fails: anything unparseable is `NotANumber`.
pub fn parse_number(text: &str) -> Numeric {
    let s = text.trim_matches(is_page_whitespace);
    if s.is_empty() {
        return Numeric::NotANumber;
    }

    match s {
        "Infinity" | "+Infinity" => return Numeric::Value(f64::INFINITY),
        "-Infinity" => return Numeric::Value(f64::NEG_INFINITY),
        _ => {}
    }

    if let Some(v) = parse_radix_literal(s) {
        return v;
    }

    if !is_decimal_literal(s) {
        return Numeric::NotANumber;
    }
    // The grammar check above rejects everything Rust's parser would read differently
    // ("inf", "nan", ...), so what's left parses the same way.
    s.parse::<f64>().map(Numeric::from).unwrap_or(Numeric::NotANumber)
}

// `0x1F`, `0o17`, `0b101`. No sign, no fraction, at least one digit.
fn parse_radix_literal(s: &str) -> Option<Numeric> {
    let bytes = s.as_bytes();
    if bytes.len() < 2 || bytes[0] != b'0' {
        return None;
    }
    let radix = match bytes[1] {
        b'x' | b'X' => 16,
        b'o' | b'O' => 8,
        b'b' | b'B' => 2,
        _ => return None,
    };
    let digits = &s[2..];
    if digits.is_empty() {
        return Some(Numeric::NotANumber);
    }
    // Accumulate exactly and round once at the end.
    let mut exact: Option<u128> = Some(0);
    let mut approx = 0.0_f64;
    for c in digits.chars() {
        let d = match c.to_digit(radix) {
            Some(d) => d,
            None => return Some(Numeric::NotANumber),
        };
        exact = exact
            .and_then(|v| v.checked_mul(radix as u128))
            .and_then(|v| v.checked_add(d as u128));
        approx = approx * radix as f64 + d as f64;
    }
    // Past 128 bits only the rounded running value is left.
    Some(Numeric::Value(exact.map_or(approx, |v| v as f64)))
}

// [+-]? (digits [. digits?] | . digits) ([eE] [+-]? digits)?
fn is_decimal_literal(s: &str) -> bool {
    let bytes = s.as_bytes();
    let mut i = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        i += 1;
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let int_digits = i - int_start;

    let mut frac_digits = 0;
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        frac_digits = i - frac_start;
    }
    if int_digits == 0 && frac_digits == 0 {
        return false;
    }

    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        i += 1;
        if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
            i += 1;
        }
        let exp_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return false;
        }
    }

    i == bytes.len()
}

/// Renders a number the way the page would print it.
pub fn format_number(v: f64) -> String {
    if v.is_nan() {
        return "NaN".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if v == 0.0 {
        // covers -0 as well
        return "0".to_string();
    }

    // `{:e}` gives the shortest round-trip digits, e.g. "2.5e1" or "1.2345e-7".
    let sci = format!("{:e}", v.abs());
    let (mantissa, exp) = match sci.split_once('e') {
        Some(parts) => parts,
        None => (sci.as_str(), "0"),
    };
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let exp: i32 = exp.parse().unwrap_or(0);

    let k = digits.len() as i32;
    // Position of the decimal point relative to the first digit.
    let n = exp + 1;

    let mut out = String::new();
    if v < 0.0 {
        out.push('-');
    }

    if k <= n && n <= 21 {
        out.push_str(&digits);
        out.extend(std::iter::repeat('0').take((n - k) as usize));
    } else if 0 < n && n <= 21 {
        out.push_str(&digits[..n as usize]);
        out.push('.');
        out.push_str(&digits[n as usize..]);
    } else if -6 < n && n <= 0 {
        out.push_str("0.");
        out.extend(std::iter::repeat('0').take((-n) as usize));
        out.push_str(&digits);
    } else {
        out.push_str(&digits[..1]);
        if k > 1 {
            out.push('.');
            out.push_str(&digits[1..]);
        }
        out.push('e');
        out.push(if n - 1 >= 0 { '+' } else { '-' });
        out.push_str(&(n - 1).abs().to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_decimals() {
        assert_eq!(parse_number("10"), Numeric::Value(10.0));
        assert_eq!(parse_number("2.5"), Numeric::Value(2.5));
        assert_eq!(parse_number("-3"), Numeric::Value(-3.0));
        assert_eq!(parse_number("+.5"), Numeric::Value(0.5));
        assert_eq!(parse_number("5."), Numeric::Value(5.0));
        assert_eq!(parse_number("1e3"), Numeric::Value(1000.0));
        assert_eq!(parse_number("1E-2"), Numeric::Value(0.01));
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert_eq!(parse_number("  42\n"), Numeric::Value(42.0));
        assert_eq!(parse_number("\u{feff}7\t"), Numeric::Value(7.0));
    }

    #[test]
    fn blank_text_is_not_a_number() {
        assert!(parse_number("").is_nan());
        assert!(parse_number("   ").is_nan());
    }

    #[test]
    fn garbage_is_not_a_number() {
        for text in ["abc", "12abc", "1_000", "1,000", "--1", ".", "e5", "1e", "inf", "nan", "NaN", "-0x10", "0x"] {
            assert!(parse_number(text).is_nan(), "{text:?} should not parse");
        }
    }

    #[test]
    fn infinity_and_radix_literals() {
        assert_eq!(parse_number("Infinity"), Numeric::Value(f64::INFINITY));
        assert_eq!(parse_number("-Infinity"), Numeric::Value(f64::NEG_INFINITY));
        assert_eq!(parse_number("0x1F"), Numeric::Value(31.0));
        assert_eq!(parse_number("0o17"), Numeric::Value(15.0));
        assert_eq!(parse_number("0B101"), Numeric::Value(5.0));
        assert!(parse_number("0b102").is_nan());
    }

    #[test]
    fn large_hex_rounds_once() {
        // Rounding digit by digit would land on 2^60 here.
        assert_eq!(parse_number("0x1000000000000081"), Numeric::Value(0x1000000000000081u64 as f64));
        assert_eq!(parse_number("0xFFFFFFFFFFFFFFFF"), Numeric::Value(18446744073709551616.0));
    }

    #[test]
    fn only_page_whitespace_is_trimmed() {
        assert_eq!(parse_number("\u{2003}5\u{3000}"), Numeric::Value(5.0));
        assert_eq!(parse_number("\u{2028}\u{b}8\u{c}"), Numeric::Value(8.0));
        assert!(parse_number("\u{85}7").is_nan(), "NEL is not white space to the page.");
    }

    #[test]
    fn nan_is_sticky_through_multiplication() {
        assert!((Numeric::NotANumber * Numeric::Value(5.0)).is_nan());
        assert!((Numeric::Value(3.0) * Numeric::NotANumber).is_nan());
        // Infinity * 0 is NaN in IEEE arithmetic
        assert!((Numeric::Value(f64::INFINITY) * Numeric::Value(0.0)).is_nan());
        assert_eq!(Numeric::Value(4.0) * Numeric::Value(2.5), Numeric::Value(10.0));
    }

    #[test]
    fn formats_like_the_page() {
        assert_eq!(format_number(25.0), "25");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(format_number(123456.789), "123456.789");
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(1.5e21), "1.5e+21");
        assert_eq!(format_number(1e20), "100000000000000000000");
        assert_eq!(format_number(0.000001), "0.000001");
        assert_eq!(format_number(1e-7), "1e-7");
        assert_eq!(format_number(-1.25e-9), "-1.25e-9");
        assert_eq!(format_number(f64::INFINITY), "Infinity");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(Numeric::NotANumber.to_string(), "NaN");
    }
}
