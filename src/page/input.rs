use crate::page::Coordinate;

/// A text field whose value is read when the send button is clicked.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextInput {
    id: String,
    value: String,
}

impl TextInput {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            value: String::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub fn parse(&self) -> Coordinate {
        parse_int(&self.value)
    }
}

/// Integer parsing with `parseInt` prefix rules and no explicit radix.
///
/// Leading whitespace and one sign are skipped, `0x`/`0X` switches to base 16,
/// and the longest run of digits is taken. No digits yields NaN. The result is
/// a double, so long runs round the way `parseInt` rounds them.
pub fn parse_int(text: &str) -> Coordinate {
    let trimmed = text.trim_start_matches(is_js_whitespace);

    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let (radix, digits) = match unsigned.get(..2) {
        Some("0x") | Some("0X") => (16, &unsigned[2..]),
        _ => (10, unsigned),
    };

    let end = digits
        .find(|c: char| !c.is_digit(radix))
        .unwrap_or(digits.len());
    let run = &digits[..end];
    if run.is_empty() {
        return Coordinate::NaN;
    }

    // Decimal runs go through the correctly rounded float parser.
    let magnitude = if radix == 10 {
        run.parse::<f64>().unwrap_or(f64::INFINITY)
    } else {
        run.chars()
            .filter_map(|c| c.to_digit(radix))
            .fold(0.0, |acc, digit| acc * f64::from(radix) + f64::from(digit))
    };

    Coordinate::Num(if negative { -magnitude } else { magnitude })
}

/// ECMAScript WhiteSpace and LineTerminator code points.
fn is_js_whitespace(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\u{b}' | '\u{c}' | '\r' | ' ' | '\u{a0}' | '\u{1680}'
            | '\u{2000}'..='\u{200a}'
            | '\u{2028}' | '\u{2029}' | '\u{202f}' | '\u{205f}' | '\u{3000}' | '\u{feff}'
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::OutboundPoint;

    fn num(value: f64) -> Coordinate {
        Coordinate::Num(value)
    }

    #[test]
    fn test_parse_int_plain() {
        assert_eq!(parse_int("3"), num(3.0));
        assert_eq!(parse_int("-42"), num(-42.0));
        assert_eq!(parse_int("+7"), num(7.0));
        assert_eq!(parse_int("007"), num(7.0));
    }

    #[test]
    fn test_parse_int_prefix() {
        assert_eq!(parse_int("  12abc"), num(12.0));
        assert_eq!(parse_int("3.9"), num(3.0));
        assert_eq!(parse_int("\t\n5 6"), num(5.0));
        assert_eq!(parse_int("1e3"), num(1.0));
        assert_eq!(parse_int("\u{a0}\u{3000}\u{2028}\u{feff}8"), num(8.0));
    }

    #[test]
    fn test_parse_int_hex() {
        assert_eq!(parse_int("0x1A"), num(26.0));
        assert_eq!(parse_int("-0XfF"), num(-255.0));
        assert_eq!(parse_int("0x"), Coordinate::NaN);
        assert_eq!(parse_int("0b1"), num(0.0));
    }

    #[test]
    fn test_parse_int_nan() {
        assert_eq!(parse_int("abc"), Coordinate::NaN);
        assert_eq!(parse_int(""), Coordinate::NaN);
        assert_eq!(parse_int("   "), Coordinate::NaN);
        assert_eq!(parse_int("-"), Coordinate::NaN);
        assert_eq!(parse_int("--1"), Coordinate::NaN);
        assert_eq!(parse_int("Infinity"), Coordinate::NaN);
    }

    #[test]
    fn test_parse_int_skips_only_js_whitespace() {
        // NEL and other Unicode whitespace outside the ECMAScript set stop the scan.
        assert_eq!(parse_int("\u{85}5"), Coordinate::NaN);
        assert_eq!(parse_int("\u{180e}5"), Coordinate::NaN);
    }

    #[test]
    fn test_parse_int_beyond_i64_keeps_value() {
        assert_eq!(parse_int("99999999999999999999"), num(1e20));
        assert_eq!(parse_int("-99999999999999999999"), num(-1e20));

        let point = OutboundPoint::new(parse_int("99999999999999999999"), parse_int("1"));
        assert_eq!(point.to_json().unwrap(), r#"{"x":100000000000000000000,"y":1}"#);
    }

    #[test]
    fn test_text_input() {
        let mut input = TextInput::new("x-input");
        assert_eq!(input.parse(), Coordinate::NaN);
        input.set_value("  8");
        assert_eq!(input.value(), "  8");
        assert_eq!(input.parse(), num(8.0));
    }
}
