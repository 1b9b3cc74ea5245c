// Small text and collection helpers used by commands and the error reporter.
//
// Everything here is a pure function. The `StrExt` and `SliceExt` traits are
// thin method-call wrappers so callers can write `"#ff0000".hex_to_number()`
// when that reads better; they add no behavior of their own.

use rand::seq::SliceRandom;
use std::fmt::Display;

const PERSIAN_DIGITS: [char; 10] = ['۰', '۱', '۲', '۳', '۴', '۵', '۶', '۷', '۸', '۹'];
const PERSIAN_GROUP_SEPARATOR: char = '٬';

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Lower-cases the text, then upper-cases the first character of every word.
///
/// A word starts wherever a word character (alphanumeric or `_`) follows a
/// non-word character or the start of the string, so `"hello-WORLD"` becomes
/// `"Hello-World"`.
pub fn to_capitalize(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut previous_is_word = false;

    for c in text.chars() {
        let current_is_word = is_word_char(c);
        if current_is_word && !previous_is_word {
            result.extend(c.to_uppercase());
        } else {
            result.extend(c.to_lowercase());
        }
        previous_is_word = current_is_word;
    }

    result
}

/// Replaces every `{key}` placeholder with its value.
///
/// Placeholders without a matching key are left untouched.
pub fn replace_values<K, V>(template: &str, values: impl IntoIterator<Item = (K, V)>) -> String
where
    K: AsRef<str>,
    V: Display,
{
    values
        .into_iter()
        .fold(template.to_string(), |text, (key, value)| {
            text.replace(&format!("{{{}}}", key.as_ref()), &value.to_string())
        })
}

/// Parses a colour-style hex string (`"#FF0000"`, `"ff0000"`, `"0xff"`).
///
/// Mirrors lenient integer parsing: surrounding whitespace and a leading sign
/// are accepted, parsing stops at the first non-hex character, and `None` is
/// returned when no digit could be read at all.
pub fn hex_to_number(text: &str) -> Option<i64> {
    let cleaned = text.replacen('#', "", 1);
    let mut rest = cleaned.trim();

    let negative = match rest.chars().next() {
        Some('-') => {
            rest = &rest[1..];
            true
        }
        Some('+') => {
            rest = &rest[1..];
            false
        }
        _ => false,
    };

    if rest
        .get(..2)
        .is_some_and(|marker| marker.eq_ignore_ascii_case("0x"))
    {
        rest = &rest[2..];
    }

    let digits: String = rest.chars().take_while(|c| c.is_ascii_hexdigit()).collect();
    if digits.is_empty() {
        return None;
    }

    let value = digits
        .chars()
        .filter_map(|c| c.to_digit(16))
        .fold(0i64, |acc, digit| {
            acc.saturating_mul(16).saturating_add(i64::from(digit))
        });

    Some(if negative { -value } else { value })
}

/// Picks one element uniformly at random. `None` for an empty slice.
pub fn random_element<T>(items: &[T]) -> Option<&T> {
    items.choose(&mut rand::thread_rng())
}

/// Splits a slice into consecutive groups of `size`; the last group may be
/// shorter. A `size` of zero yields no groups.
pub fn chunk<T: Clone>(items: &[T], size: usize) -> Vec<Vec<T>> {
    if size == 0 {
        return Vec::new();
    }

    items.chunks(size).map(<[T]>::to_vec).collect()
}

/// Renders every run of ASCII digits with Persian numerals and `٬` grouping,
/// e.g. `"1234567 users"` becomes `"۱٬۲۳۴٬۵۶۷ users"`.
pub fn to_persian_digits(text: &str) -> String {
    let mut result = String::with_capacity(text.len() * 2);
    let mut digits = String::new();

    for c in text.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
            continue;
        }
        flush_persian_digits(&mut digits, &mut result);
        result.push(c);
    }
    flush_persian_digits(&mut digits, &mut result);

    result
}

fn flush_persian_digits(digits: &mut String, out: &mut String) {
    // Leading zeros are dropped the same way a number formatter would.
    let trimmed = digits.trim_start_matches('0');
    let significant = if trimmed.is_empty() && !digits.is_empty() {
        "0"
    } else {
        trimmed
    };

    let len = significant.len();
    for (index, c) in significant.chars().enumerate() {
        if index > 0 && (len - index) % 3 == 0 {
            out.push(PERSIAN_GROUP_SEPARATOR);
        }
        if let Some(value) = c.to_digit(10) {
            out.push(PERSIAN_DIGITS[value as usize]);
        }
    }

    digits.clear();
}

/// Method-call sugar for the string helpers.
pub trait StrExt {
    fn to_capitalize(&self) -> String;
    fn replace_values<K, V>(&self, values: impl IntoIterator<Item = (K, V)>) -> String
    where
        K: AsRef<str>,
        V: Display;
    fn hex_to_number(&self) -> Option<i64>;
    fn to_persian_digits(&self) -> String;
}

impl StrExt for str {
    fn to_capitalize(&self) -> String {
        to_capitalize(self)
    }

    fn replace_values<K, V>(&self, values: impl IntoIterator<Item = (K, V)>) -> String
    where
        K: AsRef<str>,
        V: Display,
    {
        replace_values(self, values)
    }

    fn hex_to_number(&self) -> Option<i64> {
        hex_to_number(self)
    }

    fn to_persian_digits(&self) -> String {
        to_persian_digits(self)
    }
}

/// Method-call sugar for the slice helpers.
pub trait SliceExt<T> {
    fn random_element(&self) -> Option<&T>;
    fn chunk(&self, size: usize) -> Vec<Vec<T>>
    where
        T: Clone;
}

impl<T> SliceExt<T> for [T] {
    fn random_element(&self) -> Option<&T> {
        random_element(self)
    }

    fn chunk(&self, size: usize) -> Vec<Vec<T>>
    where
        T: Clone,
    {
        chunk(self, size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn capitalizes_each_word() {
        assert_eq!(to_capitalize("hello wORLD"), "Hello World");
        assert_eq!(to_capitalize("hello-world foo_bar"), "Hello-World Foo_bar");
        assert_eq!(to_capitalize(""), "");
    }

    #[test]
    fn replaces_every_placeholder() {
        let values = HashMap::from([("a", "x"), ("b", "y")]);
        assert_eq!(replace_values("{a}-{b}", values), "x-y");

        assert_eq!(
            replace_values("{n} and {n} again", [("n", 3)]),
            "3 and 3 again"
        );
    }

    #[test]
    fn unknown_placeholders_are_left_alone() {
        assert_eq!(replace_values("{missing}", [("a", "x")]), "{missing}");
    }

    #[test]
    fn parses_colour_hex() {
        assert_eq!("#FF0000".hex_to_number(), Some(16_711_680));
        assert_eq!(hex_to_number("ff"), Some(255));
        assert_eq!(hex_to_number("0x1A"), Some(26));
        assert_eq!(hex_to_number("-a"), Some(-10));
    }

    #[test]
    fn malformed_hex_stops_at_first_bad_digit() {
        assert_eq!(hex_to_number("#FFzz"), Some(255));
        assert_eq!(hex_to_number("#zz"), None);
        assert_eq!(hex_to_number(""), None);
        assert_eq!(hex_to_number("#€1"), None);
        assert_eq!(hex_to_number("0é"), Some(0));
        assert_eq!(hex_to_number("Ωx1"), None);
    }

    #[test]
    fn chunks_into_fixed_groups() {
        assert_eq!(
            [1, 2, 3, 4, 5].chunk(2),
            vec![vec![1, 2], vec![3, 4], vec![5]]
        );
        assert!(chunk(&[1, 2, 3], 0).is_empty());
        assert!(chunk::<u8>(&[], 3).is_empty());
    }

    #[test]
    fn random_element_comes_from_the_slice() {
        let items = ["a", "b", "c"];
        for _ in 0..20 {
            let picked = items.random_element().unwrap();
            assert!(items.contains(picked));
        }

        let empty: [u8; 0] = [];
        assert!(random_element(&empty).is_none());
    }

    #[test]
    fn renders_persian_digits_with_grouping() {
        assert_eq!(to_persian_digits("1234567 users"), "۱٬۲۳۴٬۵۶۷ users");
        assert_eq!(to_persian_digits("v0 and 12"), "v۰ and ۱۲");
        assert_eq!(to_persian_digits("no digits"), "no digits");
    }
}
