//! The inevitable grab-bag of utility functions.

/// Can `c` start a bare identifier?
pub fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

/// Can `c` appear in a bare identifier after the first character?
pub fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// Would our tokenizer read `s` as a single bare word?
pub fn is_bare_ident(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if is_ident_start(c) => chars.all(is_ident_char),
        _ => false,
    }
}

/// Decode the digits of a hexadecimal literal into a number, if it fits.
pub fn hex_value(digits: &str) -> Option<u128> {
    if digits.is_empty() {
        return None;
    }
    u128::from_str_radix(digits, 16).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_idents() {
        assert!(is_bare_ident("a"));
        assert!(is_bare_ident("_x1"));
        assert!(is_bare_ident("LargestTrack"));
        assert!(is_bare_ident("café"));
        assert!(is_bare_ident("a$b"));
        assert!(!is_bare_ident(""));
        assert!(!is_bare_ident("1a"));
        assert!(!is_bare_ident("$a"));
        assert!(!is_bare_ident("a b"));
    }

    #[test]
    fn hex_values() {
        assert_eq!(hex_value("CC"), Some(204));
        assert_eq!(hex_value("ff"), Some(255));
        assert_eq!(hex_value(""), None);
        assert_eq!(hex_value(&"F".repeat(33)), None);
    }
}
