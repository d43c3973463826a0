//! Display name sanitizing.

/// Prefix of the hex alias assigned to names with unprintable characters.
pub const ALIAS_PREFIX: &str = "Player_";

/// Whether `name` is already a hex alias.
pub fn is_alias(name: &str) -> bool {
    name.strip_prefix(ALIAS_PREFIX).is_some_and(|hex| {
        !hex.is_empty() && hex.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
    })
}

/// Return `name` unchanged if it is an alias or fully printable, otherwise
/// replace it with `Player_` followed by each code point as 4+ hex digits.
pub fn sanitize(name: &str) -> String {
    if is_alias(name) || name.chars().all(is_printable) {
        return name.to_string();
    }

    let mut alias = String::with_capacity(ALIAS_PREFIX.len() + name.len() * 4);
    alias.push_str(ALIAS_PREFIX);
    for c in name.chars() {
        alias.push_str(&format!("{:04x}", c as u32));
    }
    alias
}

fn is_printable(c: char) -> bool {
    c == ' ' || !(c.is_control() || c.is_whitespace())
}
