//! Identifier synthesis from raw source keys.
//!
//! `@attr`, `#text`, `entry-name` and `xs:element` style keys become snake_case
//! field identifiers and PascalCase record names. Both forms are pure functions of
//! the key, so equal keys always give equal names.
use once_cell::sync::Lazy;
use regex::Regex;

/// Attribute / text markers added by the normalizer.
const RESERVED_MARKERS: [char; 2] = ['@', '#'];

/// Used when a key has no alphanumeric content. Both identifier forms derive from
/// it so that a rendered field re-synthesizes the same record name.
const FALLBACK_WORD: &str = "value";

static SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\p{L}\p{N}]+").unwrap());

pub fn clean_key(key: &str) -> String {
    key.chars().filter(|c| !RESERVED_MARKERS.contains(c)).collect()
}

/// Lowercase words of a key. Lowercasing happens before the split: some letters
/// lowercase into combining marks (`İ` → `i\u{307}`), which are separators.
fn words(key: &str) -> Vec<String> {
    let lowered = clean_key(key).to_lowercase();
    SEPARATORS
        .split(&lowered)
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

/// `"@entry-Name"` → `"entry_name"`.
pub fn field_ident(key: &str) -> String {
    let ws = words(key);
    if ws.is_empty() {
        return FALLBACK_WORD.to_string();
    }
    ws.join("_")
}

/// `"@entry-name"` → `"EntryName"`.
pub fn type_ident(key: &str) -> String {
    let ws = words(key);
    if ws.is_empty() {
        return title_case(FALLBACK_WORD);
    }
    ws.iter().map(|w| title_case(w)).collect()
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markers_are_stripped() {
        assert_eq!(clean_key("@name"), "name");
        assert_eq!(clean_key("#text"), "text");
        assert_eq!(field_ident("@name"), "name");
        assert_eq!(field_ident("#text"), "text");
    }

    #[test]
    fn separators_become_underscores() {
        assert_eq!(field_ident("source-zone"), "source_zone");
        assert_eq!(field_ident("Log-Setting.Name"), "log_setting_name");
        assert_eq!(field_ident("xs:element"), "xs_element");
    }

    #[test]
    fn type_names_are_pascal_case() {
        assert_eq!(type_ident("source-zone"), "SourceZone");
        assert_eq!(type_ident("@ip-netmask"), "IpNetmask");
        assert_eq!(type_ident("ENTRY"), "Entry");
        assert_eq!(type_ident("rule2-base"), "Rule2Base");
    }

    #[test]
    fn degenerate_keys_fall_back() {
        assert_eq!(field_ident("#"), "value");
        assert_eq!(type_ident("@-"), "Value");
    }

    #[test]
    fn naming_is_stable_on_its_own_output() {
        for key in ["@ip-netmask", "Log-Setting", "#text", "a__b", "xs:element", "#", "-", "İa", "@Straße-İD"] {
            let field = field_ident(key);
            assert_eq!(field_ident(&field), field);
            assert_eq!(type_ident(&field), type_ident(key));
        }
    }

    #[test]
    fn letters_lowercasing_to_combining_marks_split_once() {
        assert_eq!(field_ident("İa"), "i_a");
        assert_eq!(type_ident("İa"), "IA");
        assert_eq!(type_ident("i_a"), "IA");
    }

    #[test]
    fn distinct_keys_can_collide() {
        // documented: collisions are not resolved
        assert_eq!(field_ident("a-b"), field_ident("a_b"));
    }
}
