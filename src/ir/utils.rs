//! Naming and literal helpers shared across normalization.

use serde_json::Value;

/// Interface name used for operations without tags.
pub const DEFAULT_INTERFACE: &str = "DefaultApi";

/// Split an identifier into words on separators and case boundaries.
///
/// Any non-alphanumeric character separates words. A new word also starts at
/// an uppercase letter that follows a lowercase letter or digit, and at the
/// last capital of an acronym run (`HTTPServer` -> `HTTP`, `Server`).
pub fn split_words(input: &str) -> Vec<String> {
    let chars: Vec<char> = input.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if c.is_uppercase() && !current.is_empty() {
            let prev = i.checked_sub(1).and_then(|j| chars.get(j)).copied();
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let boundary = match prev {
                Some(p) if p.is_lowercase() || p.is_numeric() => true,
                Some(p) if p.is_uppercase() => next_is_lower,
                _ => false,
            };
            if boundary {
                words.push(std::mem::take(&mut current));
            }
        }

        current.push(c);
    }

    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// Uppercase the first letter and lowercase the rest.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
    }
}

/// Convert to camelCase: `get_user_info`, `get-user-info`, `GetUserInfo` -> `getUserInfo`.
pub fn to_camel_case(input: &str) -> String {
    let mut result = String::new();
    for (i, word) in split_words(input).iter().enumerate() {
        if i == 0 {
            result.push_str(&word.to_lowercase());
        } else {
            result.push_str(&capitalize(word));
        }
    }
    result
}

/// Convert to PascalCase: `user_info`, `user-info` -> `UserInfo`.
pub fn to_pascal_case(input: &str) -> String {
    split_words(input).iter().map(|w| capitalize(w)).collect()
}

/// Interface name for an operation's first tag.
pub fn interface_name(tag: Option<&str>) -> String {
    match tag.map(to_pascal_case) {
        Some(name) if !name.is_empty() => format!("{name}Api"),
        _ => DEFAULT_INTERFACE.to_string(),
    }
}

/// Render a JSON literal as a plain string. `null` renders as absent.
pub fn render_literal(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(_) | Value::Object(_) => Some(value.to_string()),
    }
}

/// Whether a media type key denotes JSON (`application/json`, `*+json`,
/// parameters such as `; charset=utf-8` ignored).
pub fn is_json_media_type(media_type: &str) -> bool {
    let essence = media_type
        .split(';')
        .next()
        .unwrap_or(media_type)
        .trim()
        .to_ascii_lowercase();
    essence == "application/json" || essence.ends_with("+json")
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case_equivalence() {
        assert_eq!(to_camel_case("get_user_info"), "getUserInfo");
        assert_eq!(to_camel_case("get-user-info"), "getUserInfo");
        assert_eq!(to_camel_case("GetUserInfo"), "getUserInfo");
        assert_eq!(to_camel_case("getUserInfo"), "getUserInfo");
    }

    #[test]
    fn test_camel_case_edge_cases() {
        assert_eq!(to_camel_case(""), "");
        assert_eq!(to_camel_case("---"), "");
        assert_eq!(to_camel_case("list"), "list");
        assert_eq!(to_camel_case("HTTPServer"), "httpServer");
        assert_eq!(to_camel_case("getUserID"), "getUserId");
        assert_eq!(to_camel_case("v2 users.list"), "v2UsersList");
        assert_eq!(to_camel_case("SEARCH_TRACKS"), "searchTracks");
    }

    #[test]
    fn test_pascal_case() {
        assert_eq!(to_pascal_case("user_info"), "UserInfo");
        assert_eq!(to_pascal_case("user-info"), "UserInfo");
        assert_eq!(to_pascal_case("userInfo"), "UserInfo");
        assert_eq!(to_pascal_case("User Management"), "UserManagement");
        assert_eq!(to_pascal_case("pets"), "Pets");
    }

    #[test]
    fn test_split_words() {
        assert_eq!(split_words("fooBar_baz"), vec!["foo", "Bar", "baz"]);
        assert_eq!(split_words("item2Id"), vec!["item2", "Id"]);
        assert_eq!(split_words("XMLHttpRequest"), vec!["XML", "Http", "Request"]);
        assert!(split_words("__").is_empty());
    }

    #[test]
    fn test_interface_name() {
        assert_eq!(interface_name(Some("users")), "UsersApi");
        assert_eq!(interface_name(Some("user-profile")), "UserProfileApi");
        assert_eq!(interface_name(Some("  ")), DEFAULT_INTERFACE);
        assert_eq!(interface_name(None), DEFAULT_INTERFACE);
    }

    #[test]
    fn test_render_literal() {
        assert_eq!(render_literal(&serde_json::json!(true)).unwrap(), "true");
        assert_eq!(render_literal(&serde_json::json!(0)).unwrap(), "0");
        assert_eq!(render_literal(&serde_json::json!(1.5)).unwrap(), "1.5");
        assert_eq!(render_literal(&serde_json::json!("asc")).unwrap(), "asc");
        assert_eq!(render_literal(&serde_json::json!(["a"])).unwrap(), r#"["a"]"#);
        assert_eq!(render_literal(&Value::Null), None);
    }

    #[test]
    fn test_is_json_media_type() {
        assert!(is_json_media_type("application/json"));
        assert!(is_json_media_type("application/json; charset=utf-8"));
        assert!(is_json_media_type("application/problem+json"));
        assert!(!is_json_media_type("text/plain"));
        assert!(!is_json_media_type("application/xml"));
    }
}
