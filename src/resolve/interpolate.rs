//! `{token}` placeholder substitution.

use std::collections::HashMap;

/// Characters allowed between the braces of a token.
const fn is_token_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Replace `{token}` markers with values from `replacements`.
///
/// Tokens are made of ASCII letters, digits and `_`. A token with no replacement
/// is left as-is, braces included.
///
/// # Examples
/// ```
/// use std::collections::HashMap;
/// use site_i18n::resolve::interpolate;
///
/// let replacements = HashMap::from([("name", "Ada")]);
/// assert_eq!(interpolate("Hello {name}, {day}", &replacements), "Hello Ada, {day}");
/// ```
#[must_use]
#[allow(clippy::implicit_hasher)]
pub fn interpolate(template: &str, replacements: &HashMap<&str, &str>) -> String {
    if replacements.is_empty() {
        return template.to_string();
    }

    let mut result = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        let (before, tail) = rest.split_at(open);
        result.push_str(before);
        let Some(after_open) = tail.strip_prefix('{') else {
            break;
        };

        let token_len = after_open.find(|c: char| !is_token_char(c)).unwrap_or(after_open.len());
        let (token, after_token) = after_open.split_at(token_len);

        if let Some(after_close) = after_token.strip_prefix('}')
            && !token.is_empty()
        {
            match replacements.get(token) {
                Some(value) => result.push_str(value),
                None => {
                    result.push('{');
                    result.push_str(token);
                    result.push('}');
                }
            }
            rest = after_close;
        } else {
            result.push('{');
            rest = after_open;
        }
    }

    result.push_str(rest);
    result
}
