use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Matches `${NAME}` where NAME is an uppercase environment-style token.
static VAR_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([A-Z0-9_]+)\}").expect("var token pattern is valid"));

/// Substitute `${NAME}` tokens in raw layer text before YAML parsing.
///
/// Each token is replaced with the value `lookup` returns for NAME. Tokens
/// with no value are left verbatim so a rendered document still shows what
/// was expected, and so quoting inside the file never needs to anticipate
/// substitution.
pub fn interpolate<F>(raw: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    VAR_TOKEN
        .replace_all(raw, |caps: &Captures<'_>| {
            lookup(&caps[1]).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_in<'a>(map: &'a HashMap<&str, &str>) -> impl Fn(&str) -> Option<String> + 'a {
        |name| map.get(name).map(|v| v.to_string())
    }

    #[test]
    fn replaces_known_tokens() {
        let vars = HashMap::from([("DB_HOST", "db.internal"), ("DB_PORT", "3306")]);
        let out = interpolate("host: ${DB_HOST}\nport: ${DB_PORT}\n", lookup_in(&vars));
        assert_eq!(out, "host: db.internal\nport: 3306\n");
    }

    #[test]
    fn unknown_tokens_stay_verbatim() {
        let vars = HashMap::new();
        let out = interpolate("password: ${DB_PASSWORD}", lookup_in(&vars));
        assert_eq!(out, "password: ${DB_PASSWORD}");
    }

    #[test]
    fn lowercase_and_bare_dollar_are_not_tokens() {
        let vars = HashMap::from([("path", "x"), ("COST", "1")]);
        let text = "a: ${path}\nb: $COST\nc: {COST}\n";
        assert_eq!(interpolate(text, lookup_in(&vars)), text);
    }

    #[test]
    fn token_can_expand_to_empty_string() {
        let vars = HashMap::from([("OPTIONAL", "")]);
        assert_eq!(interpolate("value: '${OPTIONAL}'", lookup_in(&vars)), "value: ''");
    }

    #[test]
    fn repeated_tokens_all_expand() {
        let vars = HashMap::from([("REGION", "br")]);
        let out = interpolate("${REGION}-${REGION}", lookup_in(&vars));
        assert_eq!(out, "br-br");
    }
}
