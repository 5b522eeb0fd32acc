//! Placeholder substitution for pyskel templates.
//!
//! Placeholders are `$name` or `${name}`; `$$` is an escaped dollar sign.
//! Substitution is safe: a placeholder without a settings entry, or a `$`
//! that does not start a valid placeholder, is copied to the output as is.
//! Generated files rely on this to keep their own `${token}` markers.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::settings::Settings;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\$(?:(?P<escaped>\$)|(?P<named>[_a-zA-Z][_a-zA-Z0-9]*)|\{(?P<braced>[_a-zA-Z][_a-zA-Z0-9]*)\}|(?P<invalid>))",
    )
    .expect("placeholder pattern is valid")
});

/// Renders `template` with values from `settings`.
pub fn safe_substitute(template: &str, settings: &Settings) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            if caps.name("escaped").is_some() {
                return "$".to_string();
            }
            let key = caps.name("named").or_else(|| caps.name("braced"));
            match key.and_then(|key| settings.get(key.as_str())) {
                Some(value) => value.to_string(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Names of all placeholders in `template`, in order of appearance.
pub fn placeholders(template: &str) -> Vec<String> {
    PLACEHOLDER
        .captures_iter(template)
        .filter_map(|caps| caps.name("named").or_else(|| caps.name("braced")))
        .map(|key| key.as_str().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> Settings {
        [("foo", "bar"), ("projectName", "demo")].into_iter().collect()
    }

    #[test]
    fn test_substitutes_known_keys() {
        let out = safe_substitute("name = ${projectName}, $foo!", &settings());
        assert_eq!(out, "name = demo, bar!");
    }

    #[test]
    fn test_unknown_placeholders_pass_through() {
        let out = safe_substitute("license = ${license} $unknown", &settings());
        assert_eq!(out, "license = ${license} $unknown");
    }

    #[test]
    fn test_escape_and_invalid_dollar() {
        let out = safe_substitute("cost: $$5, make: $(SPHINXOPTS) ${ foo } $", &settings());
        assert_eq!(out, "cost: $5, make: $(SPHINXOPTS) ${ foo } $");
    }

    #[test]
    fn test_placeholders() {
        assert_eq!(placeholders("${a} $b $$c $(d)"), vec!["a", "b"]);
    }
}
