//! URI template compilation and matching.
//!
//! A template is a URI string with zero or more `{name}` placeholders, e.g.
//! `weather://{city}/current`. Each placeholder captures exactly one path
//! segment (one or more non-slash characters). Matching is full-string and
//! anchored: a candidate with extra leading or trailing content never
//! matches. Literal spans are matched literally, so regex metacharacters in
//! a template (`.`, `+`, `?`) carry no special meaning.

use {
    crate::error::{ResourceError, ResourceResult},
    regex::Regex,
    std::collections::HashMap,
};

/// A compiled URI template.
///
/// Compilation is deterministic: the same template string always produces
/// the same placeholder list and match behavior.
#[derive(Debug, Clone)]
pub struct UriTemplate {
    template: String,
    pattern: Regex,
    params: Vec<String>,
}

impl UriTemplate {
    /// Compile a template string into an anchored matcher.
    ///
    /// Placeholder names must be non-empty identifiers (`[A-Za-z_][A-Za-z0-9_]*`)
    /// and unique within the template; duplicates, empty placeholders, and
    /// unbalanced braces are rejected with `InvalidTemplate`. There is no
    /// escape mechanism for literal braces.
    pub fn compile(template: &str) -> ResourceResult<Self> {
        let mut pattern = String::from("^");
        let mut params: Vec<String> = Vec::new();
        let mut literal = String::new();

        let mut chars = template.chars();
        while let Some(ch) = chars.next() {
            match ch {
                '{' => {
                    pattern.push_str(&regex::escape(&literal));
                    literal.clear();

                    let mut name = String::new();
                    loop {
                        match chars.next() {
                            Some('}') => break,
                            Some(c) if c.is_ascii_alphanumeric() || c == '_' => name.push(c),
                            Some(c) => {
                                return Err(ResourceError::InvalidTemplate(format!(
                                    "unexpected character '{c}' in placeholder in '{template}'"
                                )))
                            }
                            None => {
                                return Err(ResourceError::InvalidTemplate(format!(
                                    "unterminated placeholder in '{template}'"
                                )))
                            }
                        }
                    }

                    let starts_ok = name
                        .chars()
                        .next()
                        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
                    if !starts_ok {
                        return Err(ResourceError::InvalidTemplate(format!(
                            "placeholder name '{{{name}}}' is not an identifier in '{template}'"
                        )));
                    }
                    if params.contains(&name) {
                        return Err(ResourceError::InvalidTemplate(format!(
                            "duplicate placeholder '{{{name}}}' in '{template}'"
                        )));
                    }

                    pattern.push_str("(?P<");
                    pattern.push_str(&name);
                    pattern.push_str(">[^/]+)");
                    params.push(name);
                }
                '}' => {
                    return Err(ResourceError::InvalidTemplate(format!(
                        "unmatched '}}' in '{template}'"
                    )))
                }
                c => literal.push(c),
            }
        }
        pattern.push_str(&regex::escape(&literal));
        pattern.push('$');

        let pattern =
            Regex::new(&pattern).map_err(|e| ResourceError::InvalidTemplate(e.to_string()))?;

        Ok(Self {
            template: template.to_string(),
            pattern,
            params,
        })
    }

    /// Match a concrete URI against this template.
    ///
    /// Returns the placeholder-to-capture mapping on a full match, `None`
    /// otherwise. A non-match is a normal negative result, not an error.
    pub fn matches(&self, uri: &str) -> Option<HashMap<String, String>> {
        let captures = self.pattern.captures(uri)?;
        Some(
            self.params
                .iter()
                .map(|name| (name.clone(), captures[name.as_str()].to_string()))
                .collect(),
        )
    }

    /// Placeholder names in template order.
    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// The raw template string.
    pub fn as_str(&self) -> &str {
        &self.template
    }
}

impl std::fmt::Display for UriTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.template)
    }
}
