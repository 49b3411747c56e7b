//! URL path pattern parsing
//!
//! ## Syntax
//! - `:name` - required parameter, consumes one parameter-class match
//! - `(...)` - optional group, e.g. `(.:format)` or `(:yr-:mo-:dy)`
//! - `a|b` inside a group - literal alternatives, e.g. `(.html|.json)`
//!
//! A `:` not followed by a word character is plain text. Groups cannot nest.

use crate::{Error, Result};

/// One element of a parsed pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Literal text, matched verbatim
    Literal(String),
    /// Required parameter
    Param(String),
    /// Optional group; each inner vec is one `|`-separated alternative made
    /// of `Literal` and `Param` tokens only
    Optional(Vec<Vec<Token>>),
}

impl Token {
    fn push_params<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Token::Literal(_) => {}
            Token::Param(name) => out.push(name),
            Token::Optional(alternatives) => {
                for token in alternatives.iter().flatten() {
                    token.push_params(out);
                }
            }
        }
    }
}

/// A parsed path pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    source: String,
    tokens: Vec<Token>,
}

impl Pattern {
    /// Parse a pattern such as `/books/:id(.:format)`
    ///
    /// # Example
    /// ```
    /// use jet_router::{Pattern, Token};
    ///
    /// let pattern = Pattern::parse("/books/:id.json").unwrap();
    /// assert_eq!(pattern.tokens(), &[
    ///     Token::Literal("/books/".into()),
    ///     Token::Param("id".into()),
    ///     Token::Literal(".json".into()),
    /// ]);
    /// ```
    pub fn parse(source: &str) -> Result<Self> {
        let mut tokens = Vec::new();
        let mut rest = source;

        while !rest.is_empty() {
            match rest.find(['(', ')']) {
                Some(pos) if rest.as_bytes()[pos] == b')' => {
                    return Err(Error::invalid_pattern(source, "unbalanced ')'"));
                }
                Some(pos) => {
                    scan_segment(&rest[..pos], &mut tokens);
                    let group = &rest[pos + 1..];
                    let close = group
                        .find(')')
                        .ok_or_else(|| Error::invalid_pattern(source, "unclosed '('"))?;
                    let body = &group[..close];
                    if body.contains('(') {
                        return Err(Error::invalid_pattern(source, "nested optional group"));
                    }
                    if body.is_empty() {
                        return Err(Error::invalid_pattern(source, "empty optional group"));
                    }
                    let alternatives = body
                        .split('|')
                        .map(|alt| {
                            let mut inner = Vec::new();
                            scan_segment(alt, &mut inner);
                            inner
                        })
                        .collect();
                    tokens.push(Token::Optional(alternatives));
                    rest = &group[close + 1..];
                }
                None => {
                    scan_segment(rest, &mut tokens);
                    rest = "";
                }
            }
        }

        let pattern = Self {
            source: source.to_string(),
            tokens,
        };
        pattern.check_unique_params()?;
        Ok(pattern)
    }

    /// The pattern text as registered
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Every parameter name, in declaration order (including optional ones)
    pub fn param_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        for token in &self.tokens {
            token.push_params(&mut names);
        }
        names
    }

    /// True when the pattern declares no parameter anywhere
    ///
    /// Parameter-free optional groups do not make a pattern variable; such
    /// patterns are registered through [`Pattern::expand`].
    pub fn is_fixed(&self) -> bool {
        self.param_names().is_empty()
    }

    /// True when the pattern contains at least one optional group
    pub fn has_optional(&self) -> bool {
        self.tokens.iter().any(|t| matches!(t, Token::Optional(_)))
    }

    /// All concrete paths a fixed pattern can match
    ///
    /// For each group the path without the group comes first, then one path
    /// per alternative. Returns an empty vec for variable patterns.
    pub fn expand(&self) -> Vec<String> {
        if !self.is_fixed() {
            return Vec::new();
        }
        let mut paths = vec![String::new()];
        for token in &self.tokens {
            match token {
                Token::Literal(text) => {
                    for path in &mut paths {
                        path.push_str(text);
                    }
                }
                Token::Optional(alternatives) => {
                    paths = paths
                        .iter()
                        .flat_map(|prefix| {
                            std::iter::once(prefix.clone()).chain(
                                alternatives
                                    .iter()
                                    .map(move |alt| format!("{prefix}{}", literal_text(alt))),
                            )
                        })
                        .collect();
                }
                Token::Param(_) => unreachable!("fixed pattern has no params"),
            }
        }
        paths
    }

    fn check_unique_params(&self) -> Result<()> {
        let names = self.param_names();
        for (i, name) in names.iter().enumerate() {
            if name.is_empty() {
                return Err(Error::invalid_pattern(&self.source, "empty parameter name"));
            }
            if names[..i].contains(name) {
                return Err(Error::DuplicateParam {
                    pattern: self.source.clone(),
                    name: name.to_string(),
                });
            }
        }
        Ok(())
    }
}

impl std::fmt::Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.source)
    }
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Split group-free text into literals and `:name` params
fn scan_segment(text: &str, out: &mut Vec<Token>) {
    let bytes = text.as_bytes();
    let mut literal_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b':' && bytes.get(i + 1).copied().is_some_and(is_word_byte) {
            push_literal(out, &text[literal_start..i]);
            let name_start = i + 1;
            let mut end = name_start;
            while end < bytes.len() && is_word_byte(bytes[end]) {
                end += 1;
            }
            out.push(Token::Param(text[name_start..end].to_string()));
            i = end;
            literal_start = end;
        } else {
            i += 1;
        }
    }
    push_literal(out, &text[literal_start..]);
}

fn push_literal(out: &mut Vec<Token>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(Token::Literal(prev)) = out.last_mut() {
        prev.push_str(text);
    } else {
        out.push(Token::Literal(text.to_string()));
    }
}

fn literal_text(tokens: &[Token]) -> String {
    tokens
        .iter()
        .filter_map(|t| match t {
            Token::Literal(text) => Some(text.as_str()),
            _ => None,
        })
        .collect()
}
