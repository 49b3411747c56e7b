//! Regex synthesis
//!
//! Turns flattened `(pattern, target)` pairs into three artifacts:
//! - a fixed-path table for parameter-free patterns
//! - one discriminating regex whose `(\z)` captures identify the matched leaf
//! - per-leaf extraction data (anchored regex, param names, optional fast path)
//!
//! ```text
//! /api/books/:id        \A/api/books/[^./?]+(?:(\z)|/edit(\z))\z
//! /api/books/:id/edit   leaf 0: \A/api/books/([^./?]+)\z        Single 11..-0
//!                       leaf 1: \A/api/books/([^./?]+)/edit\z   Single 11..-5
//! ```

use crate::config::{ParamClass, RouterConfig};
use crate::params::{ParamValue, Params};
use crate::pattern::{Pattern, Token};
use crate::trie::{Step, Trie};
use crate::{Error, Result};
use regex::Regex;
use std::collections::HashMap;
use std::sync::Arc;

/// Slice/split extraction for simple patterns
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FastPath {
    /// One parameter: `path[start .. len - end_trim]`
    Single { start: usize, end_trim: usize },
    /// Two parameters: slice as above, then split once on `separator`
    Double {
        start: usize,
        end_trim: usize,
        separator: String,
    },
}

impl FastPath {
    fn slice<'p>(start: usize, end_trim: usize, path: &'p str) -> Option<&'p str> {
        let end = path.len().checked_sub(end_trim)?;
        path.get(start..end)
    }

    fn extract<'p>(&self, path: &'p str) -> Option<[Option<&'p str>; 2]> {
        match self {
            FastPath::Single { start, end_trim } => {
                Some([Some(Self::slice(*start, *end_trim, path)?), None])
            }
            FastPath::Double {
                start,
                end_trim,
                separator,
            } => {
                let (a, b) = Self::slice(*start, *end_trim, path)?.split_once(separator.as_str())?;
                Some([Some(a), Some(b)])
            }
        }
    }
}

/// Extraction data for one variable pattern
#[derive(Debug)]
pub(crate) struct Leaf {
    /// Registration index of the route
    pub(crate) route: usize,
    pub(crate) pattern: String,
    regex: Regex,
    names: Vec<Arc<str>>,
    ints: Vec<bool>,
    fast_path: Option<FastPath>,
}

impl Leaf {
    pub(crate) fn fast_path(&self) -> Option<&FastPath> {
        self.fast_path.as_ref()
    }

    #[cfg(test)]
    pub(crate) fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Extract parameters from a path already known to match this leaf
    pub(crate) fn extract(&self, path: &str) -> Option<Params> {
        if let Some(fast) = &self.fast_path {
            let values = fast.extract(path)?;
            return Some(self.build_params(values.into_iter().take(self.names.len())));
        }
        let caps = self.regex.captures(path)?;
        Some(self.build_params(
            (1..=self.names.len()).map(|i| caps.get(i).map(|m| m.as_str())),
        ))
    }

    fn build_params<'p, I>(&self, values: I) -> Params
    where
        I: Iterator<Item = Option<&'p str>>,
    {
        let mut params = Params::with_capacity(self.names.len());
        for ((name, as_int), value) in self.names.iter().zip(&self.ints).zip(values) {
            params.push(
                Arc::clone(name),
                value.map(|v| ParamValue::from_capture(v, *as_int)),
            );
        }
        params
    }
}

/// Output of [`compile`]
#[derive(Debug)]
pub(crate) struct Compiled {
    pub(crate) fixed: HashMap<String, usize>,
    pub(crate) combined: Option<Regex>,
    /// Leaves in discriminator (capture group) order
    pub(crate) leaves: Vec<Leaf>,
}

enum Piece {
    Literal(String),
    Pattern(String),
}

impl Piece {
    fn as_step(&self) -> Step<'_> {
        match self {
            Piece::Literal(text) => Step::Literal(text),
            Piece::Pattern(fragment) => Step::Pattern(fragment),
        }
    }
}

/// Regex forms of one parameter slot
struct Slot {
    class: ParamClass,
}

impl Slot {
    fn resolve(pattern: &str, name: &str, config: &RouterConfig) -> Result<Self> {
        let class = config.param_class(name);
        if let ParamClass::Custom(src) = &class {
            let re = Regex::new(src)?;
            if re.captures_len() != 1 {
                return Err(Error::invalid_pattern(
                    pattern,
                    format!("class for {name:?} must not contain capture groups"),
                ));
            }
        }
        Ok(Self { class })
    }

    /// Non-capturing form, safe to embed in an alternation
    fn discriminating(&self) -> String {
        match &self.class {
            ParamClass::Custom(src) => format!("(?:{src})"),
            builtin => builtin.as_regex().to_string(),
        }
    }

    fn capturing(&self) -> String {
        format!("({})", self.class.as_regex())
    }
}

/// Both regex forms of a pattern, plus trie steps
struct Rendered {
    pieces: Vec<Piece>,
    extraction: String,
    names: Vec<Arc<str>>,
    ints: Vec<bool>,
    classes: Vec<ParamClass>,
}

fn render(pattern: &Pattern, config: &RouterConfig) -> Result<Rendered> {
    let mut rendered = Rendered {
        pieces: Vec::new(),
        extraction: String::from(r"\A"),
        names: Vec::new(),
        ints: Vec::new(),
        classes: Vec::new(),
    };

    for token in pattern.tokens() {
        match token {
            Token::Literal(text) => {
                rendered.extraction.push_str(&regex::escape(text));
                rendered.pieces.push(Piece::Literal(text.clone()));
            }
            Token::Param(name) => {
                let slot = Slot::resolve(pattern.as_str(), name, config)?;
                rendered.extraction.push_str(&slot.capturing());
                rendered.pieces.push(Piece::Pattern(slot.discriminating()));
                rendered.push_param(name, slot, config);
            }
            Token::Optional(alternatives) => {
                let mut discriminating = String::from("(?:");
                rendered.extraction.push_str("(?:");
                for (i, alt) in alternatives.iter().enumerate() {
                    if i > 0 {
                        discriminating.push('|');
                        rendered.extraction.push('|');
                    }
                    for inner in alt {
                        match inner {
                            Token::Literal(text) => {
                                let escaped = regex::escape(text);
                                discriminating.push_str(&escaped);
                                rendered.extraction.push_str(&escaped);
                            }
                            Token::Param(name) => {
                                let slot = Slot::resolve(pattern.as_str(), name, config)?;
                                discriminating.push_str(&slot.discriminating());
                                rendered.extraction.push_str(&slot.capturing());
                                rendered.push_param(name, slot, config);
                            }
                            Token::Optional(_) => {
                                return Err(Error::invalid_pattern(
                                    pattern.as_str(),
                                    "nested optional group",
                                ))
                            }
                        }
                    }
                }
                discriminating.push_str(")?");
                rendered.extraction.push_str(")?");
                rendered.pieces.push(Piece::Pattern(discriminating));
            }
        }
    }

    rendered.extraction.push_str(r"\z");
    Ok(rendered)
}

impl Rendered {
    fn push_param(&mut self, name: &str, slot: Slot, config: &RouterConfig) {
        self.names.push(Arc::from(name));
        self.ints.push(config.is_int_param(name));
        self.classes.push(slot.class);
    }
}

/// Derive the slice/split descriptor, if the pattern qualifies
fn fast_path_for(pattern: &Pattern, classes: &[ParamClass]) -> Option<FastPath> {
    if pattern.has_optional() {
        return None;
    }
    let literal_len = |t: Option<&Token>| match t {
        Some(Token::Literal(text)) => text.len(),
        _ => 0,
    };

    let tokens = pattern.tokens();
    let params: Vec<usize> = tokens
        .iter()
        .enumerate()
        .filter(|(_, t)| matches!(t, Token::Param(_)))
        .map(|(i, _)| i)
        .collect();

    match params.as_slice() {
        [p] => Some(FastPath::Single {
            start: if *p > 0 { literal_len(tokens.first()) } else { 0 },
            end_trim: literal_len(tokens.get(p + 1)),
        }),
        [a, b] if *b == a + 2 => {
            let separator = match &tokens[a + 1] {
                Token::Literal(text) => text,
                _ => return None,
            };
            // Splitting on the first occurrence equals the regex capture only
            // when the first value can never contain part of the separator.
            if !separator.chars().any(|c| classes[0].excludes(c)) {
                return None;
            }
            Some(FastPath::Double {
                start: if *a > 0 { literal_len(tokens.first()) } else { 0 },
                end_trim: literal_len(tokens.get(b + 1)),
                separator: separator.clone(),
            })
        }
        _ => None,
    }
}

/// Compile flattened patterns into the lookup artifacts
pub(crate) fn compile<'a, I>(patterns: I, config: &RouterConfig) -> Result<Compiled>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut fixed: HashMap<String, usize> = HashMap::new();
    let mut pending: Vec<Option<Leaf>> = Vec::new();
    let mut trie: Trie<usize> = Trie::new();

    for (route, source) in patterns.into_iter().enumerate() {
        let pattern = Pattern::parse(source)?;

        if pattern.is_fixed() {
            for path in pattern.expand() {
                if let Some(prev) = fixed.insert(path.clone(), route) {
                    tracing::warn!(path = %path, previous = prev, route, "fixed path registered twice; later registration wins");
                }
            }
            continue;
        }

        let rendered = render(&pattern, config)?;
        let fast_path = if config.fast_path {
            fast_path_for(&pattern, &rendered.classes)
        } else {
            None
        };
        let leaf = Leaf {
            route,
            pattern: source.to_string(),
            regex: Regex::new(&rendered.extraction)?,
            names: rendered.names,
            ints: rendered.ints,
            fast_path,
        };

        let slot = pending.len();
        pending.push(Some(leaf));
        if let Some(replaced) = trie.insert(rendered.pieces.iter().map(Piece::as_step), slot) {
            tracing::warn!(pattern = source, "variable pattern registered twice; later registration wins");
            pending[replaced] = None;
        }
    }

    if trie.is_empty() {
        return Ok(Compiled {
            fixed,
            combined: None,
            leaves: Vec::new(),
        });
    }

    let mut body = String::from(r"\A");
    let mut order = Vec::new();
    trie.emit(&mut body, |slot| order.push(*slot));
    body.push_str(r"\z");

    let leaves = order
        .into_iter()
        .filter_map(|slot| pending[slot].take())
        .collect();

    Ok(Compiled {
        fixed,
        combined: Some(Regex::new(&body)?),
        leaves,
    })
}
