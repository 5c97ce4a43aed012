// Ambiguous notation rendering for sigfeat
// Literal tokens, numeric sub-ranges and sorted numeric lists drawn from a domain

use crate::error::{FeatureError, Result};
use crate::models::Bounds;
use rand::Rng;
use serde::Serialize;
use std::collections::BTreeSet;

pub const RANGE_SEPARATOR: char = ':';
pub const LIST_SEPARATOR: char = ',';
pub const MAX_LIST_SIZE: usize = 100;

/// Notation kind, used when classifying ambiguity list entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotationKind {
    Literal,
    Range,
    List,
}

/// A rendering strategy for one sampled ambiguous value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum AmbiguousNotation {
    Literal { token: String },
    Range(RangeNotation),
    List(ListNotation),
}

impl AmbiguousNotation {
    /// Classify one ambiguity list entry.
    ///
    /// - contains `,` → list domain, e.g. `[2,7]`
    /// - contains `:` → range, e.g. `[1:5]`
    /// - anything else → literal, e.g. `*` or `any`
    pub fn parse_entry(entry: &str) -> Result<Self> {
        if entry.contains(LIST_SEPARATOR) {
            Ok(AmbiguousNotation::List(ListNotation::parse(entry)?))
        } else if entry.contains(RANGE_SEPARATOR) {
            Ok(AmbiguousNotation::Range(RangeNotation::parse(entry)?))
        } else {
            Ok(AmbiguousNotation::literal(entry))
        }
    }

    pub fn literal(token: impl Into<String>) -> Self {
        AmbiguousNotation::Literal { token: token.into() }
    }

    pub fn kind(&self) -> NotationKind {
        match self {
            AmbiguousNotation::Literal { .. } => NotationKind::Literal,
            AmbiguousNotation::Range(_) => NotationKind::Range,
            AmbiguousNotation::List(_) => NotationKind::List,
        }
    }

    pub fn render<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        match self {
            AmbiguousNotation::Literal { token } => token.clone(),
            AmbiguousNotation::Range(range) => range.render(rng),
            AmbiguousNotation::List(list) => list.render(rng),
        }
    }
}

/// `[lo:hi]` - renders a random sub-range `[a:b]` inside the bounds
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeNotation {
    bounds: Bounds,
    prefix: Option<char>,
    suffix: Option<char>,
}

impl RangeNotation {
    pub fn new(lower: i64, upper: i64) -> Self {
        Self {
            bounds: Bounds::new(lower, upper),
            prefix: Some('['),
            suffix: Some(']'),
        }
    }

    pub fn parse(text: &str) -> Result<Self> {
        let wrapped = split_wrapped(text, RANGE_SEPARATOR)?;
        Ok(Self {
            bounds: Bounds::new(wrapped.lower, wrapped.upper),
            prefix: wrapped.prefix,
            suffix: wrapped.suffix,
        })
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn render<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        let lower = self.bounds.lower();
        let upper = self.bounds.upper();
        // lower == upper is legal after clamping, e.g. [5:5]
        let a = rng.gen_range(lower..=(upper - 1).max(lower));
        let b = rng.gen_range(a..=upper);
        wrap(self.prefix, &format!("{}{}{}", a, RANGE_SEPARATOR, b), self.suffix)
    }
}

/// `[lo,hi]` - the bracket holds a sampling domain, not a literal list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListNotation {
    bounds: Bounds,
    prefix: Option<char>,
    suffix: Option<char>,
}

impl ListNotation {
    pub fn new(lower: i64, upper: i64) -> Self {
        Self {
            bounds: Bounds::new(lower, upper),
            prefix: Some('['),
            suffix: Some(']'),
        }
    }

    pub fn parse(text: &str) -> Result<Self> {
        let wrapped = split_wrapped(text, LIST_SEPARATOR)?;
        Ok(Self {
            bounds: Bounds::new(wrapped.lower, wrapped.upper),
            prefix: wrapped.prefix,
            suffix: wrapped.suffix,
        })
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Render an ascending, duplicate-free sample of the domain.
    ///
    /// The requested size is capped at the domain size, so a domain
    /// narrower than two values yields a one-element list.
    pub fn render<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        let requested = rng.gen_range(2..=MAX_LIST_SIZE);
        let count = (requested as u128).min(self.bounds.domain_size()) as usize;

        let mut picks = BTreeSet::new();
        while picks.len() < count {
            picks.insert(self.bounds.sample(rng));
        }

        let body = picks
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(&LIST_SEPARATOR.to_string());
        wrap(self.prefix, &body, self.suffix)
    }
}

struct Wrapped {
    prefix: Option<char>,
    lower: i64,
    upper: i64,
    suffix: Option<char>,
}

/// Part of a number, so never taken as a wrapper character
fn is_number_char(c: char) -> bool {
    c.is_ascii_digit() || c == '-' || c == '+'
}

/// Split `prefix + lower + sep + upper + suffix` into its pieces.
///
/// Examples:
/// - "[1:5]" → ('[', 1, 5, ']')
/// - "1:5" → (none, 1, 5, none)
/// - "(-3,9)" → ('(', -3, 9, ')')
fn split_wrapped(text: &str, separator: char) -> Result<Wrapped> {
    let text = text.trim();
    let mut inner = text;

    let prefix = inner.chars().next().filter(|c| !is_number_char(*c));
    if let Some(c) = prefix {
        inner = &inner[c.len_utf8()..];
    }
    let suffix = inner.chars().next_back().filter(|c| !is_number_char(*c));
    if let Some(c) = suffix {
        inner = &inner[..inner.len() - c.len_utf8()];
    }

    let parts: Vec<&str> = inner.split(separator).collect();
    if parts.len() != 2 {
        return Err(FeatureError::format(format!(
            "expected two bounds separated by '{}' in '{}'",
            separator, text
        )));
    }

    Ok(Wrapped {
        prefix,
        lower: parse_bound(parts[0], text)?,
        upper: parse_bound(parts[1], text)?,
        suffix,
    })
}

fn parse_bound(raw: &str, text: &str) -> Result<i64> {
    raw.trim().parse::<i64>().map_err(|e| {
        FeatureError::format(format!("invalid bound '{}' in '{}': {}", raw.trim(), text, e))
    })
}

fn wrap(prefix: Option<char>, body: &str, suffix: Option<char>) -> String {
    let mut out = String::with_capacity(body.len() + 2);
    if let Some(c) = prefix {
        out.push(c);
    }
    out.push_str(body);
    if let Some(c) = suffix {
        out.push(c);
    }
    out
}
