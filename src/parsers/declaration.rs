// Declaration line parsing for sigfeat
// Tokenizes `key=value; key=value` lines and builds the matching Feature variant

use crate::error::{FeatureError, Result};
use crate::features::{
    parse_proto_list, ContentFeature, GenericFeature, IpFeature, ProtocolFeature,
    DEFAULT_CONTENT_NAME, DEFAULT_IP_NAME, DEFAULT_PROTOCOL_NAME, MAX_COMPLEXITY_PROB,
};
use crate::models::{Feature, FeatureKind};
use crate::notation::AmbiguousNotation;
use lazy_static::lazy_static;
use log::warn;
use regex::Regex;
use std::collections::HashMap;
use std::str::FromStr;

lazy_static! {
    // Entries are separated by a comma plus whitespace, so `[2,7]` stays whole
    static ref ENTRY_DELIMITER: Regex = Regex::new(r",\s").unwrap();
}

const PAIR_SEPARATOR: char = ';';
const COMMENT_PREFIX: char = '#';

/// Key/value pairs of one declaration line; keys are lower-cased
pub type Declaration = HashMap<String, String>;

/// Split a line into key/value pairs.
///
/// Later duplicate keys overwrite earlier ones. A non-empty token without
/// `=` is a format error.
pub fn tokenize(line: &str) -> Result<Declaration> {
    let mut pairs = Declaration::new();
    for token in line.split(PAIR_SEPARATOR).map(str::trim) {
        if token.is_empty() {
            continue;
        }
        let (key, value) = token
            .split_once('=')
            .ok_or_else(|| FeatureError::format(format!("expected key=value, got '{}'", token)))?;
        pairs.insert(key.trim().to_lowercase(), value.trim().to_string());
    }
    Ok(pairs)
}

/// Parse `[entry, entry, ...]` into notations, preserving order.
///
/// Examples:
/// - "[any, [1:5], [2,7]]" → Literal, Range, List
/// - "[a, 1:5, 2,7]" → Literal, Range, List
/// - "[]" → empty
pub fn parse_ambiguity_list(value: &str) -> Result<Vec<AmbiguousNotation>> {
    let value = value.trim();
    let inner = value
        .strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
        .ok_or_else(|| {
            FeatureError::format(format!("ambiguity_list must be bracketed: '{}'", value))
        })?;
    if inner.trim().is_empty() {
        return Ok(Vec::new());
    }
    ENTRY_DELIMITER
        .split(inner)
        .map(|entry| AmbiguousNotation::parse_entry(entry.trim()))
        .collect()
}

/// Parse one declaration line.
///
/// Blank lines and `#` comments yield `Ok(None)`.
pub fn parse_declaration(line: &str) -> Result<Option<Feature>> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with(COMMENT_PREFIX) {
        return Ok(None);
    }
    let pairs = tokenize(trimmed)?;
    build_feature(&pairs).map(Some)
}

/// Resolve the declared type and build the feature from its keys
pub fn build_feature(pairs: &Declaration) -> Result<Feature> {
    let kind = pairs
        .get("type")
        .ok_or(FeatureError::MissingType)
        .and_then(|t| FeatureKind::from_type(t))?;
    let name = pairs.get("name").cloned();
    let complexity_prob = number(pairs, "complexity_prob", 0i64)?;
    if !(0..=MAX_COMPLEXITY_PROB as i64).contains(&complexity_prob) {
        warn!(
            "complexity_prob {} of {} feature '{}' clamped into [0,{}]",
            complexity_prob,
            kind,
            name.as_deref().unwrap_or_default(),
            MAX_COMPLEXITY_PROB
        );
    }

    let feature: Feature = match kind {
        FeatureKind::Generic => GenericFeature::new(
            name.unwrap_or_default(),
            number(pairs, "lower_bound", 0i64)?,
            number(pairs, "upper_bound", 0i64)?,
            complexity_prob,
            ambiguity_list(pairs)?,
        )
        .into(),
        FeatureKind::Content => ContentFeature::new(
            name.unwrap_or_else(|| DEFAULT_CONTENT_NAME.to_string()),
            pairs.get("regex").map_or(false, |v| v == "True"),
            complexity_prob,
            number(pairs, "len", 0usize)?,
        )
        .into(),
        FeatureKind::Ip => IpFeature::new(
            name.unwrap_or_else(|| DEFAULT_IP_NAME.to_string()),
            number(pairs, "version", 4u8)?,
            complexity_prob,
        )
        .into(),
        FeatureKind::Protocol => {
            let proto_list = match pairs.get("proto_list") {
                Some(value) => parse_proto_list(value)?,
                None => Vec::new(),
            };
            ProtocolFeature::new(
                name.unwrap_or_else(|| DEFAULT_PROTOCOL_NAME.to_string()),
                proto_list,
                complexity_prob,
                ambiguity_list(pairs)?,
            )?
            .into()
        }
    };
    Ok(feature)
}

fn ambiguity_list(pairs: &Declaration) -> Result<Vec<AmbiguousNotation>> {
    match pairs.get("ambiguity_list") {
        Some(value) => parse_ambiguity_list(value),
        None => Ok(Vec::new()),
    }
}

/// Numeric value for `key`, or `default` when the key is absent
fn number<T>(pairs: &Declaration, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match pairs.get(key) {
        Some(raw) => raw
            .parse::<T>()
            .map_err(|e| FeatureError::format(format!("invalid {} '{}': {}", key, raw, e))),
        None => Ok(default),
    }
}
