// Core data models for sigfeat
// Bounds, feature kinds and the Feature sum type dispatched at render time

use crate::error::{FeatureError, Result};
use crate::features::{ContentFeature, GenericFeature, IpFeature, ProtocolFeature};
use crate::regex_gen::{RegexBodyGenerator, WeightedRegexGenerator};
use rand::Rng;
use serde::Serialize;
use std::fmt;

/// Inclusive integer bounds with the clamping invariant applied.
///
/// - An upper bound below 1 is raised to 1
/// - A lower bound above the (clamped) upper bound becomes `upper - 1`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Bounds {
    lower: i64,
    upper: i64,
}

impl Bounds {
    pub fn new(lower: i64, upper: i64) -> Self {
        let upper = upper.max(1);
        let lower = if lower > upper { upper - 1 } else { lower };
        Self { lower, upper }
    }

    pub fn lower(&self) -> i64 {
        self.lower
    }

    pub fn upper(&self) -> i64 {
        self.upper
    }

    /// Uniform draw from `[lower, upper]`
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> i64 {
        rng.gen_range(self.lower..=self.upper)
    }

    /// Number of distinct integers in `[lower, upper]`
    pub fn domain_size(&self) -> u128 {
        (self.upper as i128 - self.lower as i128 + 1) as u128
    }
}

/// Declared feature type, selected by the `type` key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureKind {
    Generic,
    Content,
    Protocol,
    Ip,
}

impl FeatureKind {
    /// Resolve a `type` value (case-insensitive)
    pub fn from_type(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "feature" => Ok(FeatureKind::Generic),
            "content" => Ok(FeatureKind::Content),
            "protocol" => Ok(FeatureKind::Protocol),
            "ip" => Ok(FeatureKind::Ip),
            _ => Err(FeatureError::UnknownType(value.to_string())),
        }
    }
}

impl fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureKind::Generic => write!(f, "feature"),
            FeatureKind::Content => write!(f, "content"),
            FeatureKind::Protocol => write!(f, "protocol"),
            FeatureKind::Ip => write!(f, "ip"),
        }
    }
}

/// A named generation rule that renders to a `name=value` token
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Feature {
    #[serde(rename = "feature")]
    Generic(GenericFeature),
    Content(ContentFeature),
    Protocol(ProtocolFeature),
    Ip(IpFeature),
}

impl Feature {
    pub fn kind(&self) -> FeatureKind {
        match self {
            Feature::Generic(_) => FeatureKind::Generic,
            Feature::Content(_) => FeatureKind::Content,
            Feature::Protocol(_) => FeatureKind::Protocol,
            Feature::Ip(_) => FeatureKind::Ip,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Feature::Generic(f) => &f.name,
            Feature::Content(f) => &f.name,
            Feature::Protocol(f) => &f.name,
            Feature::Ip(f) => &f.name,
        }
    }

    pub fn complexity_prob(&self) -> u8 {
        match self {
            Feature::Generic(f) => f.complexity_prob,
            Feature::Content(f) => f.complexity_prob,
            Feature::Protocol(f) => f.complexity_prob,
            Feature::Ip(f) => f.complexity_prob,
        }
    }

    /// Render a fresh token, using the default regex body generator for content
    pub fn render<R: Rng>(&self, rng: &mut R) -> Result<String> {
        self.render_with(rng, &WeightedRegexGenerator)
    }

    /// Render a fresh token with a caller-supplied regex body generator.
    ///
    /// Rendering only reads `self`; every draw goes through `rng`, so callers
    /// sharing features across threads must give each thread its own generator.
    pub fn render_with<R: Rng>(&self, rng: &mut R, regex: &dyn RegexBodyGenerator) -> Result<String> {
        match self {
            Feature::Generic(f) => Ok(f.render(rng)),
            Feature::Content(f) => Ok(f.render(rng, regex)),
            Feature::Protocol(f) => Ok(f.render(rng)),
            Feature::Ip(f) => f.render(rng),
        }
    }
}

impl From<GenericFeature> for Feature {
    fn from(f: GenericFeature) -> Self {
        Feature::Generic(f)
    }
}

impl From<ContentFeature> for Feature {
    fn from(f: ContentFeature) -> Self {
        Feature::Content(f)
    }
}

impl From<ProtocolFeature> for Feature {
    fn from(f: ProtocolFeature) -> Self {
        Feature::Protocol(f)
    }
}

impl From<IpFeature> for Feature {
    fn from(f: IpFeature) -> Self {
        Feature::Ip(f)
    }
}
