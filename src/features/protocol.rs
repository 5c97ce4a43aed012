// Protocol feature for sigfeat

use super::{clamp_complexity, roll_complexity};
use crate::error::{FeatureError, Result};
use crate::notation::AmbiguousNotation;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

pub const DEFAULT_PROTOCOL_NAME: &str = "proto";

/// Renders `name=<proto>` from `proto_list`, or an ambiguity notation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProtocolFeature {
    pub name: String,
    pub proto_list: Vec<String>,
    pub complexity_prob: u8,
    pub ambiguity_list: Vec<AmbiguousNotation>,
}

impl ProtocolFeature {
    /// Fails when `proto_list` is empty, since the plain branch needs a token
    pub fn new(
        name: impl Into<String>,
        proto_list: Vec<String>,
        complexity_prob: i64,
        ambiguity_list: Vec<AmbiguousNotation>,
    ) -> Result<Self> {
        let name = name.into();
        if proto_list.is_empty() {
            return Err(FeatureError::EmptyProtocolList(name));
        }
        Ok(Self {
            name,
            proto_list,
            complexity_prob: clamp_complexity(complexity_prob),
            ambiguity_list,
        })
    }

    pub fn render<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        let complex = !self.ambiguity_list.is_empty() && roll_complexity(rng, self.complexity_prob);
        let proto = if complex {
            self.ambiguity_list.choose(rng).map(|notation| notation.render(rng))
        } else {
            self.proto_list.choose(rng).cloned()
        };
        format!("{}={}", self.name, proto.unwrap_or_default())
    }
}

/// Split a bracketed `[tcp,udp,icmp]` list on bare commas.
///
/// Tokens are kept as written: `[tcp, udp]` yields `"tcp"` and `" udp"`.
pub fn parse_proto_list(value: &str) -> Result<Vec<String>> {
    let inner = value
        .strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
        .ok_or_else(|| FeatureError::format(format!("proto_list must be bracketed: '{}'", value)))?;
    if inner.is_empty() {
        return Ok(Vec::new());
    }
    Ok(inner.split(',').map(|p| p.to_string()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn protos(list: &[&str]) -> Vec<String> {
        list.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn test_parse_proto_list() {
        assert_eq!(parse_proto_list("[tcp,udp,icmp]").unwrap(), protos(&["tcp", "udp", "icmp"]));
    }

    #[test]
    fn test_parse_proto_list_keeps_spaces() {
        assert_eq!(parse_proto_list("[tcp, udp]").unwrap(), protos(&["tcp", " udp"]));
    }

    #[test]
    fn test_parse_proto_list_requires_brackets() {
        assert!(matches!(parse_proto_list("tcp,udp"), Err(FeatureError::Format(_))));
    }

    #[test]
    fn test_empty_proto_list_rejected() {
        let result = ProtocolFeature::new("proto", vec![], 0, vec![]);
        assert!(matches!(result, Err(FeatureError::EmptyProtocolList(_))));
    }

    #[test]
    fn test_render_draws_from_list() {
        let mut rng = StdRng::seed_from_u64(5);
        let feature = ProtocolFeature::new("proto", protos(&["tcp", "udp"]), 0, vec![]).unwrap();
        for _ in 0..100 {
            let token = feature.render(&mut rng);
            assert!(token == "proto=tcp" || token == "proto=udp");
        }
    }

    #[test]
    fn test_full_complexity_uses_ambiguity() {
        let mut rng = StdRng::seed_from_u64(5);
        let feature = ProtocolFeature::new(
            "proto",
            protos(&["tcp"]),
            100,
            vec![AmbiguousNotation::literal("ip")],
        )
        .unwrap();
        for _ in 0..100 {
            assert_eq!(feature.render(&mut rng), "proto=ip");
        }
    }
}
