/// Unit tests for core sigfeat models
/// Tests bounds clamping, feature dispatch and rendering shapes
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use sigfeat::features::{ContentFeature, GenericFeature, IpFeature, ProtocolFeature};
use sigfeat::models::{Bounds, Feature, FeatureKind};
use sigfeat::notation::{AmbiguousNotation, ListNotation, RangeNotation};
use sigfeat::regex_gen::{RegexBodyGenerator, RegexProfile};
use sigfeat::FeatureError;
use std::net::Ipv4Addr;

#[test]
fn test_bounds_clamp_upper_below_one() {
    let bounds = Bounds::new(0, -10);
    assert_eq!(bounds.upper(), 1);
    assert_eq!(bounds.lower(), 0);
}

#[test]
fn test_bounds_clamp_lower_above_upper() {
    let bounds = Bounds::new(50, 20);
    assert_eq!(bounds.upper(), 20);
    assert_eq!(bounds.lower(), 19);
}

#[test]
fn test_bounds_untouched_when_valid() {
    let bounds = Bounds::new(-5, 5);
    assert_eq!((bounds.lower(), bounds.upper()), (-5, 5));
    assert_eq!(bounds.domain_size(), 11);
}

#[test]
fn test_bounds_extreme_domain_size() {
    let bounds = Bounds::new(i64::MIN, i64::MAX);
    assert_eq!(bounds.domain_size(), 1u128 << 64);
}

#[test]
fn test_notation_constructors_use_brackets() {
    let mut rng = StdRng::seed_from_u64(8);
    let range = RangeNotation::new(1, 9).render(&mut rng);
    assert!(range.starts_with('[') && range.ends_with(']'));
    let list = ListNotation::new(1, 9).render(&mut rng);
    assert!(list.starts_with('[') && list.ends_with(']'));
}

#[test]
fn test_feature_kind_from_type() {
    assert_eq!(FeatureKind::from_type("Feature").unwrap(), FeatureKind::Generic);
    assert_eq!(FeatureKind::from_type("CONTENT").unwrap(), FeatureKind::Content);
    assert_eq!(FeatureKind::from_type("ip").unwrap(), FeatureKind::Ip);
    assert_eq!(FeatureKind::from_type("Protocol").unwrap(), FeatureKind::Protocol);
    assert!(matches!(FeatureKind::from_type("port"), Err(FeatureError::UnknownType(_))));
}

#[test]
fn test_feature_kind_display() {
    assert_eq!(FeatureKind::Generic.to_string(), "feature");
    assert_eq!(FeatureKind::Ip.to_string(), "ip");
}

#[test]
fn test_feature_accessors() {
    let feature: Feature = IpFeature::new("dst_ip", 6, 40).into();
    assert_eq!(feature.kind(), FeatureKind::Ip);
    assert_eq!(feature.name(), "dst_ip");
    assert_eq!(feature.complexity_prob(), 40);
}

#[test]
fn test_generic_complexity_zero_never_ambiguous() {
    let mut rng = StdRng::seed_from_u64(99);
    let feature: Feature = GenericFeature::new(
        "dport",
        1000,
        2000,
        0,
        vec![AmbiguousNotation::literal("any")],
    )
    .into();
    for _ in 0..1000 {
        let token = feature.render(&mut rng).unwrap();
        assert_ne!(token, "dport=any");
    }
}

#[test]
fn test_generic_complexity_hundred_always_ambiguous() {
    let mut rng = StdRng::seed_from_u64(99);
    let feature: Feature = GenericFeature::new(
        "dport",
        1000,
        2000,
        100,
        vec![
            AmbiguousNotation::literal("any"),
            AmbiguousNotation::Range(RangeNotation::new(1, 1024)),
        ],
    )
    .into();
    for _ in 0..1000 {
        let token = feature.render(&mut rng).unwrap();
        let value = token.strip_prefix("dport=").unwrap();
        assert!(value == "any" || value.starts_with('['), "plain value chosen: {}", token);
    }
}

#[test]
fn test_ipv4_simple_shape() {
    let mut rng = StdRng::seed_from_u64(99);
    let feature: Feature = IpFeature::new("ip", 4, 0).into();
    for _ in 0..500 {
        let token = feature.render(&mut rng).unwrap();
        let addr = token.strip_prefix("ip=").unwrap();
        assert_eq!(addr.split('.').count(), 4);
        assert!(addr.parse::<Ipv4Addr>().is_ok(), "bad address {}", addr);
    }
}

#[test]
fn test_ipv4_complex_shape() {
    let mut rng = StdRng::seed_from_u64(99);
    let feature: Feature = IpFeature::new("ip", 4, 100).into();
    for _ in 0..500 {
        let token = feature.render(&mut rng).unwrap();
        let (addr, mask) = token.strip_prefix("ip=").unwrap().split_once('/').unwrap();
        assert!(addr.parse::<Ipv4Addr>().is_ok(), "bad address {}", addr);
        let mask: u32 = mask.parse().unwrap();
        assert!(mask <= 32);
    }
}

#[test]
fn test_unsupported_ip_version_is_reported() {
    let mut rng = StdRng::seed_from_u64(99);
    let feature: Feature = IpFeature::new("ip", 5, 100).into();
    assert!(matches!(feature.render(&mut rng), Err(FeatureError::UnsupportedVersion(5))));
}

#[test]
fn test_protocol_render() {
    let mut rng = StdRng::seed_from_u64(99);
    let feature: Feature = ProtocolFeature::new(
        "proto",
        vec!["tcp".to_string(), "udp".to_string()],
        0,
        vec![],
    )
    .unwrap()
    .into();
    let token = feature.render(&mut rng).unwrap();
    assert!(token == "proto=tcp" || token == "proto=udp");
}

/// Always returns the same body
struct FixedBody;

impl RegexBodyGenerator for FixedBody {
    fn generate(&self, _rng: &mut dyn RngCore, _length: usize, _secondary: usize, _profile: &RegexProfile) -> String {
        "abc".to_string()
    }
}

#[test]
fn test_content_with_custom_generator() {
    let mut rng = StdRng::seed_from_u64(99);
    let feature: Feature = ContentFeature::new("content", true, 0, 3).into();
    assert_eq!(feature.render_with(&mut rng, &FixedBody).unwrap(), "content=/abc/");

    let plain: Feature = ContentFeature::new("uri", false, 0, 3).into();
    assert_eq!(plain.render_with(&mut rng, &FixedBody).unwrap(), "uri=abc");
}

#[test]
fn test_content_default_generator_compiles() {
    let mut rng = StdRng::seed_from_u64(99);
    let feature: Feature = ContentFeature::new("content", true, 50, 10).into();
    for _ in 0..200 {
        let token = feature.render(&mut rng).unwrap();
        let wrapped = token.strip_prefix("content=/").unwrap();
        let end = wrapped.rfind('/').unwrap();
        let (body, flags) = (&wrapped[..end], &wrapped[end + 1..]);
        assert!(regex::Regex::new(body).is_ok(), "invalid body {}", body);
        assert!(["", "i", "im", "ims"].contains(&flags));
    }
}
