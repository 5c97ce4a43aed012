/// Property tests for notation and feature invariants
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use sigfeat::features::{GenericFeature, IpFeature};
use sigfeat::models::Bounds;
use sigfeat::notation::{ListNotation, RangeNotation, MAX_LIST_SIZE};
use std::net::Ipv4Addr;

fn parse_pair(rendered: &str) -> (i64, i64) {
    let inner = rendered.trim_start_matches('[').trim_end_matches(']');
    let (a, b) = inner.split_once(':').expect("range separator");
    (a.parse().expect("lower"), b.parse().expect("upper"))
}

proptest! {
    #[test]
    fn clamping_invariant_holds(lower in -1000i64..1000, upper in -1000i64..1000) {
        let bounds = Bounds::new(lower, upper);
        prop_assert!(bounds.upper() >= 1);
        prop_assert!(bounds.lower() <= bounds.upper());
        if upper < 1 {
            prop_assert_eq!(bounds.upper(), 1);
        }
        if lower > bounds.upper() {
            prop_assert_eq!(bounds.lower(), bounds.upper() - 1);
        }
    }

    #[test]
    fn range_render_stays_inside(lower in -500i64..500, upper in -500i64..500, seed in any::<u64>()) {
        let range = RangeNotation::parse(&format!("[{}:{}]", lower, upper)).unwrap();
        let bounds = range.bounds();
        let mut rng = StdRng::seed_from_u64(seed);
        for _ in 0..20 {
            let (a, b) = parse_pair(&range.render(&mut rng));
            prop_assert!(bounds.lower() <= a && a <= b && b <= bounds.upper());
        }
    }

    #[test]
    fn list_render_sorted_unique_capped(lower in -200i64..200, upper in -200i64..200, seed in any::<u64>()) {
        let list = ListNotation::parse(&format!("[{},{}]", lower, upper)).unwrap();
        let bounds = list.bounds();
        let mut rng = StdRng::seed_from_u64(seed);
        let rendered = list.render(&mut rng);
        let values: Vec<i64> = rendered
            .trim_start_matches('[')
            .trim_end_matches(']')
            .split(',')
            .map(|v| v.parse().unwrap())
            .collect();
        let cap = (MAX_LIST_SIZE as u128).min(bounds.domain_size()) as usize;
        prop_assert!(values.len() <= cap);
        prop_assert!(values.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(values.iter().all(|v| bounds.lower() <= *v && *v <= bounds.upper()));
    }

    #[test]
    fn generic_plain_value_inside_bounds(lower in -50i64..50, upper in -50i64..50, seed in any::<u64>()) {
        let feature = GenericFeature::new("n", lower, upper, 0, vec![]);
        let mut rng = StdRng::seed_from_u64(seed);
        let token = feature.render(&mut rng);
        let value: i64 = token.strip_prefix("n=").unwrap().parse().unwrap();
        prop_assert!(feature.bounds.lower() <= value && value <= feature.bounds.upper());
    }

    #[test]
    fn ipv4_cidr_well_formed(seed in any::<u64>()) {
        let feature = IpFeature::new("ip", 4, 100);
        let mut rng = StdRng::seed_from_u64(seed);
        let token = feature.render(&mut rng).unwrap();
        let (addr, mask) = token.strip_prefix("ip=").unwrap().split_once('/').unwrap();
        prop_assert!(addr.parse::<Ipv4Addr>().is_ok());
        prop_assert!(mask.parse::<u32>().unwrap() <= 32);
    }

    #[test]
    fn ipv6_cidr_has_eight_groups(seed in any::<u64>()) {
        let feature = IpFeature::new("ip", 6, 100);
        let mut rng = StdRng::seed_from_u64(seed);
        let token = feature.render(&mut rng).unwrap();
        let (addr, mask) = token.strip_prefix("ip=").unwrap().split_once('/').unwrap();
        prop_assert_eq!(addr.split(':').count(), 8);
        prop_assert!(addr.split(':').all(|g| g.len() == 4));
        prop_assert!(mask.parse::<u32>().unwrap() <= 128);
    }
}
