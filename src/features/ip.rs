// IP address feature for sigfeat
// Plain IPv4/IPv6 addresses, or CIDR blocks with a random netmask

use super::{clamp_complexity, roll_complexity};
use crate::error::{FeatureError, Result};
use rand::Rng;
use serde::Serialize;

pub const DEFAULT_IP_NAME: &str = "ip";

const IPV4_BYTES: u32 = 4;
const IPV6_BYTES: u32 = 16;
const IPV6_GROUPS: usize = 8;
const IPV6_FIRST_GROUP: u16 = 0x2001;
const IPV6_SECOND_GROUP_SPAN: u16 = 0x01F8;
const IPV6_SECOND_GROUP_BASE: u16 = 0x0400;

/// Renders `name=<addr>` or `name=<addr>/<netmask>` in the complex branch
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IpFeature {
    pub name: String,
    pub version: u8,
    pub complexity_prob: u8,
}

impl Default for IpFeature {
    fn default() -> Self {
        Self {
            name: DEFAULT_IP_NAME.to_string(),
            version: 4,
            complexity_prob: 0,
        }
    }
}

impl IpFeature {
    /// Any version is accepted here; versions other than 4 and 6 fail at render time
    pub fn new(name: impl Into<String>, version: u8, complexity_prob: i64) -> Self {
        Self {
            name: name.into(),
            version,
            complexity_prob: clamp_complexity(complexity_prob),
        }
    }

    pub fn render<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<String> {
        if self.version != 4 && self.version != 6 {
            return Err(FeatureError::UnsupportedVersion(self.version));
        }
        let complex = roll_complexity(rng, self.complexity_prob);
        let addr = match (self.version, complex) {
            (4, false) => simple_v4(rng),
            (4, true) => {
                let netmask = rng.gen_range(0..=IPV4_BYTES * 8);
                cidr_v4(rng, netmask)
            }
            (_, false) => simple_v6(rng),
            (_, true) => {
                let netmask = rng.gen_range(0..=IPV6_BYTES * 8);
                cidr_v6(rng, netmask)
            }
        };
        Ok(format!("{}={}", self.name, addr))
    }
}

fn simple_v4<R: Rng + ?Sized>(rng: &mut R) -> String {
    let octets: Vec<u8> = (0..IPV4_BYTES).map(|_| rng.gen()).collect();
    format_v4(&octets)
}

fn simple_v6<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut groups = Vec::with_capacity(IPV6_GROUPS);
    groups.push(IPV6_FIRST_GROUP);
    groups.push(rng.gen_range(0..=IPV6_SECOND_GROUP_SPAN) + IPV6_SECOND_GROUP_BASE);
    groups.extend((0..6).map(|_| rng.gen::<u16>()));
    format_v6(&groups)
}

/// High `bits` bits of a byte, e.g. 3 → 0b1110_0000
fn partial_mask(bits: u32) -> u8 {
    (((1u16 << bits) - 1) << (8 - bits)) as u8
}

/// CIDR block with `netmask / 8` random octets, then a masked partial
/// octet, then zeros.
fn cidr_v4<R: Rng + ?Sized>(rng: &mut R, netmask: u32) -> String {
    let prefix_bytes = (netmask / 8) as usize;
    let mask = partial_mask(netmask % 8);

    let mut octets: Vec<u8> = (0..prefix_bytes).map(|_| rng.gen()).collect();
    let partial = rng.gen::<u8>() & mask;
    if partial != 0 {
        octets.push(partial);
    }
    octets.resize(IPV4_BYTES as usize, 0);

    format!("{}/{}", format_v4(&octets), netmask)
}

/// CIDR block over 16-bit groups.
///
/// Whole prefix bytes fill whole groups. With an odd number of prefix bytes
/// the last one becomes the high byte of the partial group and the masked
/// byte its low byte; otherwise the masked byte is the high byte.
fn cidr_v6<R: Rng + ?Sized>(rng: &mut R, netmask: u32) -> String {
    let prefix_bytes = (netmask / 8) as usize;
    let mask = partial_mask(netmask % 8);

    let mut groups: Vec<u16> = (0..prefix_bytes / 2).map(|_| rng.gen()).collect();
    let masked = u16::from(rng.gen::<u8>() & mask);
    let partial = if prefix_bytes % 2 == 1 {
        (u16::from(rng.gen::<u8>()) << 8) | masked
    } else {
        masked << 8
    };
    if partial != 0 && groups.len() < IPV6_GROUPS {
        groups.push(partial);
    }
    groups.resize(IPV6_GROUPS, 0);

    format!("{}/{}", format_v6(&groups), netmask)
}

fn format_v4(octets: &[u8]) -> String {
    octets
        .iter()
        .map(|o| o.to_string())
        .collect::<Vec<_>>()
        .join(".")
}

fn format_v6(groups: &[u16]) -> String {
    groups
        .iter()
        .map(|g| format!("{:04x}", g))
        .collect::<Vec<_>>()
        .join(":")
}
