// Feature variants for sigfeat
//
// Each variant renders a single `name=value` token:
//
// - generic: plain integer from bounds, or an ambiguous notation
// - content: regex-like body, optionally wrapped in slashes with flags
// - protocol: protocol token from a list, or an ambiguous notation
// - ip: IPv4/IPv6 address, or a CIDR block in the complex branch
//
// Construction never draws randomness; every draw happens at render time.

pub mod content;
pub mod generic;
pub mod ip;
pub mod protocol;

pub use content::*;
pub use generic::*;
pub use ip::*;
pub use protocol::*;

use rand::Rng;

pub const MAX_COMPLEXITY_PROB: u8 = 100;

/// Decide whether a render takes its complex branch.
///
/// Draws from `[0, 100]` and compares inclusively, but never draws when the
/// probability is zero so that `complexity_prob = 0` is never complex.
pub(crate) fn roll_complexity<R: Rng + ?Sized>(rng: &mut R, complexity_prob: u8) -> bool {
    complexity_prob > 0 && rng.gen_range(0..=MAX_COMPLEXITY_PROB) <= complexity_prob
}

/// Clamp a configured probability into `[0, 100]`
pub fn clamp_complexity(prob: i64) -> u8 {
    prob.clamp(0, MAX_COMPLEXITY_PROB as i64) as u8
}
