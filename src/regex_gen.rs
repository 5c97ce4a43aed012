// Regex body generation for sigfeat content features
// Uses rand weighted sampling and regex::escape so every body is valid regex syntax
//
// The content feature only chooses a profile and passes it through; the
// weights below are generator configuration.

use rand::distributions::{Distribution, WeightedIndex};
use rand::{Rng, RngCore};
use serde::Serialize;

/// Atom count used when the requested length is 0
const DEFAULT_MAX_ATOMS: usize = 10;
/// Group size used when the secondary length is 0
const DEFAULT_MAX_GROUP_ATOMS: usize = 3;
/// Upper bound for `{n}` / `{n,m}` quantifiers
const MAX_REPEAT: u32 = 8;

const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const UPPERCASE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &[u8] = b"0123456789";
// No '/', bodies are wrapped in slashes
const PUNCTUATION: &[u8] = b"!\"#%&'()*+,-.:;<=>?@[\\]^_{|}~$";

/// Weight vectors steering body synthesis
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegexProfile {
    /// Atom kind: literal, character class, group
    pub structure: [u32; 3],
    /// Literal category: lowercase, uppercase, digit, punctuation, hex byte.
    /// Uniform when `None`.
    pub literals: Option<[u32; 5]>,
    /// Class kind: `\d`, `\w`, `\s`, bracket set. Uniform when `None`.
    pub classes: Option<[u32; 4]>,
    /// Percent chance that an atom gets a quantifier
    pub repetition_prob: u32,
    /// Percent chance that a group holds an alternation
    pub alternation_prob: u32,
}

/// Plain literal bodies
pub const SIMPLE_PROFILE: RegexProfile = RegexProfile {
    structure: [100, 0, 0],
    literals: Some([20, 35, 20, 20, 0]),
    classes: None,
    repetition_prob: 0,
    alternation_prob: 0,
};

/// Bodies mixing literals, classes, groups, quantifiers and alternation
pub const COMPLEX_PROFILE: RegexProfile = RegexProfile {
    structure: [60, 30, 10],
    literals: None,
    classes: Some([20, 20, 40, 20]),
    repetition_prob: 50,
    alternation_prob: 30,
};

/// Produces the body of a content feature
pub trait RegexBodyGenerator {
    fn generate(
        &self,
        rng: &mut dyn RngCore,
        length: usize,
        secondary_length: usize,
        profile: &RegexProfile,
    ) -> String;
}

/// Default generator driven entirely by the profile weights
#[derive(Debug, Clone, Copy, Default)]
pub struct WeightedRegexGenerator;

impl RegexBodyGenerator for WeightedRegexGenerator {
    fn generate(
        &self,
        rng: &mut dyn RngCore,
        length: usize,
        secondary_length: usize,
        profile: &RegexProfile,
    ) -> String {
        let atoms = if length == 0 {
            rng.gen_range(1..=DEFAULT_MAX_ATOMS)
        } else {
            length
        };

        let mut body = String::new();
        for _ in 0..atoms {
            let atom = match pick_weighted(rng, &profile.structure) {
                0 => literal(rng, profile),
                1 => class(rng, profile),
                _ => group(rng, secondary_length, profile),
            };
            body.push_str(&atom);
            body.push_str(&quantifier(rng, profile));
        }
        body
    }
}

/// Index drawn by weight; falls back to uniform when every weight is zero
fn pick_weighted(rng: &mut dyn RngCore, weights: &[u32]) -> usize {
    match WeightedIndex::new(weights) {
        Ok(dist) => dist.sample(rng),
        Err(_) => rng.gen_range(0..weights.len()),
    }
}

fn pick_byte(rng: &mut dyn RngCore, set: &[u8]) -> char {
    set[rng.gen_range(0..set.len())] as char
}

fn literal(rng: &mut dyn RngCore, profile: &RegexProfile) -> String {
    let category = match &profile.literals {
        Some(weights) => pick_weighted(rng, weights),
        None => rng.gen_range(0..5),
    };
    match category {
        0 => pick_byte(rng, LOWERCASE).to_string(),
        1 => pick_byte(rng, UPPERCASE).to_string(),
        2 => pick_byte(rng, DIGITS).to_string(),
        3 => regex::escape(&pick_byte(rng, PUNCTUATION).to_string()),
        _ => format!("\\x{:02x}", rng.gen::<u8>()),
    }
}

fn class(rng: &mut dyn RngCore, profile: &RegexProfile) -> String {
    let kind = match &profile.classes {
        Some(weights) => pick_weighted(rng, weights),
        None => rng.gen_range(0..4),
    };
    match kind {
        0 => "\\d".to_string(),
        1 => "\\w".to_string(),
        2 => "\\s".to_string(),
        _ => bracket_set(rng),
    }
}

/// `[c-f]`, `[A-Q]` or `[2-7]` style set with an ordered range
fn bracket_set(rng: &mut dyn RngCore) -> String {
    let set = match rng.gen_range(0..3) {
        0 => LOWERCASE,
        1 => UPPERCASE,
        _ => DIGITS,
    };
    let start = rng.gen_range(0..set.len());
    let end = rng.gen_range(start..set.len());
    format!("[{}-{}]", set[start] as char, set[end] as char)
}

/// Parenthesized run of literal/class atoms, optionally with two branches
fn group(rng: &mut dyn RngCore, secondary_length: usize, profile: &RegexProfile) -> String {
    let branches = if rng.gen_range(0..100) < profile.alternation_prob { 2 } else { 1 };
    let mut parts = Vec::with_capacity(branches);
    for _ in 0..branches {
        let atoms = if secondary_length == 0 {
            rng.gen_range(1..=DEFAULT_MAX_GROUP_ATOMS)
        } else {
            secondary_length
        };
        let mut part = String::new();
        for _ in 0..atoms {
            if pick_weighted(rng, &profile.structure[..2]) == 0 {
                part.push_str(&literal(rng, profile));
            } else {
                part.push_str(&class(rng, profile));
            }
            part.push_str(&quantifier(rng, profile));
        }
        parts.push(part);
    }
    format!("({})", parts.join("|"))
}

fn quantifier(rng: &mut dyn RngCore, profile: &RegexProfile) -> String {
    if profile.repetition_prob == 0 || rng.gen_range(0..100) >= profile.repetition_prob {
        return String::new();
    }
    match rng.gen_range(0..5) {
        0 => "*".to_string(),
        1 => "+".to_string(),
        2 => "?".to_string(),
        3 => format!("{{{}}}", rng.gen_range(1..=MAX_REPEAT)),
        _ => {
            let low = rng.gen_range(0..MAX_REPEAT);
            let high = rng.gen_range(low + 1..=MAX_REPEAT);
            format!("{{{},{}}}", low, high)
        }
    }
}
