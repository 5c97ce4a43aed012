// Content feature for sigfeat
// Body synthesis is delegated to a RegexBodyGenerator

use super::{clamp_complexity, roll_complexity};
use crate::regex_gen::{RegexBodyGenerator, COMPLEX_PROFILE, SIMPLE_PROFILE};
use rand::Rng;
use serde::Serialize;

pub const DEFAULT_CONTENT_NAME: &str = "content";

/// Secondary length handed to the body generator
const SECONDARY_LENGTH: usize = 0;

/// Renders `name=<body>` or `name=/<body>/<flags>` when `regex` is set
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentFeature {
    pub name: String,
    pub regex: bool,
    pub complexity_prob: u8,
    pub length: usize,
}

impl Default for ContentFeature {
    fn default() -> Self {
        Self {
            name: DEFAULT_CONTENT_NAME.to_string(),
            regex: true,
            complexity_prob: 0,
            length: 0,
        }
    }
}

impl ContentFeature {
    pub fn new(name: impl Into<String>, regex: bool, complexity_prob: i64, length: usize) -> Self {
        Self {
            name: name.into(),
            regex,
            complexity_prob: clamp_complexity(complexity_prob),
            length,
        }
    }

    pub fn render<R: Rng>(&self, rng: &mut R, generator: &dyn RegexBodyGenerator) -> String {
        let complex = roll_complexity(rng, self.complexity_prob);
        let profile = if complex { &COMPLEX_PROFILE } else { &SIMPLE_PROFILE };

        let mut out = format!("{}=", self.name);
        if self.regex {
            out.push('/');
        }
        out.push_str(&generator.generate(&mut *rng, self.length, SECONDARY_LENGTH, profile));
        if self.regex {
            out.push('/');
            if complex {
                out.push_str(&regex_flags(rng.gen_range(0..=100)));
            }
        }
        out
    }
}

/// Flags for one percentage draw; each threshold reuses the same pick
fn regex_flags(pick: u8) -> String {
    let mut flags = String::new();
    if pick > 50 {
        flags.push('i');
    }
    if pick > 75 {
        flags.push('m');
    }
    if pick > 85 {
        flags.push('s');
    }
    flags
}
