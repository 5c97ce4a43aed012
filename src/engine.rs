// Record engine for sigfeat
// Owns a seeded RNG and renders one token per feature for each record

use crate::models::Feature;
use crate::regex_gen::{RegexBodyGenerator, WeightedRegexGenerator};
use log::warn;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Renders whole records from a feature set.
///
/// Each engine owns its generator, so engines on different threads never
/// share random state. Seeded engines are reproducible.
pub struct RecordEngine {
    features: Vec<Feature>,
    rng: StdRng,
    regex: Box<dyn RegexBodyGenerator + Send>,
}

impl RecordEngine {
    /// Engine seeded from OS entropy
    pub fn new(features: Vec<Feature>) -> Self {
        Self::from_rng(features, StdRng::from_entropy())
    }

    pub fn with_seed(features: Vec<Feature>, seed: u64) -> Self {
        Self::from_rng(features, StdRng::seed_from_u64(seed))
    }

    fn from_rng(features: Vec<Feature>, rng: StdRng) -> Self {
        Self {
            features,
            rng,
            regex: Box::new(WeightedRegexGenerator),
        }
    }

    /// Swap the body generator used by content features
    pub fn with_regex_generator(mut self, regex: impl RegexBodyGenerator + Send + 'static) -> Self {
        self.regex = Box::new(regex);
        self
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    /// Render every feature once, in declaration order.
    ///
    /// Features that fail to render are logged and left out of the record.
    pub fn next_record(&mut self) -> Vec<String> {
        let mut record = Vec::with_capacity(self.features.len());
        for feature in &self.features {
            match feature.render_with(&mut self.rng, self.regex.as_ref()) {
                Ok(token) => record.push(token),
                Err(e) => warn!("Skipping feature '{}': {}", feature.name(), e),
            }
        }
        record
    }

    pub fn records(&mut self, count: usize) -> Vec<Vec<String>> {
        (0..count).map(|_| self.next_record()).collect()
    }
}
