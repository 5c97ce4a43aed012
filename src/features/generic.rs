// Generic numeric feature for sigfeat

use super::{clamp_complexity, roll_complexity};
use crate::models::Bounds;
use crate::notation::AmbiguousNotation;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

/// Renders `name=<N>` with `N` drawn from the bounds, or one of the
/// ambiguity notations when the complexity roll succeeds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenericFeature {
    pub name: String,
    pub bounds: Bounds,
    pub complexity_prob: u8,
    pub ambiguity_list: Vec<AmbiguousNotation>,
}

impl GenericFeature {
    pub fn new(
        name: impl Into<String>,
        lower_bound: i64,
        upper_bound: i64,
        complexity_prob: i64,
        ambiguity_list: Vec<AmbiguousNotation>,
    ) -> Self {
        Self {
            name: name.into(),
            bounds: Bounds::new(lower_bound, upper_bound),
            complexity_prob: clamp_complexity(complexity_prob),
            ambiguity_list,
        }
    }

    pub fn render<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        let value = if !self.ambiguity_list.is_empty() && roll_complexity(rng, self.complexity_prob) {
            self.ambiguity_list
                .choose(rng)
                .map(|notation| notation.render(rng))
                .unwrap_or_default()
        } else {
            self.bounds.sample(rng).to_string()
        };
        format!("{}={}", self.name, value)
    }
}
