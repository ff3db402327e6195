use serde::{Deserialize, Serialize};

use crate::model::unit::ResourceValue;

/// global lower and upper bounds on cumulative resource consumption.
/// `max_res[0]` doubles as the initial forward half-way cutoff and
/// `min_res[0]` as the initial backward cutoff.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ResourceBounds {
    pub max_res: Vec<ResourceValue>,
    pub min_res: Vec<ResourceValue>,
}

impl ResourceBounds {
    pub fn new(max_res: &[f64], min_res: &[f64]) -> ResourceBounds {
        ResourceBounds {
            max_res: max_res.iter().map(|r| ResourceValue(*r)).collect(),
            min_res: min_res.iter().map(|r| ResourceValue(*r)).collect(),
        }
    }

    /// number of resource dimensions covered by these bounds. when the
    /// two vectors disagree in length, validation rejects the bounds
    /// before any search is constructed.
    pub fn n_res(&self) -> usize {
        self.max_res.len()
    }

    /// true iff `min_res[i] <= res[i] <= max_res[i]` for all i
    pub fn contains(&self, res: &[ResourceValue]) -> bool {
        res.len() == self.max_res.len()
            && res.len() == self.min_res.len()
            && res
                .iter()
                .zip(self.max_res.iter())
                .all(|(r, max)| r <= max)
            && res
                .iter()
                .zip(self.min_res.iter())
                .all(|(r, min)| r >= min)
    }

    /// lower bounds used for prefix feasibility inside a directional
    /// search. nonzero lower bounds cannot bind on a partial path, so
    /// prefixes are checked against zero and the full input bounds are
    /// enforced on final and merged labels only.
    pub fn relaxed_min_res(&self) -> Vec<ResourceValue> {
        vec![ResourceValue::ZERO; self.min_res.len()]
    }

    pub fn monotone_upper(&self) -> ResourceValue {
        self.max_res[0]
    }

    pub fn monotone_lower(&self) -> ResourceValue {
        self.min_res[0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_is_componentwise() {
        let bounds = ResourceBounds::new(&[4.0, 20.0], &[0.0, 0.0]);
        assert!(bounds.contains(&[ResourceValue(4.0), ResourceValue(15.3)]));
        assert!(!bounds.contains(&[ResourceValue(4.1), ResourceValue(15.3)]));
        assert!(!bounds.contains(&[ResourceValue(-0.1), ResourceValue(0.0)]));
        assert!(!bounds.contains(&[ResourceValue(1.0)]));
    }
}
