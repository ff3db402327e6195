use std::sync::atomic::{AtomicU64, Ordering};

use crate::model::resource::ResourceBounds;

/// the sliding pair of cutoffs on the monotone resource shared by the
/// two directional searches. `HF` caps how far forward labels may
/// advance and only decreases; `HB` floors backward labels and only
/// increases. when the window closes neither side can move and the
/// coordinator proceeds to the join phase.
///
/// each direction writes only its own word, so relaxed ordering is
/// sufficient: readers may observe a stale value, which can only make
/// the window appear wider and never prunes a label incorrectly.
pub struct HalfwayPoint {
    forward_bits: AtomicU64,
    backward_bits: AtomicU64,
}

impl HalfwayPoint {
    pub fn new(bounds: &ResourceBounds) -> HalfwayPoint {
        HalfwayPoint {
            forward_bits: AtomicU64::new(bounds.monotone_upper().as_f64().to_bits()),
            backward_bits: AtomicU64::new(bounds.monotone_lower().as_f64().to_bits()),
        }
    }

    /// current forward cutoff `HF`
    pub fn forward_cutoff(&self) -> f64 {
        f64::from_bits(self.forward_bits.load(Ordering::Relaxed))
    }

    /// current backward cutoff `HB`
    pub fn backward_cutoff(&self) -> f64 {
        f64::from_bits(self.backward_bits.load(Ordering::Relaxed))
    }

    /// raise `HB` after the forward search advanced to a label with
    /// monotone resource `x`: `HB <- max(HB, min(x, HF))`
    pub fn raise_backward(&self, x: f64) {
        let next = self.backward_cutoff().max(x.min(self.forward_cutoff()));
        self.backward_bits
            .store(next.to_bits(), Ordering::Relaxed);
    }

    /// lower `HF` after the backward search advanced to a label with
    /// monotone resource `y`: `HF <- min(HF, max(y, HB))`
    pub fn lower_forward(&self, y: f64) {
        let next = self.forward_cutoff().min(y.max(self.backward_cutoff()));
        self.forward_bits.store(next.to_bits(), Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_window_matches_bounds() {
        let halfway = HalfwayPoint::new(&ResourceBounds::new(&[4.0, 20.0], &[1.0, 0.0]));
        assert_eq!(halfway.forward_cutoff(), 4.0);
        assert_eq!(halfway.backward_cutoff(), 1.0);
    }

    #[test]
    fn test_cutoffs_are_monotone() {
        let halfway = HalfwayPoint::new(&ResourceBounds::new(&[10.0], &[0.0]));
        halfway.raise_backward(3.0);
        assert_eq!(halfway.backward_cutoff(), 3.0);
        halfway.raise_backward(1.0);
        assert_eq!(halfway.backward_cutoff(), 3.0);
        halfway.lower_forward(7.0);
        assert_eq!(halfway.forward_cutoff(), 7.0);
        halfway.lower_forward(9.0);
        assert_eq!(halfway.forward_cutoff(), 7.0);
    }

    #[test]
    fn test_updates_clamp_to_the_window() {
        let halfway = HalfwayPoint::new(&ResourceBounds::new(&[10.0], &[0.0]));
        halfway.lower_forward(4.0);
        // a forward advance past HF cannot push HB beyond HF
        halfway.raise_backward(8.0);
        assert_eq!(halfway.backward_cutoff(), 4.0);
        // a backward advance below HB cannot pull HF under HB
        halfway.lower_forward(1.0);
        assert_eq!(halfway.forward_cutoff(), 4.0);
    }
}
