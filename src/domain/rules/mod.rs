// Domain rules - Pacing and admission policies

use crate::domain::errors::*;


/// Uniform pacing: the total duration is split into equal windows by count,
/// independent of clip length or text length. Clip slices and subtitle cues
/// both follow this rule, so they stay in lockstep when counts match.
pub struct UniformDivision;

impl UniformDivision {
    /// Length of one window; zero when there is nothing to divide into
    pub fn window(total: f64, count: usize) -> f64 {
        if count == 0 {
            0.0
        } else {
            total / count as f64
        }
    }

    /// Contiguous `[start, end)` windows covering `[0, total]`.
    ///
    /// Boundaries are computed as `i * window`, so `windows[i].1 == windows[i + 1].0`
    /// holds exactly; the last end is pinned to `total` to absorb rounding.
    pub fn windows(total: f64, count: usize) -> Vec<(f64, f64)> {
        let window = Self::window(total, count);
        (0..count)
            .map(|i| {
                let start = i as f64 * window;
                let end = if i + 1 == count {
                    total
                } else {
                    (i + 1) as f64 * window
                };
                (start, end)
            })
            .collect()
    }
}

/// Admission rule for the clip list
pub struct ClipCountRule {
    pub minimum: usize,
}

impl ClipCountRule {
    pub fn new(minimum: usize) -> Self {
        // A composition without clips has nothing to concatenate
        Self {
            minimum: minimum.max(1),
        }
    }

    pub fn check(&self, found: usize) -> Result<(), DomainError> {
        if found < self.minimum {
            return Err(DomainError::InsufficientClips {
                found,
                required: self.minimum,
            });
        }
        Ok(())
    }
}

impl Default for ClipCountRule {
    fn default() -> Self {
        Self::new(1)
    }
}
