//! Fitness-stagnation termination.

/// Signals convergence once the best fitness has not improved for `window`
/// consecutive generations.
///
/// Feed it the best fitness at the end of every generation. The generation
/// that first reaches a value does not count as stagnant; each following
/// generation without a strict improvement does. With a window of `N`, a
/// run whose best first appears at generation `g` stops at `g + N`.
///
/// This is a convergence heuristic, not an optimality guarantee.
#[derive(Debug, Clone)]
pub struct StagnationTermination {
    window: usize,
    last_best: Option<f64>,
    stagnant: usize,
}

impl StagnationTermination {
    pub fn new(window: usize) -> Self {
        Self {
            window,
            last_best: None,
            stagnant: 0,
        }
    }

    /// Records one generation's best fitness and reports whether to stop.
    pub fn has_reached(&mut self, best_fitness: f64) -> bool {
        match self.last_best {
            Some(last) if best_fitness <= last => self.stagnant += 1,
            _ => {
                self.last_best = Some(best_fitness);
                self.stagnant = 0;
            }
        }
        self.stagnant >= self.window
    }

    /// Generations since the last improvement.
    pub fn stagnant_generations(&self) -> usize {
        self.stagnant
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Returns the 1-based generation at which termination fires.
    fn stop_generation(window: usize, sequence: &[f64]) -> Option<usize> {
        let mut term = StagnationTermination::new(window);
        sequence
            .iter()
            .position(|&f| term.has_reached(f))
            .map(|i| i + 1)
    }

    #[test]
    fn test_stops_window_generations_after_first_max() {
        // Max 900 first appears at generation 3.
        let seq = [100.0, 500.0, 900.0, 900.0, 900.0, 900.0, 900.0, 900.0];
        assert_eq!(stop_generation(4, &seq), Some(3 + 4));
    }

    #[test]
    fn test_not_before_window() {
        let seq = [900.0, 900.0, 900.0];
        assert_eq!(stop_generation(3, &seq), None);
        assert_eq!(stop_generation(2, &seq), Some(3));
    }

    #[test]
    fn test_improvement_resets_counter() {
        let mut term = StagnationTermination::new(2);
        assert!(!term.has_reached(10.0));
        assert!(!term.has_reached(10.0));
        assert_eq!(term.stagnant_generations(), 1);
        assert!(!term.has_reached(11.0));
        assert_eq!(term.stagnant_generations(), 0);
        assert!(!term.has_reached(11.0));
        assert!(term.has_reached(11.0));
    }

    #[test]
    fn test_window_one() {
        let seq = [5.0, 6.0, 6.0];
        assert_eq!(stop_generation(1, &seq), Some(3));
    }
}
