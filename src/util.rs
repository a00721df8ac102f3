// Utility helpers shared by the engine and the UI

/// Source of uniform randomness for the game rules.
pub trait Dice {
    /// Uniform real in [0, 1).
    fn unit(&mut self) -> f64;

    fn chance(&mut self, p: f64) -> bool {
        self.unit() < p
    }

    /// Uniform integer in `min..=max`.
    fn range(&mut self, min: u32, max: u32) -> u32 {
        if max <= min {
            return min;
        }
        let span = (max - min + 1) as f64;
        let offset = (self.unit() * span).floor() as u32;
        min + offset.min(max - min)
    }
}

/// `Math.random()` backed dice for the browser build.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserDice;

impl Dice for BrowserDice {
    fn unit(&mut self) -> f64 {
        js_sys::Math::random()
    }
}

pub fn format_pct(pct: f64) -> String {
    format!("{:.2}%", pct.clamp(0.0, 100.0))
}


#[cfg(test)]
mod tests {
    use super::testing::ScriptedDice;
    use super::*;

    #[test]
    fn range_covers_both_ends() {
        let mut dice = ScriptedDice::new([0.0, 0.999_999, 0.5]);
        assert_eq!(dice.range(8, 14), 8);
        assert_eq!(dice.range(8, 14), 14);
        assert_eq!(dice.range(8, 14), 11);
    }

    #[test]
    fn range_with_collapsed_bounds_returns_min() {
        let mut dice = ScriptedDice::new([0.7]);
        assert_eq!(dice.range(3, 3), 3);
        assert_eq!(dice.range(5, 1), 5);
    }

    #[test]
    fn chance_is_strict() {
        let mut dice = ScriptedDice::new([0.0, 0.14]);
        assert!(!dice.chance(0.0));
        assert!(!dice.chance(0.14));
    }

    #[test]
    fn pct_formatting() {
        assert_eq!(format_pct(50.0), "50.00%");
        assert_eq!(format_pct(140.0), "100.00%");
    }
}
