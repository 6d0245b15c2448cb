// src/stats.rs

/// A statistic's text split around its number, e.g. `"150+"` is
/// `("", 150, "+")`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatText {
    pub prefix: String,
    pub target: u64,
    pub suffix: String,
}

impl StatText {
    /// `None` when the text has no digits or the number does not fit.
    pub fn parse(text: &str) -> Option<Self> {
        let first = text.find(|c: char| c.is_ascii_digit())?;
        let last = text.rfind(|c: char| c.is_ascii_digit())?;
        let digits: String = text[first..=last]
            .chars()
            .filter(|c| c.is_ascii_digit())
            .collect();
        let target = digits.parse::<u64>().ok()?;
        Some(Self {
            prefix: text[..first].to_string(),
            target,
            suffix: text[last + 1..].to_string(),
        })
    }

    pub fn render(&self, value: u64) -> String {
        format!("{}{}{}", self.prefix, value, self.suffix)
    }

    pub fn count_up(self, steps: u32) -> CountUp {
        CountUp {
            stat: self,
            steps: steps.max(1),
            step: 0,
        }
    }
}

/// Frames of the count-up animation: `floor(target * k / steps)` for
/// `k = 1..=steps`, so the last frame is exactly the target.
#[derive(Debug, Clone)]
pub struct CountUp {
    stat: StatText,
    steps: u32,
    step: u32,
}

impl CountUp {
    pub fn finished(&self) -> bool {
        self.step >= self.steps
    }

    pub fn value_at(&self, step: u32) -> u64 {
        let scaled = self.stat.target as u128 * step as u128 / self.steps as u128;
        scaled as u64
    }
}

impl Iterator for CountUp {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.step >= self.steps {
            return None;
        }
        self.step += 1;
        Some(self.stat.render(self.value_at(self.step)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_suffix() {
        let stat = StatText::parse("150+").unwrap();
        assert_eq!(stat.prefix, "");
        assert_eq!(stat.target, 150);
        assert_eq!(stat.suffix, "+");
    }

    #[test]
    fn test_parse_prefix_and_separators() {
        let stat = StatText::parse("+1,200 fans").unwrap();
        assert_eq!(stat.prefix, "+");
        assert_eq!(stat.target, 1200);
        assert_eq!(stat.suffix, " fans");
    }

    #[test]
    fn test_parse_without_digits() {
        assert_eq!(StatText::parse("∞"), None);
        assert_eq!(StatText::parse(""), None);
    }

    #[test]
    fn test_count_up_ends_on_target() {
        let frames: Vec<String> = StatText::parse("150+").unwrap().count_up(50).collect();
        assert_eq!(frames.len(), 50);
        assert_eq!(frames.last().map(String::as_str), Some("150+"));
        assert!(frames.iter().all(|f| f.ends_with('+')));
    }

    #[test]
    fn test_count_up_is_non_decreasing() {
        let frames: Vec<u64> = StatText::parse("150+")
            .unwrap()
            .count_up(50)
            .map(|f| f.trim_end_matches('+').parse().unwrap())
            .collect();
        assert!(frames.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(frames[0], 3);
    }

    #[test]
    fn test_small_target() {
        let frames: Vec<String> = StatText::parse("7").unwrap().count_up(50).collect();
        assert_eq!(frames.first().map(String::as_str), Some("0"));
        assert_eq!(frames.last().map(String::as_str), Some("7"));
    }

    #[test]
    fn test_zero_steps_still_finishes() {
        let mut count = StatText::parse("12%").unwrap().count_up(0);
        assert!(!count.finished());
        assert_eq!(count.next().as_deref(), Some("12%"));
        assert!(count.finished());
        assert_eq!(count.next(), None);
    }
}
