//! Canned counterpart replies.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Replies used when none are configured.
pub const DEFAULT_REPLIES: [&str; 4] = [
    "That's interesting!",
    "Cool, thanks for the update.",
    "Got it.",
    "Let's discuss this further on the call.",
];

/// Picks a reply uniformly at random from a fixed set.
#[derive(Debug, Clone)]
pub struct ReplyPicker {
    replies: Vec<String>,
    rng: StdRng,
}

impl ReplyPicker {
    /// Create a picker over `replies`.
    ///
    /// An empty set falls back to [`DEFAULT_REPLIES`]. With a seed the
    /// sequence of picks is reproducible; without one the generator is
    /// seeded from OS entropy.
    pub fn new(replies: Vec<String>, seed: Option<u64>) -> Self {
        let replies = if replies.is_empty() {
            default_replies()
        } else {
            replies
        };
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { replies, rng }
    }

    /// Picker over the default replies with a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(default_replies(), Some(seed))
    }

    /// Pick the next reply.
    pub fn pick(&mut self) -> String {
        let index = self.rng.gen_range(0..self.replies.len());
        self.replies[index].clone()
    }

    /// The full reply set.
    pub fn replies(&self) -> &[String] {
        &self.replies
    }

    /// Whether `text` belongs to the reply set.
    pub fn contains(&self, text: &str) -> bool {
        self.replies.iter().any(|r| r == text)
    }
}

impl Default for ReplyPicker {
    fn default() -> Self {
        Self::new(default_replies(), None)
    }
}

/// The default reply set as owned strings.
pub fn default_replies() -> Vec<String> {
    DEFAULT_REPLIES.iter().map(|r| (*r).to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_set_falls_back_to_defaults() {
        let picker = ReplyPicker::new(Vec::new(), Some(1));
        assert_eq!(picker.replies().len(), DEFAULT_REPLIES.len());
        assert!(picker.contains("Got it."));
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = ReplyPicker::seeded(42);
        let mut b = ReplyPicker::seeded(42);
        let left: Vec<String> = (0..16).map(|_| a.pick()).collect();
        let right: Vec<String> = (0..16).map(|_| b.pick()).collect();
        assert_eq!(left, right);
    }

    #[test]
    fn test_picks_stay_in_set() {
        let mut picker = ReplyPicker::new(vec!["only".into(), "two".into()], None);
        for _ in 0..32 {
            let reply = picker.pick();
            assert!(reply == "only" || reply == "two");
        }
    }

    #[test]
    fn test_all_replies_reachable() {
        let mut picker = ReplyPicker::seeded(7);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(picker.pick());
        }
        assert_eq!(seen.len(), DEFAULT_REPLIES.len());
    }
}
