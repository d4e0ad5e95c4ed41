//! Opaque id generation.

use chrono::Utc;

/// Hands out unique string ids derived from the creation time in
/// milliseconds. Two ids minted in the same millisecond are kept apart by
/// bumping the later one, so ids never repeat and always increase.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: i64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint the next id.
    pub fn next_id(&mut self) -> String {
        let now = Utc::now().timestamp_millis();
        self.last = if now > self.last { now } else { self.last + 1 };
        self.last.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_are_unique_and_increasing() {
        let mut ids = IdGenerator::new();
        let minted: Vec<i64> = (0..500).map(|_| ids.next_id().parse().unwrap()).collect();
        assert!(minted.windows(2).all(|w| w[0] < w[1]));
        let unique: HashSet<_> = minted.iter().collect();
        assert_eq!(unique.len(), minted.len());
    }
}
