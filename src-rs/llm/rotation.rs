use std::sync::atomic::{AtomicUsize, Ordering};

/// Hands out API keys in turn so consecutive refreshes spread across them.
pub struct Rotator {
    keys: Vec<String>,
    next: AtomicUsize,
}

impl Rotator {
    pub fn new(keys: Vec<String>) -> Self {
        Self {
            keys,
            next: AtomicUsize::new(0),
        }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn next(&self) -> Option<&str> {
        if self.keys.is_empty() {
            return None;
        }
        let idx = self.next.fetch_add(1, Ordering::Relaxed);
        Some(self.keys[idx % self.keys.len()].as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycles_through_keys() {
        let rotator = Rotator::new(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(rotator.next(), Some("a"));
        assert_eq!(rotator.next(), Some("b"));
        assert_eq!(rotator.next(), Some("a"));
    }

    #[test]
    fn empty_rotator_yields_nothing() {
        let rotator = Rotator::new(Vec::new());
        assert!(rotator.is_empty());
        assert_eq!(rotator.next(), None);
    }
}
