//! Picking skills out of listings by number, the way the menu asks for them.

/// Zero-based indices for the in-range numbers in a "1,3,5" style answer.
/// Anything that is not a number is skipped.
pub fn parse_indices(input: &str, len: usize) -> Vec<usize> {
    input
        .split(',')
        .filter_map(|part| part.trim().parse::<usize>().ok())
        .filter(|&n| n >= 1 && n <= len)
        .map(|n| n - 1)
        .collect()
}

/// Skills chosen so far, in the order they were picked.
#[derive(Debug, Clone)]
pub struct Selection<T> {
    items: Vec<T>,
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Clone> Selection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_all(&mut self, listing: &[T]) -> usize {
        self.items.extend_from_slice(listing);
        listing.len()
    }

    /// Add the listing entries named by `input`; returns how many were added.
    pub fn add_picked(&mut self, listing: &[T], input: &str) -> usize {
        let picked = parse_indices(input, listing.len());
        for &i in &picked {
            self.items.push(listing[i].clone());
        }
        picked.len()
    }

    /// Remove the selected entries named by `input`, highest position first.
    pub fn remove_picked(&mut self, input: &str) -> Vec<T> {
        let mut picked = parse_indices(input, self.items.len());
        picked.sort_unstable_by(|a, b| b.cmp(a));
        picked.dedup();
        picked.into_iter().map(|i| self.items.remove(i)).collect()
    }

    /// Keep only the entries `keep` accepts; returns how many were dropped.
    pub fn retain(&mut self, keep: impl FnMut(&T) -> bool) -> usize {
        let before = self.items.len();
        self.items.retain(keep);
        before - self.items.len()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_indices() {
        assert_eq!(parse_indices("1,3,5", 5), vec![0, 2, 4]);
        assert_eq!(parse_indices(" 2 , x, 9, 0 ,1", 3), vec![1, 0]);
        assert!(parse_indices("", 3).is_empty());
        assert!(parse_indices("all", 3).is_empty());
    }

    #[test]
    fn test_add_picked_skips_out_of_range() {
        let listing = vec!["a", "b", "c"];
        let mut selection = Selection::new();
        assert_eq!(selection.add_picked(&listing, "3,1,7"), 2);
        assert_eq!(selection.as_slice(), &["c", "a"]);
    }

    #[test]
    fn test_add_all_keeps_duplicates() {
        let listing = vec!["a", "b"];
        let mut selection = Selection::new();
        selection.add_all(&listing);
        selection.add_picked(&listing, "1");
        assert_eq!(selection.as_slice(), &["a", "b", "a"]);
    }

    #[test]
    fn test_remove_picked_highest_first() {
        let mut selection = Selection::new();
        selection.add_all(&["a", "b", "c", "d"]);
        let removed = selection.remove_picked("1,3,3");
        assert_eq!(removed, vec!["c", "a"]);
        assert_eq!(selection.as_slice(), &["b", "d"]);
    }

    #[test]
    fn test_retain_drops_rejected_entries() {
        let mut selection = Selection::new();
        selection.add_all(&["a", "b", "a", "c"]);
        assert_eq!(selection.retain(|item| *item != "a"), 2);
        assert_eq!(selection.as_slice(), &["b", "c"]);
    }

    #[test]
    fn test_clear() {
        let mut selection = Selection::new();
        selection.add_all(&["a"]);
        assert!(!selection.is_empty());
        selection.clear();
        assert!(selection.is_empty());
        assert_eq!(selection.len(), 0);
    }
}
