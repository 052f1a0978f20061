use std::collections::HashSet;

use rand::Rng;

use crate::product::ProductId;

/// Upper bound (exclusive) of the random offset added to the clock value.
pub const RANDOM_SPAN: u64 = 10_000;

/// Ids already known to the caller, grown in place as new ids are handed out.
#[derive(Debug, Clone, Default)]
pub struct ExistingIds(HashSet<ProductId>);

impl ExistingIds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.0.contains(&id)
    }

    pub fn insert(&mut self, id: ProductId) -> bool {
        self.0.insert(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<ProductId> for ExistingIds {
    fn from_iter<I: IntoIterator<Item = ProductId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Hands out ids that collide with nothing in the borrowed set.
pub struct IdAllocator<'a> {
    existing: &'a mut ExistingIds,
    clock: Box<dyn FnMut() -> u64 + 'a>,
}

impl<'a> IdAllocator<'a> {
    pub fn new(existing: &'a mut ExistingIds) -> Self {
        Self::with_clock(existing, now_millis)
    }

    /// Allocator with a custom time source; used to force collisions in tests.
    pub fn with_clock(existing: &'a mut ExistingIds, clock: impl FnMut() -> u64 + 'a) -> Self {
        Self { existing, clock: Box::new(clock) }
    }

    pub fn allocate(&mut self) -> ProductId {
        let mut rng = rand::rng();
        loop {
            let candidate = (self.clock)().wrapping_add(rng.random_range(0..RANDOM_SPAN));
            if self.existing.insert(candidate) {
                return candidate;
            }
            log::trace!("id collision on {candidate}, retrying");
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn now_millis() -> u64 {
    chrono::Utc::now().timestamp_millis().max(0) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocated_ids_are_recorded() {
        let mut ids = ExistingIds::new();
        let a = IdAllocator::new(&mut ids).allocate();
        assert!(ids.contains(a));
        assert_eq!(ids.len(), 1);
    }

    #[test]
    fn retries_until_free_under_fixed_clock() {
        // Fixed clock: only RANDOM_SPAN candidates exist; fill all but one.
        let mut ids: ExistingIds = (1..RANDOM_SPAN).map(|o| 1_000 + o).collect();
        let id = IdAllocator::with_clock(&mut ids, || 1_000).allocate();
        assert_eq!(id, 1_000);
    }

    #[test]
    fn never_returns_an_existing_id() {
        let mut ids: ExistingIds = (0..500).collect();
        let before: Vec<_> = (0..500).collect();
        let mut alloc = IdAllocator::with_clock(&mut ids, || 0);
        let fresh: Vec<_> = (0..200).map(|_| alloc.allocate()).collect();
        for f in &fresh {
            assert!(!before.contains(f));
        }
        let unique: HashSet<_> = fresh.iter().collect();
        assert_eq!(unique.len(), fresh.len());
    }
}
