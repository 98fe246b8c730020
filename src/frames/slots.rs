//! Sparse, growable per-frame storage.

/// A sequence indexed by frame number in which any slot may be unfilled.
///
/// Files are discovered in arbitrary order, so the sequence grows to fit
/// the highest index seen and leaves gaps as `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameSlots<T> {
    slots: Vec<Option<T>>,
}

impl<T> Default for FrameSlots<T> {
    fn default() -> Self {
        Self { slots: Vec::new() }
    }
}

impl<T> FrameSlots<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill a slot, growing the sequence if needed. An existing value is
    /// replaced.
    pub fn set(&mut self, index: usize, value: T) {
        if self.slots.len() <= index {
            self.slots.resize_with(index + 1, || None);
        }
        self.slots[index] = Some(value);
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// Number of slots, filled or not.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// False for unfilled slots and for indices past the end.
    pub fn is_filled(&self, index: usize) -> bool {
        self.get(index).is_some()
    }

    pub fn filled_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Indices of unfilled slots.
    pub fn missing(&self) -> impl Iterator<Item = usize> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_none())
            .map(|(i, _)| i)
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<&T>> + '_ {
        self.slots.iter().map(Option::as_ref)
    }
}
