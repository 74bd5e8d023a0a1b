//! Positional result storage shared by the ordered map variants.

/// One slot per dispatched item plus the count of slots still empty
///
/// Owned by a single map invocation; slot `i` belongs to the item that was
/// at index `i` when the invocation took its snapshot.
#[derive(Debug)]
pub(crate) struct ResultSlots<R> {
    slots: Vec<Option<R>>,
    pending: usize,
}

impl<R> ResultSlots<R> {
    pub(crate) fn new(len: usize) -> Self {
        Self {
            slots: std::iter::repeat_with(|| None).take(len).collect(),
            pending: len,
        }
    }

    /// Store the result for `index`
    ///
    /// A second value for the same index replaces the first without
    /// counting twice.
    pub(crate) fn fill(&mut self, index: usize, value: R) {
        if let Some(slot) = self.slots.get_mut(index)
            && slot.replace(value).is_none()
        {
            self.pending -= 1;
        }
    }

    pub(crate) fn is_full(&self) -> bool {
        self.pending == 0
    }

    /// Move the results out in index order
    pub(crate) fn take(&mut self) -> Vec<R> {
        debug_assert!(self.is_full(), "results taken with {} slots empty", self.pending);
        std::mem::take(&mut self.slots).into_iter().flatten().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_order_fill() {
        let mut slots = ResultSlots::new(3);
        slots.fill(2, "c");
        slots.fill(0, "a");
        assert!(!slots.is_full());

        slots.fill(1, "b");
        assert!(slots.is_full());
        assert_eq!(slots.take(), ["a", "b", "c"]);
    }

    #[test]
    fn test_refill_does_not_double_count() {
        let mut slots = ResultSlots::new(2);
        slots.fill(0, 1);
        slots.fill(0, 2);
        assert!(!slots.is_full());
    }

    #[test]
    fn test_empty_is_full() {
        let mut slots: ResultSlots<u8> = ResultSlots::new(0);
        assert!(slots.is_full());
        assert!(slots.take().is_empty());
    }
}
