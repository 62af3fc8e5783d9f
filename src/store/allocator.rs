use crate::types::{IdType, LabelId};

/// Sequential identifier counter.
///
/// Advances once per inserted label, including labels whose id came from a
/// source table, so the counter tracks insertions rather than the ids handed
/// out.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// The id the next auto-assigned label would receive.
    pub fn peek(&self, id_type: IdType) -> LabelId {
        id_type.cast(self.next)
    }

    pub fn advance(&mut self) {
        self.next += 1;
    }

    pub fn value(&self) -> u64 {
        self.next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero_and_advances() {
        let mut alloc = IdAllocator::new();
        assert_eq!(alloc.peek(IdType::Int), LabelId::Int(0));
        alloc.advance();
        alloc.advance();
        assert_eq!(alloc.value(), 2);
        assert!(matches!(alloc.peek(IdType::Float), LabelId::Float(f) if f == 2.0));
    }

    #[test]
    fn instances_do_not_share_state() {
        let mut a = IdAllocator::new();
        a.advance();
        let b = IdAllocator::new();
        assert_eq!(b.value(), 0, "a fresh allocator must start from zero");
    }
}
