//! Object number allocation.
//!
//! One allocator per write pass. Numbers start at 1 (object 0 heads the xref
//! free list) and are never reused.

use crate::object::ObjectRef;

/// Issues strictly increasing object numbers.
#[derive(Debug, Clone)]
pub struct ObjectAllocator {
    next: u32,
}

impl ObjectAllocator {
    /// Create an allocator whose first number is 1.
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Allocate the next object number.
    pub fn allocate(&mut self) -> u32 {
        let id = self.next;
        self.next += 1;
        id
    }

    /// Allocate a number and return it as a generation-0 reference.
    pub fn allocate_ref(&mut self) -> ObjectRef {
        ObjectRef::new(self.allocate(), 0)
    }

    /// The number the next call to [`allocate`](Self::allocate) returns.
    ///
    /// This is the trailer's `/Size`: allocated objects plus the reserved object 0.
    pub fn next_number(&self) -> u32 {
        self.next
    }

    /// How many numbers have been issued.
    pub fn allocated(&self) -> u32 {
        self.next - 1
    }
}

impl Default for ObjectAllocator {
    fn default() -> Self {
        Self::new()
    }
}
