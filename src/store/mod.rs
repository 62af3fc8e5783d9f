pub mod allocator;
pub mod label_map;
pub mod reverse;

pub use allocator::IdAllocator;
pub use label_map::LabelMap;
pub use reverse::ReverseIndex;
