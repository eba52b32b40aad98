pub mod edges;
pub mod morphology;
pub mod extraction;
pub mod simplification;

pub use edges::*;
pub use morphology::*;
pub use extraction::*;
pub use simplification::*;
