pub mod model;
pub mod store;

pub use model::{Index, Point, Source};
pub use store::{IndexStore, Snapshot};
