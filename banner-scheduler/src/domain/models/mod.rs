mod ids;
mod item;
mod update;

pub use ids::*;
pub use item::*;
pub use update::*;
