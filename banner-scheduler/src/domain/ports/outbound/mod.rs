#[cfg(test)]
mod mock;
mod schedule_store;

#[cfg(test)]
pub use mock::*;
pub use schedule_store::*;
