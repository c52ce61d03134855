pub mod hybrid;
pub mod weights;

#[cfg(test)]
mod tests;

pub use hybrid::*;
pub use weights::*;
