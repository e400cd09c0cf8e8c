pub mod criteria;
pub mod error;
pub mod normalize;
