pub mod catalog;
pub mod history;
pub mod recommendations;

pub use recommendations::{RecommendationService, RecommendationSettings};
