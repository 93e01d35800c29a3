//! Response normalization, ranking and batch orchestration

pub mod record;
pub mod normalizer;
pub mod ranker;
pub mod batch;
