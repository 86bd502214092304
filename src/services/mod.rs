pub mod export;
pub mod normalizer;
pub mod sequence;
pub mod upload;
