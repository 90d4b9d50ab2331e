pub mod config;
pub mod corpus;
pub mod demo;
pub mod error;
pub mod intent;
pub mod normalize;
