// Domain layer - Core composition types and policies

pub mod errors;
pub mod model;
pub mod rules;
