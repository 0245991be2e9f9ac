//! SeaORM entity models

pub mod subscription;
pub mod tier_limit;
