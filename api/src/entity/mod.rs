//! SeaORM entity definitions

pub mod snapshots;
