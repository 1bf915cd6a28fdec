mod collision;

pub use collision::{AnalyzeCollisions, CollisionReport, COLLISION_BINS, DEPTH_EPSILON};
