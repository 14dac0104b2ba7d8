pub mod avoidance;
pub mod caps;
pub mod coverage;
pub mod daily;
pub mod spacing;
