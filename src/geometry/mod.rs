mod orientation;
mod plane;

pub use orientation::Orientation;
pub use plane::Plane;
