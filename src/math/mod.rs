pub mod interpolate;

/// 2D point type. In contour space `x` is the horizontal (time) coordinate
/// and `y` is depth.
pub type Point2 = nalgebra::Point2<f64>;

/// 3D point type. `y` is the vertical (slicing) axis, `z` is depth.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// 2D rotation type.
pub type Rotation2 = nalgebra::Rotation2<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Tolerance for a vertex lying on a slice plane.
pub const PLANE_EPSILON: f64 = 1e-5;
