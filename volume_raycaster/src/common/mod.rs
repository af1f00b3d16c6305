mod bound_box;
mod ray;
mod value_range;

pub use bound_box::{BoundBox, Face};
pub use ray::{Ray, RaySegment, SampleIter};
pub use value_range::ValueRange;
