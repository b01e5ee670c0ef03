mod transformer;

pub use transformer::transform;
