pub mod decode;
pub mod model;

pub use model::{Detector, InferenceError, TorchDetector};
