use std::path::Path;
use std::sync::{Arc, Mutex};

use image::RgbImage;
use tch::{CModule, Device, Kind, Tensor};

use shared::Detection;

/// Values per detection row emitted by the artifact:
/// x1, y1, x2, y2, confidence, class id.
const ROW_LEN: usize = 6;

#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    #[error("model error: {0}")]
    Model(#[from] tch::TchError),
    #[error("unexpected model output: {0}")]
    Output(String),
}

/// The detection capability consumed by the HTTP handlers. Runs
/// synchronously on the calling thread.
pub trait Detector: Send + Sync {
    fn detect(&self, image: &RgbImage) -> Result<Vec<Detection>, InferenceError>;
}

pub struct TorchDetector {
    module: Arc<Mutex<CModule>>,
    device: Device,
}

impl TorchDetector {
    /// Loads the TorchScript artifact once. The handle is shared read-only
    /// with every request afterwards and never reloaded.
    pub fn load(model_path: &Path) -> Result<Self, InferenceError> {
        let device = Device::cuda_if_available();
        let module = CModule::load_on_device(model_path, device)?;
        Ok(Self {
            module: Arc::new(Mutex::new(module)),
            device,
        })
    }
}

impl Detector for TorchDetector {
    fn detect(&self, image: &RgbImage) -> Result<Vec<Detection>, InferenceError> {
        let (width, height) = image.dimensions();
        let pixels = Tensor::from_slice(image.as_raw())
            .view([i64::from(height), i64::from(width), 3])
            .to_device(self.device);
        let output = self.module.lock().unwrap().forward_ts(&[pixels])?;
        rows_to_detections(&output)
    }
}

/// The artifact emits one `[x1, y1, x2, y2, confidence, class_id]` row per
/// candidate, already thresholded and suppressed internally. Rows are passed
/// through unmodified apart from the float/integer casts.
fn rows_to_detections(output: &Tensor) -> Result<Vec<Detection>, InferenceError> {
    let flat = output.to_kind(Kind::Float).view([-1]);
    let num_elements = flat.size()[0] as usize;
    if num_elements % ROW_LEN != 0 {
        return Err(InferenceError::Output(format!(
            "{num_elements} values cannot form rows of {ROW_LEN}"
        )));
    }

    let mut values = vec![0.0f32; num_elements];
    flat.copy_data(&mut values, num_elements);

    Ok(values
        .chunks_exact(ROW_LEN)
        .map(|row| Detection {
            class_id: row[5] as i64,
            confidence: row[4],
            bounding_box: [row[0], row[1], row[2], row[3]],
        })
        .collect())
}
