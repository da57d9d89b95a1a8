use actix_web::{web, HttpResponse};
use log::error;
use serde::Serialize;
use serde_json::json;

use shared::{Detection, DetectionsResponse, ProcessImageRequest};

use crate::inference::decode::{decode_base64_image, DecodeError};
use crate::inference::{Detector, InferenceError};

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, thiserror::Error)]
enum ProcessError {
    #[error("malformed request body: {0}")]
    Request(#[from] serde_json::Error),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Inference(#[from] InferenceError),
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/process-image").route(web::post().to(process_image)))
        .service(web::resource("/health").route(web::get().to(health)));
}

async fn process_image(detector: web::Data<dyn Detector>, body: web::Bytes) -> HttpResponse {
    match run_detection(detector.get_ref(), &body) {
        Ok(detections) => HttpResponse::Ok().json(DetectionsResponse { detections }),
        Err(e) => {
            error!("Failed to process image: {e}");
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to process image".into(),
            })
        }
    }
}

// The body is parsed here rather than through the Json extractor so a
// malformed request takes the same error path as every later stage.
fn run_detection(detector: &dyn Detector, body: &[u8]) -> Result<Vec<Detection>, ProcessError> {
    let request: ProcessImageRequest = serde_json::from_slice(body)?;
    let image = decode_base64_image(&request.image)?;
    Ok(detector.detect(&image)?)
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
