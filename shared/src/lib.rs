use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone)]
pub struct ProcessImageRequest {
    pub image: String,
}

/// One predicted object instance. `bounding_box` is `[x1, y1, x2, y2]` in
/// pixel coordinates of the submitted image, with `x1 < x2` and `y1 < y2`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Detection {
    pub class_id: i64,
    pub confidence: f32,
    pub bounding_box: [f32; 4],
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DetectionsResponse {
    pub detections: Vec<Detection>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detection_serializes_with_wire_field_names() {
        let detection = Detection {
            class_id: 7,
            confidence: 0.92,
            bounding_box: [10.0, 20.0, 30.0, 40.0],
        };

        let value = serde_json::to_value(&detection).unwrap();
        assert_eq!(value["class_id"], 7);
        assert!((value["confidence"].as_f64().unwrap() - 0.92).abs() < 1e-6);
        assert_eq!(value["bounding_box"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn request_parses_from_json_body() {
        let request: ProcessImageRequest =
            serde_json::from_str(r#"{"image": "aGVsbG8="}"#).unwrap();
        assert_eq!(request.image, "aGVsbG8=");
    }
}
