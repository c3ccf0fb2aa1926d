//! The viewer's HTTP routes.
//!
//! | method | path                     | body                          |
//! |--------|--------------------------|-------------------------------|
//! | GET    | `/api/classes`           | `[{id, name}]`                |
//! | GET    | `/api/images`            | `[{id, filename}]`            |
//! | GET    | `/api/image/{image_id}`  | raw image bytes               |
//! | GET    | `/api/label/{image_id}`  | `[{class_id, class_name, bbox, confidence}]` |
//! | GET    | `/api/overlay/{image_id}`| labels projected to pixels    |
//!
//! Failures are `{"detail": "..."}` with 404 for unknown images or label
//! files, 400 for malformed label files and 500 otherwise.

use tracing::info;

use crate::dataset::Dataset;
use crate::router::{HttpError, PathParams, Reply, Router, RouterBuilder};

/// Builds the route table served for a dataset.
pub fn router() -> Router<Dataset> {
    RouterBuilder::new()
        .on_startup(validate_dataset)
        .get("/api/classes", list_classes)
        .get("/api/images", list_images)
        .get("/api/image/{image_id}", get_image)
        .get("/api/label/{image_id}", get_label)
        .get("/api/overlay/{image_id}", get_overlay)
        .build()
}

fn validate_dataset(dataset: &Dataset) -> Result<(), crate::ViewerError> {
    dataset.ensure_structure()?;
    info!(root = %dataset.root().display(), "dataset layout ok");
    Ok(())
}

fn list_classes(dataset: &Dataset, _params: &PathParams) -> Result<Reply, HttpError> {
    Reply::json(&dataset.list_classes()?)
}

fn list_images(dataset: &Dataset, _params: &PathParams) -> Result<Reply, HttpError> {
    Reply::json(&dataset.list_images()?)
}

fn get_image(dataset: &Dataset, params: &PathParams) -> Result<Reply, HttpError> {
    let path = dataset.resolve_image_path(image_id(params)?)?;
    Ok(Reply::file(path))
}

fn get_label(dataset: &Dataset, params: &PathParams) -> Result<Reply, HttpError> {
    let classes = dataset.load_classes()?;
    Reply::json(&dataset.load_labels(image_id(params)?, &classes)?)
}

fn get_overlay(dataset: &Dataset, params: &PathParams) -> Result<Reply, HttpError> {
    let classes = dataset.load_classes()?;
    Reply::json(&dataset.load_overlay(image_id(params)?, &classes)?)
}

fn image_id(params: &PathParams) -> Result<&str, HttpError> {
    params.get("image_id").ok_or_else(HttpError::internal)
}
