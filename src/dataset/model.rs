//! Record types served by the viewer API.
//!
//! Every record serializes as a JSON object whose keys follow the field
//! declaration order below.

use std::collections::BTreeMap;

use serde::Serialize;

/// Class-id to class-name mapping, ordered by id.
pub type ClassMap = BTreeMap<u32, String>;

/// A single class definition from `classes.txt`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ClassItem {
    /// 0-based line position in the classes file.
    pub id: u32,

    /// Class name, or `class_<id>` for a blank line.
    pub name: String,
}

impl ClassItem {
    /// Creates a new class item.
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// A bounding box in normalized center/size form.
///
/// Coordinates are expected in `0..=1` but the range is not enforced, so
/// labels produced by sloppy tools still load.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BoundingBox {
    pub cx: f64,
    pub cy: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    /// Creates a new box from center and size.
    #[inline]
    pub fn from_cxcywh(cx: f64, cy: f64, width: f64, height: f64) -> Self {
        Self {
            cx,
            cy,
            width,
            height,
        }
    }

    /// Projects the box onto an image of the given pixel dimensions.
    pub fn to_pixels(&self, image_width: f64, image_height: f64) -> PixelBox {
        let width = self.width * image_width;
        let height = self.height * image_height;
        PixelBox {
            left: self.cx * image_width - width / 2.0,
            top: self.cy * image_height - height / 2.0,
            width,
            height,
        }
    }
}

/// A bounding box in pixel space, anchored at its top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PixelBox {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// One parsed row of a YOLO label file.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LabelItem {
    pub class_id: i64,

    /// Resolved through the class map; unknown ids read `class_<id>`.
    pub class_name: String,

    pub bbox: BoundingBox,

    /// Detection confidence, present only in prediction-style label files.
    pub confidence: Option<f64>,
}

/// An image file in the dataset's `images/` directory.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ImageItem {
    /// Filename stem, used as the join key to `labels/<id>.txt`.
    pub id: String,

    /// Full filename including extension.
    pub filename: String,
}

impl ImageItem {
    /// Creates a new image item.
    pub fn new(id: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            filename: filename.into(),
        }
    }
}

/// A label row projected into the pixel space of its image.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OverlayBox {
    pub class_id: i64,
    pub class_name: String,
    pub confidence: Option<f64>,
    #[serde(rename = "box")]
    pub pixel_box: PixelBox,
}

/// All labels of one image, ready to draw over it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ImageOverlay {
    pub image_id: String,
    pub filename: String,
    pub width: u32,
    pub height: u32,
    pub boxes: Vec<OverlayBox>,
}

/// Resolves a class id to its display name.
///
/// Missing ids never fail; they fall back to `class_<id>`.
pub fn class_name_for(classes: &ClassMap, class_id: i64) -> String {
    u32::try_from(class_id)
        .ok()
        .and_then(|id| classes.get(&id))
        .cloned()
        .unwrap_or_else(|| placeholder_class_name(class_id))
}

pub(crate) fn placeholder_class_name(index: impl std::fmt::Display) -> String {
    format!("class_{}", index)
}
