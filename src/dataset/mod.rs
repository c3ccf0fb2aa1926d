//! Read-only access to a YOLO dataset directory.
//!
//! The expected layout under the dataset root is:
//!
//! ```text
//! classes.txt          one class name per line, 0-indexed by line number
//! images/<id>.<ext>    jpg, jpeg, png, bmp or webp (any case)
//! labels/<id>.txt      one YOLO box per line
//! ```
//!
//! Nothing is cached: every call goes back to the filesystem, so edits made
//! by an annotation tool show up on the next request.

pub mod label;
mod model;

pub use label::{parse_label_file, parse_label_line};
pub use model::{
    class_name_for, BoundingBox, ClassItem, ClassMap, ImageItem, ImageOverlay, LabelItem,
    OverlayBox, PixelBox,
};

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::ViewerError;
use model::placeholder_class_name;

/// Image extensions served by the viewer, compared case-insensitively.
pub const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "bmp", "webp"];

const LABEL_EXTENSION: &str = "txt";
const CLASSES_FILE: &str = "classes.txt";

/// Handle on a dataset root and the well-known paths beneath it.
#[derive(Clone, Debug)]
pub struct Dataset {
    root: PathBuf,
    images_dir: PathBuf,
    labels_dir: PathBuf,
    classes_file: PathBuf,
}

impl Dataset {
    /// Creates a handle rooted at `root`. The directory is not touched until
    /// one of the accessors runs.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            images_dir: root.join("images"),
            labels_dir: root.join("labels"),
            classes_file: root.join(CLASSES_FILE),
            root,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn images_dir(&self) -> &Path {
        &self.images_dir
    }

    pub fn labels_dir(&self) -> &Path {
        &self.labels_dir
    }

    pub fn classes_file(&self) -> &Path {
        &self.classes_file
    }

    /// Checks that the root, `images/` and `labels/` directories exist.
    pub fn ensure_structure(&self) -> Result<(), ViewerError> {
        if !self.root.exists() {
            return Err(ViewerError::DatasetNotFound {
                path: self.root.clone(),
            });
        }
        if !self.images_dir.exists() {
            return Err(ViewerError::ImagesDirMissing {
                path: self.images_dir.clone(),
            });
        }
        if !self.labels_dir.exists() {
            return Err(ViewerError::LabelsDirMissing {
                path: self.labels_dir.clone(),
            });
        }
        Ok(())
    }

    /// Reads `classes.txt` into an id-to-name map.
    ///
    /// Blank lines keep their slot and are named `class_<index>`.
    pub fn load_classes(&self) -> Result<ClassMap, ViewerError> {
        self.ensure_structure()?;

        if !self.classes_file.exists() {
            return Err(ViewerError::ClassesFileMissing {
                path: self.classes_file.clone(),
            });
        }

        let data = fs::read_to_string(&self.classes_file)?;
        let classes: ClassMap = data
            .lines()
            .enumerate()
            .map(|(idx, line)| {
                let name = line.trim();
                let name = if name.is_empty() {
                    placeholder_class_name(idx)
                } else {
                    name.to_string()
                };
                (idx as u32, name)
            })
            .collect();

        if classes.is_empty() {
            return Err(ViewerError::EmptyClassList {
                path: self.classes_file.clone(),
            });
        }

        debug!(count = classes.len(), "loaded class list");
        Ok(classes)
    }

    /// Lists the classes as records, ordered by id.
    pub fn list_classes(&self) -> Result<Vec<ClassItem>, ViewerError> {
        Ok(self
            .load_classes()?
            .into_iter()
            .map(|(id, name)| ClassItem::new(id, name))
            .collect())
    }

    /// Lists supported images sorted by filename.
    ///
    /// A missing `images/` directory yields an empty list.
    pub fn list_images(&self) -> Result<Vec<ImageItem>, ViewerError> {
        if !self.images_dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut images = Vec::new();
        for path in image_files(&self.images_dir)? {
            let (Some(stem), Some(filename)) = (
                path.file_stem().and_then(|s| s.to_str()),
                path.file_name().and_then(|s| s.to_str()),
            ) else {
                continue;
            };
            images.push(ImageItem::new(stem, filename));
        }

        Ok(images)
    }

    /// Finds the image file whose stem is `image_id`.
    ///
    /// When several files share the stem, the first supported one in
    /// filename order wins.
    pub fn resolve_image_path(&self, image_id: &str) -> Result<PathBuf, ViewerError> {
        let not_found = || ViewerError::ImageNotFound {
            image_id: image_id.to_string(),
            images_dir: self.images_dir.clone(),
        };

        if !self.images_dir.is_dir() {
            return Err(not_found());
        }

        image_files(&self.images_dir)?
            .into_iter()
            .find(|path| path.file_stem().and_then(|s| s.to_str()) == Some(image_id))
            .ok_or_else(not_found)
    }

    /// Loads and parses `labels/<image_id>.txt`.
    pub fn load_labels(
        &self,
        image_id: &str,
        classes: &ClassMap,
    ) -> Result<Vec<LabelItem>, ViewerError> {
        let label_path = self
            .labels_dir
            .join(format!("{image_id}.{LABEL_EXTENSION}"));
        if !label_path.is_file() {
            return Err(ViewerError::LabelFileNotFound { path: label_path });
        }

        let bytes = fs::read(&label_path)?;
        let content = String::from_utf8(bytes)
            .map_err(|source| ViewerError::LabelFileEncoding {
                path: label_path.clone(),
                source,
            })?;
        parse_label_file(&content, &label_path, classes)
    }

    /// Loads an image's labels and projects them onto its pixel grid.
    pub fn load_overlay(
        &self,
        image_id: &str,
        classes: &ClassMap,
    ) -> Result<ImageOverlay, ViewerError> {
        let image_path = self.resolve_image_path(image_id)?;
        let (width, height) = image_dimensions(&image_path)?;
        let labels = self.load_labels(image_id, classes)?;

        let boxes = labels
            .into_iter()
            .map(|label| OverlayBox {
                pixel_box: label.bbox.to_pixels(width as f64, height as f64),
                class_id: label.class_id,
                class_name: label.class_name,
                confidence: label.confidence,
            })
            .collect();

        Ok(ImageOverlay {
            image_id: image_id.to_string(),
            filename: file_name_string(&image_path),
            width,
            height,
            boxes,
        })
    }
}

/// Reads an image's pixel size from its header without decoding it.
pub fn image_dimensions(path: &Path) -> Result<(u32, u32), ViewerError> {
    let size = imagesize::size(path).map_err(|source| ViewerError::ImageDimensionRead {
        path: path.to_path_buf(),
        source,
    })?;

    let width: u32 = size.width.try_into().map_err(|_| {
        ViewerError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("image width {} does not fit in u32", size.width),
        ))
    })?;
    let height: u32 = size.height.try_into().map_err(|_| {
        ViewerError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("image height {} does not fit in u32", size.height),
        ))
    })?;

    Ok((width, height))
}

/// Regular files directly under `dir` with a supported image extension,
/// sorted by filename.
fn image_files(dir: &Path) -> Result<Vec<PathBuf>, ViewerError> {
    let mut files = Vec::new();

    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if is_broken_link(&err) => {
                warn!(error = %err, "skipping unreadable entry in images directory");
                continue;
            }
            Err(err) => {
                let message = format!("failed while listing {}: {err}", dir.display());
                return Err(ViewerError::Io(std::io::Error::other(message)));
            }
        };

        if entry.file_type().is_file() && has_extension(entry.path(), &IMAGE_EXTENSIONS) {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

/// Dangling symlinks and symlink loops.
fn is_broken_link(err: &walkdir::Error) -> bool {
    err.loop_ancestor().is_some()
        || err
            .io_error()
            .is_some_and(|io| io.kind() == std::io::ErrorKind::NotFound)
}

fn has_extension(path: &Path, allowed: &[&str]) -> bool {
    let Some(ext) = path.extension().and_then(|ext| ext.to_str()) else {
        return false;
    };

    allowed
        .iter()
        .any(|allowed_ext| ext.eq_ignore_ascii_case(allowed_ext))
}

fn file_name_string(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
