#![allow(dead_code)]

use std::fs;
use std::path::Path;

use yolo_viewer::api;
use yolo_viewer::dataset::Dataset;
use yolo_viewer::router::Dispatcher;

pub fn bmp_bytes(width: u32, height: u32) -> Vec<u8> {
    let row_stride = (width * 3).div_ceil(4) * 4;
    let pixel_array_size = row_stride * height;
    let file_size = 54 + pixel_array_size;

    let mut bytes = Vec::with_capacity(file_size as usize);
    bytes.extend_from_slice(b"BM");
    bytes.extend_from_slice(&file_size.to_le_bytes());
    bytes.extend_from_slice(&[0, 0, 0, 0]);
    bytes.extend_from_slice(&54u32.to_le_bytes());

    bytes.extend_from_slice(&40u32.to_le_bytes());
    bytes.extend_from_slice(&(width as i32).to_le_bytes());
    bytes.extend_from_slice(&(height as i32).to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes());
    bytes.extend_from_slice(&24u16.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());
    bytes.extend_from_slice(&pixel_array_size.to_le_bytes());
    bytes.extend_from_slice(&2835u32.to_le_bytes());
    bytes.extend_from_slice(&2835u32.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());

    bytes.resize(file_size as usize, 0);
    bytes
}

pub fn write_bmp(path: &Path, width: u32, height: u32) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    fs::write(path, bmp_bytes(width, height)).expect("write bmp file");
}

/// Stand-in JPEG payload. Only the bytes matter to the image endpoint.
pub const JPEG_BYTES: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F', 0x00];

/// A small dataset with two classes and two images:
///
/// - `0015.jpg` labelled with a cat and a scored dog
/// - `0020.bmp` (40x20) labelled with one cat
/// - `readme.md` in `images/`, which must never be listed
pub fn create_sample_dataset(root: &Path) {
    fs::create_dir_all(root.join("images")).expect("create images dir");
    fs::create_dir_all(root.join("labels")).expect("create labels dir");

    fs::write(root.join("classes.txt"), "cat\ndog").expect("write classes");

    fs::write(root.join("images/0015.jpg"), JPEG_BYTES).expect("write jpeg");
    write_bmp(&root.join("images/0020.bmp"), 40, 20);
    fs::write(root.join("images/readme.md"), "not an image").expect("write readme");

    fs::write(
        root.join("labels/0015.txt"),
        "0 0.5 0.5 0.2 0.3\n1 0.1 0.1 0.05 0.05 0.9",
    )
    .expect("write label 0015");
    fs::write(root.join("labels/0020.txt"), "\n0 0.5 0.5 0.5 0.5\n\n")
        .expect("write label 0020");
}

pub fn start(root: &Path) -> Dispatcher<Dataset> {
    api::router()
        .start(Dataset::new(root))
        .expect("start viewer")
}
