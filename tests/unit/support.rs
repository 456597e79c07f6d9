//! Fixture builders shared by the unit tests.

use std::{
    io::{Cursor, Write as _},
    path::{Path, PathBuf},
};

use image::RgbaImage;
use zip::{ZipWriter, write::SimpleFileOptions};

pub(crate) fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "pose_dist_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

pub(crate) fn png_bytes(img: &RgbaImage) -> Vec<u8> {
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img.clone())
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

pub(crate) fn zip_bytes(members: &[(&str, &[u8])]) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
    for (name, data) in members {
        zip.start_file(*name, options).unwrap();
        zip.write_all(data).unwrap();
    }
    zip.finish().unwrap().into_inner()
}

pub(crate) fn write_zip(path: &Path, members: &[(&str, &[u8])]) {
    std::fs::write(path, zip_bytes(members)).unwrap();
}
