//! Fixture builders shared by the integration tests.
#![allow(dead_code)]

use std::{
    io::{Cursor, Write as _},
    path::{Path, PathBuf},
};

use image::{Rgba, RgbaImage};
use zip::{ZipWriter, write::SimpleFileOptions};

pub fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "pose_dist_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

pub fn png(img: &RgbaImage) -> Vec<u8> {
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img.clone())
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

/// Frame with `band` black rows at the top and bottom around a colored body.
pub fn letterboxed_frame(width: u32, height: u32, band: u32) -> Vec<u8> {
    png(&RgbaImage::from_fn(width, height, |x, y| {
        if y < band || y >= height - band {
            Rgba([0, 0, 0, 255])
        } else {
            Rgba([(x * 7) as u8, 160, (y * 5) as u8, 255])
        }
    }))
}

pub fn write_zip(path: &Path, members: &[(String, Vec<u8>)]) {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
    for (name, data) in members {
        zip.start_file(name.as_str(), options).unwrap();
        zip.write_all(data).unwrap();
    }
    std::fs::write(path, zip.finish().unwrap().into_inner()).unwrap();
}

/// `poses.json` with one record per timestamp.
pub fn poses_json(ts: &[i64]) -> Vec<u8> {
    let poses: Vec<serde_json::Value> = ts
        .iter()
        .map(|t| {
            serde_json::json!({
                "t": t,
                "d": 33,
                "vectors": [[0.25, -0.5, 0.75]],
                "pose": [[0.1, 0.2, 0.3, 0.9]],
                "leftHand": [[0.4, 0.5]],
                "frameImageDataUrl": "data:image/jpeg;base64,AAAA"
            })
        })
        .collect();
    serde_json::json!({
        "generator": "capture",
        "version": 1,
        "videoName": "clip.mp4",
        "poseLandmarkMapppings": ["nose", "left_eye_inner"],
        "poses": poses
    })
    .to_string()
    .into_bytes()
}
