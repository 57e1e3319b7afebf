//! End-to-end frame export from an image sequence on disk.

mod common;

use std::time::Duration;

use common::fixtures;
use halftone_core::{ColorMode, RenderConfig};
use halftone_studio::media;
use halftone_studio::models::AppConfig;
use halftone_studio::services::{write_frames, Exporter, Slot, Studio};
use pretty_assertions::assert_eq;

fn app_config() -> AppConfig {
    AppConfig {
        output_width: 40,
        ..Default::default()
    }
}

#[tokio::test]
async fn test_export_sequence_to_directory() {
    let tmp = tempfile::tempdir().unwrap();
    let frames_dir = fixtures::frame_dir(tmp.path(), &[0, 255, 0, 255]);

    let app = app_config();
    let mut studio = Studio::seeded(&app, RenderConfig::default(), 7);
    studio.load(Slot::Primary, media::open(&frames_dir, 30.0).unwrap());

    let exporter = Exporter::new(30.0, Duration::from_secs(2)).unwrap();
    let frames = exporter.export(&mut studio, 4).await.unwrap();
    let out = tmp.path().join("export");
    let paths = write_frames(&out, &frames).unwrap();

    let names: Vec<String> = paths
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        vec![
            "halftone_frame_000.svg",
            "halftone_frame_001.svg",
            "halftone_frame_002.svg",
            "halftone_frame_003.svg",
        ]
    );

    // 40x40 output, 10 px cells: black frames fill all 16 cells
    let counts: Vec<usize> = paths
        .iter()
        .map(|p| std::fs::read_to_string(p).unwrap().matches("<circle").count())
        .collect();
    assert_eq!(counts, vec![16, 0, 16, 0]);
}

#[tokio::test]
async fn test_noise_export_is_stable_across_frames() {
    let tmp = tempfile::tempdir().unwrap();
    let frames_dir = fixtures::frame_dir(tmp.path(), &[0, 0, 0]);

    let app = app_config();
    let config = RenderConfig::new().color_mode(ColorMode::Noise);
    let mut studio = Studio::seeded(&app, config, 11);
    studio.load(Slot::Primary, media::open(&frames_dir, 30.0).unwrap());

    let exporter = Exporter::new(30.0, Duration::from_secs(2)).unwrap();
    let frames = exporter.export(&mut studio, 3).await.unwrap();
    assert_eq!(frames[0].svg, frames[1].svg);
    assert_eq!(frames[1].svg, frames[2].svg);
}

#[tokio::test]
async fn test_secondary_video_follows_primary_during_export() {
    let tmp = tempfile::tempdir().unwrap();
    let primary_dir = fixtures::frame_dir(&tmp.path().join("p"), &[0, 0]);
    let secondary_dir = fixtures::frame_dir(&tmp.path().join("s"), &[50, 200]);

    // Output matches the 20 px frames so colors are not resampled
    let app = AppConfig {
        output_width: 20,
        ..Default::default()
    };
    let config = RenderConfig::new().color_mode(ColorMode::SecondaryImageColor);
    let mut studio = Studio::seeded(&app, config, 1);
    studio.load(Slot::Primary, media::open(&primary_dir, 30.0).unwrap());
    studio.load(Slot::Secondary, media::open(&secondary_dir, 30.0).unwrap());

    let exporter = Exporter::new(30.0, Duration::from_secs(2)).unwrap();
    let frames = exporter.export(&mut studio, 2).await.unwrap();
    assert!(frames[0].svg.contains("#323232"));
    assert!(frames[1].svg.contains("#c8c8c8"));
}
