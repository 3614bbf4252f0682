//! Integration tests for the detector wrapper.
//!
//! Tests cover:
//! - Summary text format and line count
//! - Boxes drawn onto the returned frame
//! - One announcement per detection, duplicates included
//! - Labels drawn even when the configured font cannot be read

mod common;

use common::*;
use image::Rgb;

#[test]
fn test_summary_lines_match_detections() -> anyhow::Result<()> {
    let detections = vec![
        make_detection("500 rupees", 0.873, 5.0, 5.0),
        make_detection("100 rupees", 0.5, 40.0, 40.0),
        make_detection("500 rupees", 0.25, 60.0, 10.0),
    ];
    let (detector, worker, _spoken) = make_detector(detections);

    let (_, summary) = detector.detect(create_test_frame())?;
    let lines: Vec<&str> = summary.lines().collect();

    assert_eq!(lines, vec!["500 rupees (87.3%)", "100 rupees (50.0%)", "500 rupees (25.0%)"]);
    assert!(summary.ends_with('\n'));

    drop(detector);
    worker.join();
    Ok(())
}

#[test]
fn test_boxes_are_drawn_on_frame() -> anyhow::Result<()> {
    let (detector, worker, _spoken) = make_detector(vec![make_detection("10 rupees", 0.9, 10.0, 10.0)]);

    let (annotated, _) = detector.detect(create_test_frame())?;

    assert_eq!(annotated.dimensions(), (100, 100));
    assert_eq!(*annotated.get_pixel(10, 20), Rgb([0, 255, 0]));
    assert_eq!(*annotated.get_pixel(20, 20), Rgb([40, 40, 40]));

    drop(detector);
    worker.join();
    Ok(())
}

#[test]
fn test_no_detections_leaves_frame_untouched() -> anyhow::Result<()> {
    let (detector, worker, spoken) = make_detector(Vec::new());

    let (annotated, summary) = detector.detect(create_test_frame())?;

    assert_eq!(summary, "");
    assert_eq!(annotated, create_test_frame());

    drop(detector);
    worker.join();
    assert!(spoken.lock().unwrap().is_empty());
    Ok(())
}

#[test]
fn test_every_detection_is_announced() -> anyhow::Result<()> {
    let detections = vec![
        make_detection("200 rupees", 0.9, 5.0, 5.0),
        make_detection("200 rupees", 0.8, 50.0, 50.0),
    ];
    let (detector, worker, spoken) = make_detector(detections);

    detector.detect(create_test_frame())?;
    detector.detect(create_test_frame())?;

    drop(detector);
    worker.join();
    assert_eq!(*spoken.lock().unwrap(), vec!["200 rupees detected"; 4]);
    Ok(())
}

#[test]
fn test_summarize_formats_one_decimal() {
    let detections = vec![make_detection("2000 rupees", 0.99999, 0.0, 0.0)];
    assert_eq!(summarize(&detections), "2000 rupees (100.0%)\n");
}

#[test]
fn test_labels_drawn_when_configured_font_is_missing() -> anyhow::Result<()> {
    let spoken = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
    let (notifier, worker) = SpeechNotifier::spawn(Box::new(RecordingSpeech(spoken)), 8)?;
    let overlay = Overlay::load(Some(std::path::Path::new("/typo/font.ttf")));
    let detector = Detector::new(
        Box::new(FixedModel(vec![make_detection("100 rupees", 0.9, 10.0, 50.0)])),
        overlay,
        notifier,
    );

    let (annotated, _) = detector.detect(create_test_frame())?;

    // Label text sits in the band above the box's top edge at y = 50
    let label_pixels = annotated
        .enumerate_pixels()
        .filter(|(_, y, p)| *y < 50 && **p != Rgb([40, 40, 40]))
        .count();
    assert!(label_pixels > 0);

    drop(detector);
    worker.join();
    Ok(())
}
