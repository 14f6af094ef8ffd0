//! パスラスタライザの統合テスト

use equine_bodywork_rust::canvas::CanvasPayload;
use equine_bodywork_rust::render;
use image::{DynamicImage, Rgb, RgbImage, Rgba};
use std::collections::HashSet;

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

fn white_background(w: u32, h: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_pixel(w, h, Rgb([255, 255, 255])))
}

fn colored_pixels(img: &image::RgbaImage) -> HashSet<(u32, u32)> {
    img.enumerate_pixels()
        .filter(|(_, _, p)| **p != WHITE)
        .map(|(x, y, _)| (x, y))
        .collect()
}

#[test]
fn test_move_line_polyline_visits_exact_points() {
    let background = white_background(10, 8);
    let payload = CanvasPayload::parse(
        r##"{"objects": [{"type": "path", "stroke": "#0000ff", "strokeWidth": 1,
            "path": [["M", 1.0, 1.0], ["L", 6.0, 1.0], ["L", 6.0, 5.0]]}]}"##,
    )
    .unwrap();

    let (img, report) = render::rasterize(&background, &payload);
    assert_eq!(report.drawn, 1);
    assert!(report.all_drawn());

    // 折れ線が通る点だけが塗られる
    let mut expected = HashSet::new();
    for x in 1..=6 {
        expected.insert((x, 1));
    }
    for y in 1..=5 {
        expected.insert((6, y));
    }
    assert_eq!(colored_pixels(&img), expected);

    let blue = Rgba([0, 0, 255, 255]);
    assert_eq!(*img.get_pixel(1, 1), blue);
    assert_eq!(*img.get_pixel(6, 5), blue);
}

#[test]
fn test_quadratic_draws_chord_not_curve() {
    let background = white_background(16, 16);
    // 制御点(8,2)を大きく外したQセグメント。弦 (2,2)→(8,8) の対角線だけが
    // 描かれ、真の曲線が通る側（例: (7,3)付近）は塗られない。
    let payload = CanvasPayload::parse(
        r#"{"objects": [{"type": "path", "stroke": "red", "strokeWidth": 1,
            "path": [["M", 2.0, 2.0], ["Q", 8.0, 2.0, 8.0, 8.0]]}]}"#,
    )
    .unwrap();

    let (img, report) = render::rasterize(&background, &payload);
    assert!(report.all_drawn());

    let expected: HashSet<(u32, u32)> = (2..=8).map(|i| (i, i)).collect();
    assert_eq!(colored_pixels(&img), expected);

    // 真の2次ベジェの中点は(6.5, 3.5)。弦描画ではその近傍は背景のまま
    assert_eq!(*img.get_pixel(6, 3), WHITE);
    assert_eq!(*img.get_pixel(7, 3), WHITE);
    assert_eq!(*img.get_pixel(6, 4), WHITE);
    assert_eq!(*img.get_pixel(7, 4), WHITE);
}

#[test]
fn test_empty_payload_keeps_background_pixels() {
    let background = white_background(12, 9);
    let expected = background.to_rgba8();

    for raw in ["{}", r#"{"objects": []}"#] {
        let payload = CanvasPayload::parse(raw).unwrap();
        let (img, report) = render::rasterize(&background, &payload);
        assert_eq!(report.drawn, 0);
        assert!(report.all_drawn());
        // アルファ正規化後はピクセル単位で一致
        assert_eq!(img.as_raw(), expected.as_raw());
        assert_eq!(img.dimensions(), background.to_rgba8().dimensions());
    }
}

#[test]
fn test_malformed_stroke_does_not_block_others() {
    let background = white_background(10, 10);
    let payload = CanvasPayload::parse(
        r##"{"objects": [
            {"type": "path", "stroke": "#0000ff", "strokeWidth": 1,
             "path": [["M", 1.0, 1.0], ["Z"]]},
            {"type": "circle", "radius": 5},
            {"type": "path", "stroke": "#00ff00", "strokeWidth": 1,
             "path": [["M", 2.0, 7.0], ["L", 7.0, 7.0]]}
        ]}"##,
    )
    .unwrap();

    let (img, report) = render::rasterize(&background, &payload);

    // 不正ストロークだけがスキップされ、残りは描画される
    assert_eq!(report.drawn, 1);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].index, 0);
    assert!(report.skipped[0].reason.contains("未知のパスコマンド"));

    let green = Rgba([0, 255, 0, 255]);
    for x in 2..=7 {
        assert_eq!(*img.get_pixel(x, 7), green, "x={}", x);
    }
}

#[test]
fn test_strokes_draw_in_payload_order() {
    let background = white_background(10, 10);
    let payload = CanvasPayload::parse(
        r##"{"objects": [
            {"type": "path", "stroke": "#ff0000", "strokeWidth": 1,
             "path": [["M", 1.0, 4.0], ["L", 8.0, 4.0]]},
            {"type": "path", "stroke": "#0000ff", "strokeWidth": 1,
             "path": [["M", 4.0, 1.0], ["L", 4.0, 8.0]]}
        ]}"##,
    )
    .unwrap();

    let (img, report) = render::rasterize(&background, &payload);
    assert_eq!(report.drawn, 2);

    // 交点は後から描いたストロークの色
    assert_eq!(*img.get_pixel(4, 4), Rgba([0, 0, 255, 255]));
    assert_eq!(*img.get_pixel(1, 4), Rgba([255, 0, 0, 255]));
}

#[test]
fn test_out_of_range_coordinates_draw_silently() {
    let background = white_background(8, 8);
    let payload = CanvasPayload::parse(
        r##"{"objects": [{"type": "path", "stroke": "#ff0000", "strokeWidth": 3,
            "path": [["M", -20.0, -20.0], ["L", 40.0, 40.0]]}]}"##,
    )
    .unwrap();

    // パニックせず、画像内の部分だけ描かれる
    let (img, report) = render::rasterize(&background, &payload);
    assert!(report.all_drawn());
    assert_eq!(*img.get_pixel(4, 4), Rgba([255, 0, 0, 255]));
}
