//! ポリライン描画
//!
//! ソフトウェア描画のみ。各線分を長軸方向に1pxステップでサンプリングし、
//! 半径 `width / 2` の円形ブラシでスタンプする。画像外の座標は黙って捨てる
//! （クリッピングのみ、座標のクランプはしない）。

use image::{Rgba, RgbaImage};

/// 頂点列を順に結ぶ折れ線を描く。頂点が2つ未満なら何もしない。
pub fn draw_polyline(img: &mut RgbaImage, points: &[(f64, f64)], color: Rgba<u8>, width: u32) {
    for pair in points.windows(2) {
        draw_segment(img, pair[0], pair[1], color, width);
    }
}

fn draw_segment(
    img: &mut RgbaImage,
    (x0, y0): (f64, f64),
    (x1, y1): (f64, f64),
    color: Rgba<u8>,
    width: u32,
) {
    let radius = (width / 2) as i64;
    let dx = x1 - x0;
    let dy = y1 - y0;

    let steps = dx.abs().max(dy.abs()).ceil() as u64;
    if steps == 0 {
        stamp(img, x0.round() as i64, y0.round() as i64, color, radius);
        return;
    }

    for i in 0..=steps {
        let t = i as f64 / steps as f64;
        let x = (x0 + dx * t).round() as i64;
        let y = (y0 + dy * t).round() as i64;
        stamp(img, x, y, color, radius);
    }
}

fn stamp(img: &mut RgbaImage, cx: i64, cy: i64, color: Rgba<u8>, radius: i64) {
    let (w, h) = (img.width() as i64, img.height() as i64);
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy > radius * radius {
                continue;
            }
            let (x, y) = (cx + dx, cy + dy);
            if x < 0 || y < 0 || x >= w || y >= h {
                continue;
            }
            img.put_pixel(x as u32, y as u32, color);
        }
    }
}
