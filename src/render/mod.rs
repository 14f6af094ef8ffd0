//! パスラスタライザ
//!
//! 背景となる診断図にキャンバスペイロードのストロークを合成し、
//! 注釈済み診断図（RGBA、背景と同寸）を生成する。
//!
//! 不正なストロークは全体を失敗させず、そのストロークだけをスキップして
//! 理由を [`RasterReport`] に記録する。空のペイロードはRGBA変換を除いて
//! 背景をそのまま返す。

mod line;

pub use line::draw_polyline;

use crate::canvas::{CanvasPayload, PathSegment};
use image::{DynamicImage, Rgba, RgbaImage};

/// ストローク単位の処理結果レポート
#[derive(Debug, Clone, Default)]
pub struct RasterReport {
    /// 描画したストローク数
    pub drawn: usize,
    /// スキップしたストローク（objects配列内の位置と理由）
    pub skipped: Vec<SkippedStroke>,
}

#[derive(Debug, Clone)]
pub struct SkippedStroke {
    pub index: usize,
    pub reason: String,
}

impl RasterReport {
    pub fn all_drawn(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// 背景にペイロードの全ストロークを合成する。
///
/// 背景自体は変更せず、RGBAへ変換した作業コピーに描画して返す。
pub fn rasterize(background: &DynamicImage, payload: &CanvasPayload) -> (RgbaImage, RasterReport) {
    let mut img = background.to_rgba8();
    let mut report = RasterReport::default();

    for (index, obj) in payload.objects.iter().enumerate() {
        if !obj.is_path() {
            continue;
        }

        let [r, g, b] = obj.resolved_color();
        let color = Rgba([r, g, b, 255]);
        let width = obj.resolved_width();

        match obj.decode_segments() {
            Ok(segments) => {
                let points = chord_points(&segments);
                if points.len() > 1 {
                    draw_polyline(&mut img, &points, color, width);
                }
                report.drawn += 1;
            }
            Err(reason) => report.skipped.push(SkippedStroke { index, reason }),
        }
    }

    (img, report)
}

/// セグメント列を折れ線の頂点列に変換する。
///
/// `Q`（2次曲線）は制御点を捨てて終点だけを使う。フリーハンド入力では
/// ウィジェットが細かいQセグメントを大量に出すため、保存済みの診断図は
/// 一貫して弦の直線として描かれてきた。この挙動は固定仕様であり、
/// 真のベジェ描画に置き換えてはならない。
fn chord_points(segments: &[PathSegment]) -> Vec<(f64, f64)> {
    segments
        .iter()
        .map(|segment| match *segment {
            PathSegment::MoveTo { x, y } => (x, y),
            PathSegment::LineTo { x, y } => (x, y),
            PathSegment::QuadraticTo { x, y, .. } => (x, y),
        })
        .collect()
}
