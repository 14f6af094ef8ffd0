//! キャンバスペイロードの解析
//!
//! 描画ウィジェット（Fabric.js形式）が出力するJSONを読み込む。
//! `objects` 配列のうち `type: "path"` の要素だけをストロークとして解釈し、
//! それ以外の要素種別は無視する。
//!
//! パスセグメントは `["M", x, y]` / `["L", x, y]` / `["Q", cx, cy, x, y]` の
//! 配列形式。デコードに失敗したストロークはラスタライザ側でスキップされる。

mod color;

pub use color::parse_color;

use crate::error::Result;
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

/// ストローク色が未指定・不正だった場合のフォールバック（不透明の赤）
pub const DEFAULT_STROKE_COLOR: [u8; 3] = [255, 0, 0];

/// ストローク幅が未指定・不正だった場合のフォールバック
pub const DEFAULT_STROKE_WIDTH: u32 = 3;

/// 1枚の診断図に対して描かれたストローク一式
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CanvasPayload {
    #[serde(default)]
    pub objects: Vec<CanvasObject>,
}

/// キャンバス上の描画要素。ストローク（`type: "path"`）以外も含まれうる。
#[derive(Debug, Clone, Deserialize)]
pub struct CanvasObject {
    #[serde(rename = "type", default)]
    pub kind: String,

    /// 色文字列。ウィジェット側の仕様が曖昧なため生のJSON値で受ける
    #[serde(default)]
    pub stroke: Option<Value>,

    #[serde(rename = "strokeWidth", default)]
    pub stroke_width: Option<Value>,

    #[serde(default)]
    pub path: Vec<Value>,
}

/// パスセグメント1つ分
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
    QuadraticTo { cx: f64, cy: f64, x: f64, y: f64 },
}

impl CanvasPayload {
    pub fn parse(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            crate::error::EquineError::CanvasLoad(format!("{}: {}", path.display(), e))
        })?;
        Self::parse(&content)
    }

    /// ストロークとして解釈する要素だけを返す
    pub fn strokes(&self) -> impl Iterator<Item = &CanvasObject> {
        self.objects.iter().filter(|o| o.is_path())
    }
}

impl CanvasObject {
    pub fn is_path(&self) -> bool {
        self.kind == "path"
    }

    /// ストローク色を解決。未指定・不正は赤にフォールバック
    pub fn resolved_color(&self) -> [u8; 3] {
        self.stroke
            .as_ref()
            .and_then(Value::as_str)
            .and_then(parse_color)
            .unwrap_or(DEFAULT_STROKE_COLOR)
    }

    /// ストローク幅を解決。未指定・不正・1未満はデフォルトにフォールバック
    pub fn resolved_width(&self) -> u32 {
        self.stroke_width
            .as_ref()
            .and_then(|v| match v {
                Value::Number(n) => n.as_f64(),
                Value::String(s) => s.trim().parse().ok(),
                _ => None,
            })
            .map(|w| w.trunc())
            .filter(|w| *w >= 1.0)
            .map(|w| w as u32)
            .unwrap_or(DEFAULT_STROKE_WIDTH)
    }

    /// セグメント列をデコード。失敗理由は文字列で返し、ストローク単位の
    /// スキップ判定に使う
    pub fn decode_segments(&self) -> std::result::Result<Vec<PathSegment>, String> {
        self.path.iter().map(decode_segment).collect()
    }
}

fn decode_segment(value: &Value) -> std::result::Result<PathSegment, String> {
    let parts = value
        .as_array()
        .ok_or_else(|| "セグメントが配列ではありません".to_string())?;

    let cmd = parts
        .first()
        .and_then(Value::as_str)
        .ok_or_else(|| "セグメントにコマンド文字がありません".to_string())?;

    let coords: Vec<f64> = parts[1..]
        .iter()
        .map(|v| {
            v.as_f64()
                .ok_or_else(|| format!("'{}' セグメントに数値でない座標があります", cmd))
        })
        .collect::<std::result::Result<_, _>>()?;

    match cmd {
        "M" | "L" => {
            if coords.len() < 2 {
                return Err(format!("'{}' セグメントの座標が不足しています", cmd));
            }
            let (x, y) = (coords[0], coords[1]);
            if cmd == "M" {
                Ok(PathSegment::MoveTo { x, y })
            } else {
                Ok(PathSegment::LineTo { x, y })
            }
        }
        "Q" => {
            if coords.len() < 4 {
                return Err("'Q' セグメントの座標が不足しています".to_string());
            }
            Ok(PathSegment::QuadraticTo {
                cx: coords[0],
                cy: coords[1],
                x: coords[2],
                y: coords[3],
            })
        }
        other => Err(format!("未知のパスコマンド: '{}'", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn path_object(json: serde_json::Value) -> CanvasObject {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_parse_payload() {
        let raw = r##"{
            "objects": [
                {"type": "path", "stroke": "#ff0000", "strokeWidth": 3,
                 "path": [["M", 10.0, 20.0], ["Q", 12.0, 22.0, 14.0, 24.0], ["L", 30.0, 40.0]]},
                {"type": "rect", "left": 0, "top": 0}
            ]
        }"##;
        let payload = CanvasPayload::parse(raw).unwrap();
        assert_eq!(payload.objects.len(), 2);
        assert_eq!(payload.strokes().count(), 1);
    }

    #[test]
    fn test_parse_empty_and_missing_objects() {
        assert_eq!(CanvasPayload::parse("{}").unwrap().objects.len(), 0);
        assert_eq!(
            CanvasPayload::parse(r#"{"objects": []}"#).unwrap().objects.len(),
            0
        );
    }

    #[test]
    fn test_decode_segments() {
        let obj = path_object(json!({
            "type": "path",
            "path": [["M", 1.0, 2.0], ["L", 3.0, 4.0], ["Q", 5.0, 6.0, 7.0, 8.0]]
        }));
        let segments = obj.decode_segments().unwrap();
        assert_eq!(
            segments,
            vec![
                PathSegment::MoveTo { x: 1.0, y: 2.0 },
                PathSegment::LineTo { x: 3.0, y: 4.0 },
                PathSegment::QuadraticTo { cx: 5.0, cy: 6.0, x: 7.0, y: 8.0 },
            ]
        );
    }

    #[test]
    fn test_decode_unknown_command() {
        let obj = path_object(json!({
            "type": "path",
            "path": [["M", 1.0, 2.0], ["Z"]]
        }));
        let err = obj.decode_segments().unwrap_err();
        assert!(err.contains("未知のパスコマンド"), "{}", err);
    }

    #[test]
    fn test_decode_bad_coords() {
        let obj = path_object(json!({
            "type": "path",
            "path": [["L", "oops", 2.0]]
        }));
        assert!(obj.decode_segments().is_err());

        let obj = path_object(json!({
            "type": "path",
            "path": [["Q", 1.0, 2.0, 3.0]]
        }));
        assert!(obj.decode_segments().is_err());
    }

    #[test]
    fn test_resolved_color_fallback() {
        let obj = path_object(json!({"type": "path", "stroke": "#00ff00", "path": []}));
        assert_eq!(obj.resolved_color(), [0, 255, 0]);

        let obj = path_object(json!({"type": "path", "path": []}));
        assert_eq!(obj.resolved_color(), DEFAULT_STROKE_COLOR);

        let obj = path_object(json!({"type": "path", "stroke": "not-a-color", "path": []}));
        assert_eq!(obj.resolved_color(), DEFAULT_STROKE_COLOR);

        // 文字列以外（グラデーション等のオブジェクト）もフォールバック
        let obj = path_object(json!({"type": "path", "stroke": {"gradient": true}, "path": []}));
        assert_eq!(obj.resolved_color(), DEFAULT_STROKE_COLOR);
    }

    #[test]
    fn test_resolved_width_fallback() {
        let obj = path_object(json!({"type": "path", "strokeWidth": 5, "path": []}));
        assert_eq!(obj.resolved_width(), 5);

        // 小数は切り捨て
        let obj = path_object(json!({"type": "path", "strokeWidth": 2.9, "path": []}));
        assert_eq!(obj.resolved_width(), 2);

        let obj = path_object(json!({"type": "path", "strokeWidth": "4", "path": []}));
        assert_eq!(obj.resolved_width(), 4);

        let obj = path_object(json!({"type": "path", "path": []}));
        assert_eq!(obj.resolved_width(), DEFAULT_STROKE_WIDTH);

        let obj = path_object(json!({"type": "path", "strokeWidth": 0, "path": []}));
        assert_eq!(obj.resolved_width(), DEFAULT_STROKE_WIDTH);

        let obj = path_object(json!({"type": "path", "strokeWidth": "abc", "path": []}));
        assert_eq!(obj.resolved_width(), DEFAULT_STROKE_WIDTH);
    }
}
