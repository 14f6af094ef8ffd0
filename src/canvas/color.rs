//! ストローク色の解決
//!
//! キャンバスウィジェットが出力する色文字列（色名 / HEX / rgb()関数形式）を
//! RGB値へ変換する。解釈できない値は呼び出し側で不透明の赤にフォールバックする。

/// 色名テーブル（CSS基本色 + ウィジェットのパレットで使われる色）
const NAMED_COLORS: &[(&str, [u8; 3])] = &[
    ("black", [0, 0, 0]),
    ("white", [255, 255, 255]),
    ("red", [255, 0, 0]),
    ("green", [0, 128, 0]),
    ("lime", [0, 255, 0]),
    ("blue", [0, 0, 255]),
    ("yellow", [255, 255, 0]),
    ("orange", [255, 165, 0]),
    ("purple", [128, 0, 128]),
    ("pink", [255, 192, 203]),
    ("brown", [165, 42, 42]),
    ("gray", [128, 128, 128]),
    ("grey", [128, 128, 128]),
    ("cyan", [0, 255, 255]),
    ("magenta", [255, 0, 255]),
    ("navy", [0, 0, 128]),
    ("teal", [0, 128, 128]),
    ("olive", [128, 128, 0]),
    ("maroon", [128, 0, 0]),
    ("silver", [192, 192, 192]),
];

/// 色文字列をRGBへ変換（大文字小文字を区別しない）
///
/// 対応形式: 色名 / `#rgb` / `#rrggbb` / `rgb(r,g,b)` / `rgba(r,g,b,a)`
/// （アルファ値は無視、描画は常に不透明）
pub fn parse_color(value: &str) -> Option<[u8; 3]> {
    let value = value.trim().to_lowercase();

    if let Some(hex) = value.strip_prefix('#') {
        return parse_hex(hex);
    }

    if let Some(args) = value
        .strip_prefix("rgba(")
        .or_else(|| value.strip_prefix("rgb("))
        .and_then(|rest| rest.strip_suffix(')'))
    {
        return parse_rgb_args(args);
    }

    NAMED_COLORS
        .iter()
        .find(|(name, _)| *name == value)
        .map(|(_, rgb)| *rgb)
}

fn parse_hex(hex: &str) -> Option<[u8; 3]> {
    match hex.len() {
        // #rgb → 各桁を2倍に展開
        3 => {
            let mut rgb = [0u8; 3];
            for (i, c) in hex.chars().enumerate() {
                let d = c.to_digit(16)? as u8;
                rgb[i] = d * 16 + d;
            }
            Some(rgb)
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some([r, g, b])
        }
        _ => None,
    }
}

fn parse_rgb_args(args: &str) -> Option<[u8; 3]> {
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    if parts.len() < 3 {
        return None;
    }
    let r = parse_channel(parts[0])?;
    let g = parse_channel(parts[1])?;
    let b = parse_channel(parts[2])?;
    Some([r, g, b])
}

fn parse_channel(value: &str) -> Option<u8> {
    let n: f64 = value.parse().ok()?;
    if !(0.0..=255.0).contains(&n) {
        return None;
    }
    Some(n.round() as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_colors() {
        assert_eq!(parse_color("red"), Some([255, 0, 0]));
        assert_eq!(parse_color("RED"), Some([255, 0, 0]));
        assert_eq!(parse_color("  Green "), Some([0, 128, 0]));
        assert_eq!(parse_color("nosuchcolor"), None);
    }

    #[test]
    fn test_hex_colors() {
        assert_eq!(parse_color("#ff0000"), Some([255, 0, 0]));
        assert_eq!(parse_color("#FF8800"), Some([255, 136, 0]));
        assert_eq!(parse_color("#f00"), Some([255, 0, 0]));
        assert_eq!(parse_color("#12"), None);
        assert_eq!(parse_color("#gggggg"), None);
    }

    #[test]
    fn test_rgb_functional() {
        assert_eq!(parse_color("rgb(255, 0, 0)"), Some([255, 0, 0]));
        assert_eq!(parse_color("rgba(10,20,30,0.5)"), Some([10, 20, 30]));
        assert_eq!(parse_color("rgb(300,0,0)"), None);
        assert_eq!(parse_color("rgb(1,2)"), None);
    }
}
