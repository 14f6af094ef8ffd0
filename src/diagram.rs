//! 診断図（馬の左側面・右側面の背景画像）

use crate::error::{EquineError, Result};
use image::DynamicImage;
use std::path::{Path, PathBuf};

/// 診断図の面。背景ファイル名と出力ファイル名を決める。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn label(&self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }

    /// 背景画像のファイル名（画像ディレクトリ直下）
    pub fn background_file(&self) -> &'static str {
        match self {
            Side::Left => "horse_left.png",
            Side::Right => "horse_right.png",
        }
    }
}

impl std::str::FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "left" | "l" => Ok(Side::Left),
            "right" | "r" => Ok(Side::Right),
            _ => Err(format!("未知の面: {}. left または right を指定してください", s)),
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// 背景画像を読み込む。見つからない・読めない場合は致命的エラー。
pub fn load_background(images_dir: &Path, side: Side) -> Result<DynamicImage> {
    let path = images_dir.join(side.background_file());
    if !path.exists() {
        return Err(EquineError::ImageLoad(format!(
            "背景画像がありません: {}",
            path.display()
        )));
    }
    image::open(&path)
        .map_err(|e| EquineError::ImageLoad(format!("{}: {}", path.display(), e)))
}

/// 注釈済み診断図の出力パス: `<data_dir>/<馬名>_<面>.png`
pub fn annotated_path(data_dir: &Path, horse: &str, side: Side) -> PathBuf {
    data_dir.join(format!("{}_{}.png", horse, side.label()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_from_str() {
        assert_eq!("left".parse::<Side>().unwrap(), Side::Left);
        assert_eq!("R".parse::<Side>().unwrap(), Side::Right);
        assert!("top".parse::<Side>().is_err());
    }

    #[test]
    fn test_annotated_path() {
        let path = annotated_path(Path::new("data"), "Star", Side::Left);
        assert_eq!(path, Path::new("data/Star_left.png"));
    }

    #[test]
    fn test_load_background_missing() {
        let result = load_background(Path::new("/nonexistent"), Side::Left);
        assert!(matches!(result, Err(EquineError::ImageLoad(_))));
    }
}
