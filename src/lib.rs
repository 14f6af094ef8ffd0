//! 馬ボディワーク・セッション記録ツール
//!
//! 描画ウィジェットが出力したキャンバスJSONを馬の診断図に合成し、
//! セッション情報をCSV台帳へ追記、クライアントへサマリメールを送る。

pub mod canvas;
pub mod cli;
pub mod config;
pub mod delivery;
pub mod diagram;
pub mod entry;
pub mod error;
pub mod render;
pub mod store;
pub mod summary;
