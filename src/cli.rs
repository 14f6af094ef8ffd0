use crate::diagram::Side;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "equine-bodywork")]
#[command(about = "馬ボディワーク・セッション記録ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// セッションを記録（台帳追記・診断図レンダリング・メール送信）
    Record {
        /// 馬の名前（省略時は対話入力）
        #[arg(long)]
        horse: Option<String>,

        /// セッション日（YYYY-MM-DD、デフォルト: 今日）
        #[arg(long)]
        date: Option<String>,

        /// 請求額（ドル）
        #[arg(long)]
        amount: Option<f64>,

        /// 支払い済みとして記録
        #[arg(long)]
        paid: bool,

        /// クライアントのメールアドレス（省略時はメール送信なし）
        #[arg(long)]
        email: Option<String>,

        /// セッションメモ
        #[arg(long)]
        notes: Option<String>,

        /// 左側面のキャンバスJSONファイル
        #[arg(long)]
        left: Option<PathBuf>,

        /// 右側面のキャンバスJSONファイル
        #[arg(long)]
        right: Option<PathBuf>,

        /// 診断図を本文にも埋め込む
        #[arg(long)]
        inline: bool,

        /// メールアドレスがあっても送信しない
        #[arg(long)]
        no_email: bool,

        /// 未指定の項目をすべて対話入力する
        #[arg(short, long)]
        interactive: bool,
    },

    /// キャンバスJSONを診断図に合成してPNG出力
    Render {
        /// キャンバスJSONファイル
        #[arg(required = true)]
        canvas: PathBuf,

        /// 診断図の面 (left/right)
        #[arg(short, long, default_value = "left")]
        side: Side,

        /// 背景画像（デフォルト: <images-dir>/horse_<side>.png）
        #[arg(short, long)]
        background: Option<PathBuf>,

        /// 出力PNG（デフォルト: <data-dir>/render_<side>.png）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 記録済みセッションを一覧表示
    List,

    /// 記録済みセッションのサマリメールを再送
    Send {
        /// 台帳内の位置（1始まり）
        #[arg(required = true)]
        index: usize,

        /// 送信先を上書き（省略時は台帳のアドレス）
        #[arg(long)]
        to: Option<String>,

        /// 診断図を本文にも埋め込む
        #[arg(long)]
        inline: bool,
    },

    /// 設定を表示/編集
    Config {
        /// SendGrid APIキーを設定
        #[arg(long)]
        set_api_key: Option<String>,

        /// 送信元メールアドレスを設定
        #[arg(long)]
        set_from_email: Option<String>,

        /// 送信者表示名を設定
        #[arg(long)]
        set_from_name: Option<String>,

        /// データディレクトリ（台帳・注釈済み診断図の保存先）を設定
        #[arg(long)]
        set_data_dir: Option<PathBuf>,

        /// 背景画像ディレクトリを設定
        #[arg(long)]
        set_images_dir: Option<PathBuf>,

        /// メールに埋め込むロゴPNGを設定
        #[arg(long)]
        set_logo: Option<PathBuf>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
