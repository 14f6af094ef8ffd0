use thiserror::Error;

#[derive(Error, Debug)]
pub enum EquineError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("SendGrid APIキーが設定されていません。`equine-bodywork config --set-api-key YOUR_KEY` か環境変数 SENDGRID_API_KEY で設定してください")]
    MissingApiKey,

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("診断図の読み込みエラー: {0}")]
    ImageLoad(String),

    #[error("画像の保存エラー: {0}")]
    ImageSave(String),

    #[error("キャンバスデータの読み込みエラー: {0}")]
    CanvasLoad(String),

    #[error("台帳レコードが見つかりません: {0}")]
    RecordNotFound(String),

    #[error("入力が不正です: {0}")]
    InvalidInput(String),

    #[error("メール送信エラー: {0}")]
    Delivery(String),

    #[error("対話入力エラー: {0}")]
    Prompt(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("CSVエラー: {0}")]
    Csv(#[from] csv::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTPエラー: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, EquineError>;
