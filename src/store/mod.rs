//! セッション台帳
//!
//! 固定列 `Date,Horse,Amount,Paid,Email,Notes` のCSVファイル。
//! ファイルがなければヘッダ行つきで新規作成、あれば1行追記する。
//! レコードは追記後は不変で、位置（1始まり）だけで特定する。
//! 更新・削除・重複排除の経路は持たない。

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

pub const LEDGER_FILE_NAME: &str = "session_data.csv";

/// 1セッション分の請求・記録行
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    /// セッション日（ISO形式 YYYY-MM-DD）
    #[serde(rename = "Date")]
    pub date: String,

    #[serde(rename = "Horse")]
    pub horse: String,

    /// 請求額（ドル、非負）
    #[serde(rename = "Amount")]
    pub amount: f64,

    #[serde(rename = "Paid")]
    pub paid: bool,

    /// クライアントのメールアドレス。空欄なら送信しない
    #[serde(rename = "Email")]
    pub email: Option<String>,

    #[serde(rename = "Notes")]
    pub notes: String,
}

impl SessionRecord {
    /// 送信先アドレス。空文字・空白のみは「未指定」として扱う
    pub fn client_email(&self) -> Option<&str> {
        self.email
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
    }
}

pub fn ledger_path(data_dir: &Path) -> PathBuf {
    data_dir.join(LEDGER_FILE_NAME)
}

/// 台帳に1行追記する。ファイルがなければヘッダ行から作る。
pub fn append_record(path: &Path, record: &SessionRecord) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let write_header = !path.exists();
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(write_header)
        .from_writer(file);
    writer.serialize(record)?;
    writer.flush()?;
    Ok(())
}

/// 台帳を全件読み込む。ファイルがなければ空を返す。
pub fn load_records(path: &Path) -> Result<Vec<SessionRecord>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let mut reader = csv::Reader::from_path(path)?;
    let mut records = Vec::new();
    for row in reader.deserialize() {
        records.push(row?);
    }
    Ok(records)
}
