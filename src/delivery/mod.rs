//! メール送信クライアント（SendGrid v3 API）
//!
//! 1セッションにつき最大1通。注釈済み診断図2枚を添付し、設定があれば
//! ロゴをインライン埋め込みする。リトライはしない。送信失敗は呼び出し側で
//! 警告に落とす（台帳への保存は送信結果に関係なく済んでいる）。

use crate::error::{EquineError, Result};
use crate::store::SessionRecord;
use crate::summary::{self, InlineDiagrams, LOGO_CONTENT_ID};
use base64::Engine;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

const SENDGRID_API_URL: &str = "https://api.sendgrid.com/v3/mail/send";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// 送信者設定。環境からの読み取りは設定層で済ませ、ここには値として渡す。
#[derive(Debug, Clone)]
pub struct SenderConfig {
    pub from_email: String,
    pub from_name: String,
    pub api_key: String,
}

/// 送信時のオプション
#[derive(Debug, Clone, Default)]
pub struct DeliveryOptions {
    /// 診断図を添付に加えて本文にも埋め込む
    pub inline: bool,
    /// インライン添付するロゴPNG（存在しないパスは無視）
    pub logo: Option<PathBuf>,
}

/// SendGrid v3 `POST /v3/mail/send` のリクエストボディ
#[derive(Debug, Serialize)]
pub struct MailSendRequest {
    pub personalizations: Vec<Personalization>,
    pub from: EmailAddress,
    pub subject: String,
    pub content: Vec<Content>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<AttachmentPayload>,
}

#[derive(Debug, Serialize)]
pub struct Personalization {
    pub to: Vec<EmailAddress>,
}

#[derive(Debug, Serialize)]
pub struct EmailAddress {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct Content {
    #[serde(rename = "type")]
    pub content_type: String,
    pub value: String,
}

#[derive(Debug, Serialize)]
pub struct AttachmentPayload {
    /// Base64エンコード済みのファイル内容
    pub content: String,
    #[serde(rename = "type")]
    pub mime_type: String,
    pub filename: String,
    pub disposition: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_id: Option<String>,
}

pub struct Mailer {
    client: reqwest::Client,
    sender: SenderConfig,
}

impl Mailer {
    pub fn new(sender: SenderConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { client, sender })
    }

    /// セッションサマリを1通送信する
    pub async fn send_session_email(
        &self,
        to_email: &str,
        record: &SessionRecord,
        left_path: &Path,
        right_path: &Path,
        options: &DeliveryOptions,
    ) -> Result<()> {
        let request =
            build_session_request(&self.sender, to_email, record, left_path, right_path, options)?;

        let response = self
            .client
            .post(SENDGRID_API_URL)
            .bearer_auth(&self.sender.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EquineError::Delivery(format!(
                "SendGrid APIエラー {}: {}",
                status, body
            )));
        }

        Ok(())
    }
}

/// リクエストボディを組み立てる。診断図2枚は必須、ロゴは存在すれば先頭に
/// インライン添付する。
pub fn build_session_request(
    sender: &SenderConfig,
    to_email: &str,
    record: &SessionRecord,
    left_path: &Path,
    right_path: &Path,
    options: &DeliveryOptions,
) -> Result<MailSendRequest> {
    let left_encoded = encode_file(left_path)?;
    let right_encoded = encode_file(right_path)?;

    let mut attachments = Vec::new();

    let logo = options.logo.as_deref().filter(|p| p.exists());
    if let Some(logo_path) = logo {
        attachments.push(AttachmentPayload {
            content: encode_file(logo_path)?,
            mime_type: "image/png".into(),
            filename: "logo.png".into(),
            disposition: "inline".into(),
            content_id: Some(LOGO_CONTENT_ID.into()),
        });
    }

    for (encoded, side) in [(&left_encoded, "left"), (&right_encoded, "right")] {
        attachments.push(AttachmentPayload {
            content: encoded.clone(),
            mime_type: "image/png".into(),
            filename: format!("{}_{}.png", record.horse, side),
            disposition: "attachment".into(),
            content_id: None,
        });
    }

    let inline = options.inline.then(|| InlineDiagrams {
        left: left_encoded,
        right: right_encoded,
    });

    let body = summary::html_body(record, inline.as_ref(), logo.is_some());

    Ok(MailSendRequest {
        personalizations: vec![Personalization {
            to: vec![EmailAddress {
                email: to_email.into(),
                name: None,
            }],
        }],
        from: EmailAddress {
            email: sender.from_email.clone(),
            name: Some(sender.from_name.clone()),
        },
        subject: summary::subject(record),
        content: vec![Content {
            content_type: "text/html".into(),
            value: body,
        }],
        attachments,
    })
}

fn encode_file(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(EquineError::FileNotFound(path.display().to_string()));
    }
    let bytes = std::fs::read(path)?;
    Ok(base64::engine::general_purpose::STANDARD.encode(bytes))
}
