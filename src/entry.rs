//! セッション情報の対話入力
//!
//! 元のフォームUIの代わりに、フラグで渡されなかった項目をプロンプトで
//! 補完する。検証（日付形式・非負の請求額）はフラグ入力にも適用する。

use crate::error::{EquineError, Result};
use crate::store::SessionRecord;
use chrono::NaiveDate;
use dialoguer::{Confirm, Input};

/// CLIフラグから渡されたセッション項目（未指定はNone）
#[derive(Debug, Clone, Default)]
pub struct SessionDraft {
    pub horse: Option<String>,
    pub date: Option<String>,
    pub amount: Option<f64>,
    pub paid: bool,
    pub email: Option<String>,
    pub notes: Option<String>,
}

pub fn today() -> String {
    chrono::Local::now().date_naive().to_string()
}

/// 日付文字列を検証する（ISO形式 YYYY-MM-DD、実在する日付のみ）
pub fn validate_date(value: &str) -> Result<String> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map(|d| d.to_string())
        .map_err(|_| {
            EquineError::InvalidInput(format!("日付は YYYY-MM-DD 形式で指定してください: {}", value))
        })
}

/// 請求額を検証する（非負の有限値）
pub fn validate_amount(value: f64) -> Result<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(EquineError::InvalidInput(format!(
            "請求額は0以上で指定してください: {}",
            value
        )));
    }
    Ok(value)
}

/// 未指定の項目を補完してレコードを完成させる。
///
/// `interactive` がfalseの場合、馬名と請求額以外はデフォルト
/// （日付=今日、未払い、メール・メモなし）で埋める。
pub fn complete(draft: SessionDraft, interactive: bool) -> Result<SessionRecord> {
    let horse = match draft.horse {
        Some(name) if !name.trim().is_empty() => name.trim().to_string(),
        _ => prompt_required("Horse name")?,
    };

    let date = match draft.date {
        Some(date) => validate_date(&date)?,
        None if interactive => {
            let input = prompt_with_default("Date (YYYY-MM-DD)", &today())?;
            validate_date(&input)?
        }
        None => today(),
    };

    let amount = match draft.amount {
        Some(amount) => validate_amount(amount)?,
        None => prompt_amount()?,
    };

    let paid = if draft.paid {
        true
    } else if interactive {
        Confirm::new()
            .with_prompt("Paid?")
            .default(false)
            .interact()
            .map_err(|e| EquineError::Prompt(e.to_string()))?
    } else {
        false
    };

    let email = match draft.email {
        Some(email) => Some(email),
        None if interactive => {
            let input = prompt_optional("Client email (optional)")?;
            (!input.is_empty()).then_some(input)
        }
        None => None,
    };

    let notes = match draft.notes {
        Some(notes) => notes,
        None if interactive => prompt_optional("Session notes & recommendations")?,
        None => String::new(),
    };

    Ok(SessionRecord {
        date,
        horse,
        amount,
        paid,
        email,
        notes,
    })
}

fn prompt_required(prompt: &str) -> Result<String> {
    let input: String = Input::new()
        .with_prompt(prompt)
        .validate_with(|value: &String| {
            if value.trim().is_empty() {
                Err("入力が必要です")
            } else {
                Ok(())
            }
        })
        .interact_text()
        .map_err(|e| EquineError::Prompt(e.to_string()))?;
    Ok(input.trim().to_string())
}

fn prompt_with_default(prompt: &str, default: &str) -> Result<String> {
    Input::new()
        .with_prompt(prompt)
        .default(default.to_string())
        .interact_text()
        .map_err(|e| EquineError::Prompt(e.to_string()))
}

fn prompt_optional(prompt: &str) -> Result<String> {
    let input: String = Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()
        .map_err(|e| EquineError::Prompt(e.to_string()))?;
    Ok(input.trim().to_string())
}

fn prompt_amount() -> Result<f64> {
    let input: String = Input::new()
        .with_prompt("Amount charged ($)")
        .validate_with(|value: &String| match value.trim().parse::<f64>() {
            Ok(n) if n >= 0.0 => Ok(()),
            _ => Err("0以上の数値を入力してください"),
        })
        .interact_text()
        .map_err(|e| EquineError::Prompt(e.to_string()))?;

    // validate_withを通過しているのでパースは成功する
    input
        .trim()
        .parse()
        .map_err(|_| EquineError::InvalidInput(format!("請求額が不正です: {}", input)))
}
