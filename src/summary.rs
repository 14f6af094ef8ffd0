//! セッションサマリの組み立て
//!
//! 台帳レコードからメールの件名とHTML本文を作る。純粋関数のみで
//! ファイル読み込みは行わない（インライン画像はエンコード済み文字列で受ける）。
//! 本文の文面はクライアント向けのため英語。

use crate::store::SessionRecord;

/// ロゴをインライン添付する際のContent-ID
pub const LOGO_CONTENT_ID: &str = "logo_cid";

/// Base64エンコード済みの注釈済み診断図（本文埋め込み用）
#[derive(Debug, Clone)]
pub struct InlineDiagrams {
    pub left: String,
    pub right: String,
}

pub fn subject(record: &SessionRecord) -> String {
    format!("Session Summary: {} ({})", record.horse, record.date)
}

/// HTML本文を組み立てる。
///
/// `inline` を渡すと診断図を本文にデータURLで埋め込み、`with_logo` なら
/// 冒頭に `cid:` 参照のロゴ画像タグを置く（ロゴ自体は添付側で付ける）。
pub fn html_body(record: &SessionRecord, inline: Option<&InlineDiagrams>, with_logo: bool) -> String {
    let paid_status = if record.paid { "✅ Paid" } else { "❌ Not Paid" };
    let notes_html = record.notes.replace('\n', "<br>");

    let mut body = String::new();

    if with_logo {
        body.push_str(&format!(
            "<img src=\"cid:{}\" alt=\"Logo\" style=\"height:100px;\"><br><br>\n",
            LOGO_CONTENT_ID
        ));
    }

    body.push_str(&format!(
        "<h2>🐴 Session Summary for {}</h2>\n\
         <p><strong>Date:</strong> {}</p>\n\
         <p><strong>Amount:</strong> ${:.2} — {}</p>\n\
         <p><strong>Notes:</strong></p>\n\
         <p>{}</p>\n",
        record.horse, record.date, record.amount, paid_status, notes_html
    ));

    if let Some(diagrams) = inline {
        body.push_str(&format!(
            "<h3>🖼️ Inline Marked Diagrams</h3>\n\
             <p><strong>Left Side:</strong><br>\n\
             <img src=\"data:image/png;base64,{}\" alt=\"Left Side\" style=\"border:1px solid #ccc;\" width=\"300\">\n\
             </p>\n\
             <p><strong>Right Side:</strong><br>\n\
             <img src=\"data:image/png;base64,{}\" alt=\"Right Side\" style=\"border:1px solid #ccc;\" width=\"300\">\n\
             </p>\n",
            diagrams.left, diagrams.right
        ));
    }

    body.push_str(
        "<h3>📎 Marked Areas of Concern</h3>\n\
         <p>The marked diagrams are attached as images of the left and right sides of the horse.</p>\n",
    );

    body
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> SessionRecord {
        SessionRecord {
            date: "2026-08-07".into(),
            horse: "Star".into(),
            amount: 85.0,
            paid: false,
            email: None,
            notes: "Tight left shoulder\nRecheck in 2 weeks".into(),
        }
    }

    #[test]
    fn test_subject() {
        assert_eq!(subject(&sample_record()), "Session Summary: Star (2026-08-07)");
    }

    #[test]
    fn test_html_body_fields() {
        let body = html_body(&sample_record(), None, false);
        assert!(body.contains("Session Summary for Star"));
        assert!(body.contains("$85.00"));
        assert!(body.contains("❌ Not Paid"));
        // 改行は<br>に変換される
        assert!(body.contains("Tight left shoulder<br>Recheck in 2 weeks"));
        assert!(!body.contains("cid:"));
        assert!(!body.contains("data:image/png"));
    }

    #[test]
    fn test_html_body_is_pure() {
        let record = sample_record();
        assert_eq!(
            html_body(&record, None, false),
            html_body(&record, None, false)
        );
    }

    #[test]
    fn test_html_body_inline_and_logo() {
        let inline = InlineDiagrams {
            left: "TEFGVA==".into(),
            right: "UklHSFQ=".into(),
        };
        let body = html_body(&sample_record(), Some(&inline), true);
        assert!(body.contains(&format!("cid:{}", LOGO_CONTENT_ID)));
        assert!(body.contains("data:image/png;base64,TEFGVA=="));
        assert!(body.contains("data:image/png;base64,UklHSFQ="));
    }
}
