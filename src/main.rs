use clap::Parser;
use equine_bodywork_rust::{canvas, cli, config, delivery, diagram, entry, error, render, store};

use canvas::CanvasPayload;
use cli::{Cli, Commands};
use config::Config;
use delivery::{DeliveryOptions, Mailer};
use diagram::Side;
use error::{EquineError, Result};
use std::path::{Path, PathBuf};
use store::SessionRecord;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Record {
            horse,
            date,
            amount,
            paid,
            email,
            notes,
            left,
            right,
            inline,
            no_email,
            interactive,
        } => {
            println!("🐴 equine-bodywork - セッション記録\n");

            // 馬名が未指定なら対話モードに入る
            let interactive = interactive || horse.is_none();
            let draft = entry::SessionDraft {
                horse,
                date,
                amount,
                paid,
                email,
                notes,
            };
            let record = entry::complete(draft, interactive)?;

            // 背景画像は先に読み込む。欠けていればここで致命的エラーになり、
            // 台帳には何も書かれない
            let backgrounds = [
                diagram::load_background(&config.images_dir, Side::Left)?,
                diagram::load_background(&config.images_dir, Side::Right)?,
            ];

            // 1. 台帳へ追記（メール送信の成否に関係なく先に保存する）
            println!("\n[1/3] 台帳に保存中...");
            let ledger = store::ledger_path(&config.data_dir);
            store::append_record(&ledger, &record)?;
            println!("✔ 保存しました: {}", ledger.display());

            // 2. 注釈済み診断図のレンダリング
            println!("\n[2/3] 診断図をレンダリング中...");
            let canvases = [(Side::Left, left), (Side::Right, right)];
            let mut annotated: Vec<PathBuf> = Vec::new();
            for ((side, canvas_path), background) in canvases.into_iter().zip(&backgrounds) {
                let path = render_side(
                    &config,
                    &record,
                    side,
                    background,
                    canvas_path.as_deref(),
                    cli.verbose,
                )?;
                annotated.push(path);
            }

            // 3. メール送信（失敗しても台帳は保存済みなので警告に留める）
            match record.client_email() {
                Some(_) if no_email => {
                    println!("\n[3/3] メール送信なし（--no-email指定）");
                }
                Some(to) => {
                    println!("\n[3/3] サマリメールを送信中...");
                    match send_summary(&config, to, &record, &annotated[0], &annotated[1], inline)
                        .await
                    {
                        Ok(()) => println!("📧 送信しました: {}", to),
                        Err(e) => eprintln!("⚠️ メール送信に失敗しました: {}", e),
                    }
                }
                None => {
                    println!("\n[3/3] メール送信なし（アドレス未指定）");
                }
            }

            println!("\n✅ セッション記録完了");
        }

        Commands::Render {
            canvas,
            side,
            background,
            output,
        } => {
            println!("🖼️ equine-bodywork - 診断図レンダリング\n");

            let background_img = match background {
                Some(path) => image::open(&path)
                    .map_err(|e| EquineError::ImageLoad(format!("{}: {}", path.display(), e)))?,
                None => diagram::load_background(&config.images_dir, side)?,
            };
            let payload = CanvasPayload::load(&canvas)?;

            let (img, report) = render::rasterize(&background_img, &payload);
            for skip in &report.skipped {
                eprintln!("⚠️ ストローク{}をスキップ: {}", skip.index, skip.reason);
            }

            let output =
                output.unwrap_or_else(|| config.data_dir.join(format!("render_{}.png", side)));
            save_png(&img, &output)?;

            println!("✔ {}ストローク描画（{}スキップ）", report.drawn, report.skipped.len());
            println!("✔ 出力: {}", output.display());
        }

        Commands::List => {
            let ledger = store::ledger_path(&config.data_dir);
            let records = store::load_records(&ledger)?;

            if records.is_empty() {
                println!("記録されたセッションはありません: {}", ledger.display());
            } else {
                println!("セッション台帳: {}\n", ledger.display());
                for (i, record) in records.iter().enumerate() {
                    let paid = if record.paid { "✅" } else { "❌" };
                    println!(
                        "[{}] {}  {}  ${:.2} {}  {}",
                        i + 1,
                        record.date,
                        record.horse,
                        record.amount,
                        paid,
                        record.email.as_deref().unwrap_or("-"),
                    );
                    if cli.verbose && !record.notes.is_empty() {
                        println!("    {}", record.notes.replace('\n', " / "));
                    }
                }
                println!("\n合計 {}件", records.len());
            }
        }

        Commands::Send { index, to, inline } => {
            println!("📧 equine-bodywork - サマリメール再送\n");

            let ledger = store::ledger_path(&config.data_dir);
            let records = store::load_records(&ledger)?;
            let record = index
                .checked_sub(1)
                .and_then(|i| records.get(i))
                .ok_or_else(|| {
                    EquineError::RecordNotFound(format!("位置 {}（全{}件）", index, records.len()))
                })?;

            let to_email = to
                .as_deref()
                .or_else(|| record.client_email())
                .ok_or_else(|| {
                    EquineError::InvalidInput(
                        "このレコードにメールアドレスがありません。--to で指定してください".into(),
                    )
                })?;

            let left = diagram::annotated_path(&config.data_dir, &record.horse, Side::Left);
            let right = diagram::annotated_path(&config.data_dir, &record.horse, Side::Right);

            send_summary(&config, to_email, record, &left, &right, inline).await?;
            println!("✅ 送信しました: {}", to_email);
        }

        Commands::Config {
            set_api_key,
            set_from_email,
            set_from_name,
            set_data_dir,
            set_images_dir,
            set_logo,
            show,
        } => {
            let mut config = config;
            let mut changed = false;

            if let Some(key) = set_api_key {
                config.api_key = Some(key);
                changed = true;
                println!("✔ APIキーを設定しました");
            }
            if let Some(email) = set_from_email {
                config.from_email = Some(email);
                changed = true;
                println!("✔ 送信元アドレスを設定しました");
            }
            if let Some(name) = set_from_name {
                config.from_name = Some(name);
                changed = true;
                println!("✔ 送信者表示名を設定しました");
            }
            if let Some(dir) = set_data_dir {
                config.data_dir = dir;
                changed = true;
                println!("✔ データディレクトリを設定しました");
            }
            if let Some(dir) = set_images_dir {
                config.images_dir = dir;
                changed = true;
                println!("✔ 画像ディレクトリを設定しました");
            }
            if let Some(path) = set_logo {
                config.logo_path = Some(path);
                changed = true;
                println!("✔ ロゴを設定しました");
            }

            if changed {
                config.save()?;
            }

            if show {
                println!("設定:");
                println!("  送信元アドレス: {}", config.from_email.as_deref().unwrap_or("未設定"));
                println!("  送信者表示名: {}", config.from_name.as_deref().unwrap_or("未設定"));
                println!(
                    "  APIキー: {}",
                    if config.api_key.is_some() { "設定済み" } else { "未設定" }
                );
                println!("  データディレクトリ: {}", config.data_dir.display());
                println!("  画像ディレクトリ: {}", config.images_dir.display());
                match &config.logo_path {
                    Some(path) => println!("  ロゴ: {}", path.display()),
                    None => println!("  ロゴ: 未設定"),
                }
            }
        }
    }

    Ok(())
}

/// 片面分のキャンバスを背景に合成して保存し、出力パスを返す。
///
/// キャンバス未指定の面は背景をそのまま（RGBA化のみ）保存する。
/// 両面のファイルが常に揃うので、添付は必ず2枚になる。
fn render_side(
    config: &Config,
    record: &SessionRecord,
    side: Side,
    background: &image::DynamicImage,
    canvas_path: Option<&Path>,
    verbose: bool,
) -> Result<PathBuf> {
    let payload = match canvas_path {
        Some(path) => CanvasPayload::load(path)?,
        None => CanvasPayload::default(),
    };

    let (img, report) = render::rasterize(background, &payload);
    for skip in &report.skipped {
        eprintln!("⚠️ {}: ストローク{}をスキップ: {}", side, skip.index, skip.reason);
    }

    let output = diagram::annotated_path(&config.data_dir, &record.horse, side);
    save_png(&img, &output)?;

    if verbose {
        println!(
            "  [{}] {}ストローク描画 / {}スキップ",
            side,
            report.drawn,
            report.skipped.len()
        );
    }
    println!("✔ {}: {}", side, output.display());

    Ok(output)
}

fn save_png(img: &image::RgbaImage, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    img.save(path)
        .map_err(|e| EquineError::ImageSave(format!("{}: {}", path.display(), e)))
}

async fn send_summary(
    config: &Config,
    to_email: &str,
    record: &SessionRecord,
    left_path: &Path,
    right_path: &Path,
    inline: bool,
) -> Result<()> {
    let sender = config.sender()?;
    let mailer = Mailer::new(sender)?;
    let options = DeliveryOptions {
        inline,
        logo: config.logo_path.clone(),
    };
    mailer
        .send_session_email(to_email, record, left_path, right_path, &options)
        .await
}
