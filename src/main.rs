use clap::Parser;
use std::path::PathBuf;
use svg_genius::{cli, config, display, error, export, gemini, interactive, store, studio};
use cli::{Cli, Commands};
use config::Config;
use error::{Result, SvgGeniusError};
use gemini::GeminiClient;
use store::FileStore;
use studio::{Studio, SubmitOutcome};
use svg_genius_common::{
    render_preview, Controller, RenderPolicy, COPY_CONFIRMATION, EMPTY_HISTORY_TEXT,
};
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// 履歴を指定（省略時は最新）して現在のSVGにする
fn select_markup(controller: &mut Controller<FileStore>, id: Option<&str>) -> Result<String> {
    if let Some(token) = id {
        let resolved = display::resolve_entry(controller.history(), token)
            .ok_or_else(|| SvgGeniusError::HistoryEntryNotFound(token.to_string()))?;
        controller.select_history_entry(&resolved);
    }
    Ok(controller.state().markup.clone())
}

fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Generate { prompt, modify, from, input, output, copy, save_dir } => {
            let client = GeminiClient::from_config(&config)?;
            let studio = Studio::new(client, FileStore::new(config.history_dir()?));

            {
                let mut controller = studio.controller();
                if let Some(token) = from.as_deref() {
                    select_markup(&mut controller, Some(token))?;
                } else if let Some(path) = &input {
                    controller.edit_markup(std::fs::read_to_string(path)?);
                } else if !modify {
                    controller.edit_markup("");
                }
            }

            let prompt = prompt.join(" ");
            let label = if studio.snapshot().has_markup() { "Modifying SVG..." } else { "Generating SVG..." };
            let bar = interactive::spinner(label);
            let outcome = studio.submit_prompt(&prompt).await;
            bar.finish_and_clear();

            match outcome {
                SubmitOutcome::Generated(markup) => {
                    match &output {
                        Some(path) => {
                            std::fs::write(path, &markup)?;
                            eprintln!("✔ 保存しました: {}", path.display());
                        }
                        None => println!("{markup}"),
                    }
                    if copy {
                        export::copy_to_clipboard(&markup)?;
                        eprintln!("✔ {COPY_CONFIRMATION}");
                    }
                    if let Some(dir) = &save_dir {
                        if let Some(path) = export::write_svg(&markup, dir, now_ms())? {
                            eprintln!("✔ 保存しました: {}", path.display());
                        }
                    }
                }
                SubmitOutcome::Failed(message) => {
                    return Err(SvgGeniusError::ApiCall(message));
                }
                SubmitOutcome::Ignored => {
                    eprintln!("プロンプトが空のため何もしません");
                }
            }
        }

        Commands::History { select, clear, yes } => {
            let mut controller = Controller::new(FileStore::new(config.history_dir()?));

            if clear {
                if !controller.has_clearable_history() {
                    println!("{EMPTY_HISTORY_TEXT}");
                } else if controller.clear_history(|| yes || interactive::confirm_clear()) {
                    println!("✔ 履歴を削除しました");
                }
            } else if let Some(token) = select.as_deref() {
                let markup = select_markup(&mut controller, Some(token))?;
                println!("{markup}");
            } else {
                display::print_history(controller.history());
            }
        }

        Commands::Show { id, raw } => {
            let mut controller = Controller::new(FileStore::new(config.history_dir()?));
            let markup = select_markup(&mut controller, id.as_deref())?;
            let policy = if raw { RenderPolicy::Raw } else { config.render_policy() };
            display::print_preview(&render_preview(&markup, policy));
        }

        Commands::Copy { id } => {
            let mut controller = Controller::new(FileStore::new(config.history_dir()?));
            let markup = select_markup(&mut controller, id.as_deref())?;
            export::copy_to_clipboard(&markup)?;
            println!("✔ {COPY_CONFIRMATION}");
        }

        Commands::Download { id, dir } => {
            let mut controller = Controller::new(FileStore::new(config.history_dir()?));
            let markup = select_markup(&mut controller, id.as_deref())?;
            let dir = dir.unwrap_or_else(|| PathBuf::from("."));
            match export::write_svg(&markup, &dir, now_ms())? {
                Some(path) => println!("✔ 保存しました: {}", path.display()),
                None => eprintln!("{}", SvgGeniusError::EmptyMarkup),
            }
        }

        Commands::Studio { dir } => {
            let client = GeminiClient::from_config(&config)?;
            let studio = Studio::new(client, FileStore::new(config.history_dir()?));
            let dir = dir.unwrap_or_else(|| PathBuf::from("."));
            interactive::run_studio(&studio, config.render_policy(), &dir).await?;
        }

        Commands::Config { set_api_key, show } => {
            let mut config = config;

            if let Some(key) = set_api_key {
                config.set_api_key(key)?;
                println!("✔ APIキーを設定しました");
            }

            if show {
                println!("設定:");
                println!("  モデル: {}", config.generation.model);
                println!("  temperature: {}", config.generation.temperature);
                println!("  top_p: {}", config.generation.top_p);
                println!("  thinking_budget: {}", config.generation.thinking_budget);
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                println!("  プレビュー無害化: {}", if config.sanitize_preview { "有効" } else { "無効" });
                println!("  履歴: {}", config.history_dir()?.display());
                println!("  APIキー: {}", if config.get_api_key().is_ok() { "設定済み" } else { "未設定" });
            }
        }
    }

    Ok(())
}
