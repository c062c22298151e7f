//! 対話式スタジオ
//!
//! プロンプトを入力するたびに生成し、現在のSVGを修正していく。
//! `:` で始まる入力はコマンドとして扱う。

use crate::display::{print_history, print_preview, resolve_entry};
use crate::error::{Result, SvgGeniusError};
use crate::export::{copy_to_clipboard, write_svg};
use crate::gemini::MarkupGenerator;
use crate::studio::{Studio, SubmitOutcome};
use dialoguer::{Confirm, Input};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Duration;
use svg_genius_common::{
    render_preview, KeyValueStore, RenderPolicy, CLEAR_HISTORY_PROMPT, COPY_CONFIRMATION,
    EMPTY_HISTORY_TEXT,
};

/// 対話アクション
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StudioAction {
    /// プロンプトを送信
    Prompt(String),
    /// 現在のSVGを破棄して新規作成に戻る
    New,
    /// 履歴を表示
    History,
    /// 履歴を選択（番号またはID）
    Select(String),
    /// ファイルの内容で現在のSVGを置き換え
    Edit(PathBuf),
    /// プレビュー
    Show,
    /// クリップボードにコピー
    Copy,
    /// ファイルに保存
    Download,
    /// 履歴を全削除
    ClearHistory,
    Help,
    Quit,
    /// 空入力・不明なコマンド
    Unknown(String),
}

/// 入力行をアクションに変換
pub fn parse_action(line: &str) -> StudioAction {
    let trimmed = line.trim();
    let Some(command) = trimmed.strip_prefix(':') else {
        return if trimmed.is_empty() {
            StudioAction::Unknown(String::new())
        } else {
            StudioAction::Prompt(trimmed.to_string())
        };
    };

    let (name, arg) = match command.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (command, ""),
    };

    match (name, arg) {
        ("n" | "new", _) => StudioAction::New,
        ("h" | "history", _) => StudioAction::History,
        ("s" | "select", id) if !id.is_empty() => StudioAction::Select(id.to_string()),
        ("e" | "edit", path) if !path.is_empty() => StudioAction::Edit(PathBuf::from(path)),
        ("p" | "show", _) => StudioAction::Show,
        ("c" | "copy", _) => StudioAction::Copy,
        ("d" | "download", _) => StudioAction::Download,
        ("clear", _) => StudioAction::ClearHistory,
        ("?" | "help", _) => StudioAction::Help,
        ("q" | "quit", _) => StudioAction::Quit,
        _ => StudioAction::Unknown(trimmed.to_string()),
    }
}

const HELP: &str = "\
操作: テキスト=生成/修正  :n 新規  :h 履歴  :s <番号|ID> 選択  :e <file> 読込
      :p プレビュー  :c コピー  :d 保存  :clear 履歴削除  :q 終了";

/// 生成中のスピナー
pub fn spinner(message: &str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        bar.set_style(style);
    }
    bar.set_message(message.to_string());
    bar.enable_steady_tick(Duration::from_millis(120));
    bar
}

/// 履歴削除の確認
pub fn confirm_clear() -> bool {
    Confirm::new()
        .with_prompt(CLEAR_HISTORY_PROMPT)
        .default(false)
        .interact()
        .unwrap_or(false)
}

/// 対話式スタジオを実行
pub async fn run_studio<G, S>(studio: &Studio<G, S>, policy: RenderPolicy, save_dir: &Path) -> Result<()>
where
    G: MarkupGenerator,
    S: KeyValueStore,
{
    println!("🎨 svg-genius studio");
    println!("{HELP}\n");

    loop {
        let label = if studio.snapshot().has_markup() { "Modify SVG" } else { "Generate SVG" };
        let line: String = Input::new()
            .with_prompt(label)
            .allow_empty(true)
            .interact_text()
            .map_err(|e| SvgGeniusError::Prompt(e.to_string()))?;

        match parse_action(&line) {
            StudioAction::Prompt(prompt) => {
                let bar = spinner("Generating...");
                let outcome = studio.submit_prompt(&prompt).await;
                bar.finish_and_clear();
                match outcome {
                    SubmitOutcome::Generated(markup) => {
                        print_preview(&render_preview(&markup, policy));
                        println!("✔ {} characters\n", markup.len());
                    }
                    SubmitOutcome::Failed(message) => eprintln!("✖ {message}\n"),
                    SubmitOutcome::Ignored => {}
                }
            }
            StudioAction::New => {
                studio.controller().edit_markup("");
                println!("→ 新規作成モード\n");
            }
            StudioAction::History => print_history(studio.controller().history()),
            StudioAction::Select(token) => {
                let mut controller = studio.controller();
                let resolved = resolve_entry(controller.history(), &token);
                match resolved {
                    Some(id) if controller.select_history_entry(&id) => {
                        print_preview(&render_preview(&controller.state().markup, policy));
                    }
                    _ => eprintln!("履歴が見つかりません: {token}"),
                }
            }
            StudioAction::Edit(path) => match std::fs::read_to_string(&path) {
                Ok(content) => {
                    studio.controller().edit_markup(content);
                    println!("✔ 読み込みました: {}\n", path.display());
                }
                Err(e) => eprintln!("読み込みエラー: {e}"),
            },
            StudioAction::Show => print_preview(&render_preview(&studio.snapshot().markup, policy)),
            StudioAction::Copy => match copy_to_clipboard(&studio.snapshot().markup) {
                Ok(()) => println!("✔ {COPY_CONFIRMATION}"),
                Err(e) => eprintln!("{e}"),
            },
            StudioAction::Download => {
                let now = chrono::Utc::now().timestamp_millis();
                match write_svg(&studio.snapshot().markup, save_dir, now) {
                    Ok(Some(path)) => println!("✔ 保存しました: {}", path.display()),
                    Ok(None) => eprintln!("{}", SvgGeniusError::EmptyMarkup),
                    Err(e) => eprintln!("{e}"),
                }
            }
            StudioAction::ClearHistory => {
                if !studio.controller().has_clearable_history() {
                    println!("{EMPTY_HISTORY_TEXT}");
                } else if studio.controller().clear_history(confirm_clear) {
                    println!("✔ 履歴を削除しました");
                }
            }
            StudioAction::Help => println!("{HELP}\n"),
            StudioAction::Quit => break,
            StudioAction::Unknown(input) if input.is_empty() => {}
            StudioAction::Unknown(input) => eprintln!("不明なコマンド: {input}\n{HELP}"),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_prompt() {
        assert_eq!(parse_action("  a red fox "), StudioAction::Prompt("a red fox".into()));
    }

    #[test]
    fn test_parse_blank() {
        assert_eq!(parse_action("   "), StudioAction::Unknown(String::new()));
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_action(":n"), StudioAction::New);
        assert_eq!(parse_action(":history"), StudioAction::History);
        assert_eq!(parse_action(":s 3"), StudioAction::Select("3".into()));
        assert_eq!(parse_action(":e  art.svg"), StudioAction::Edit(PathBuf::from("art.svg")));
        assert_eq!(parse_action(":clear"), StudioAction::ClearHistory);
        assert_eq!(parse_action(":q"), StudioAction::Quit);
    }

    #[test]
    fn test_parse_command_missing_argument() {
        assert_eq!(parse_action(":s"), StudioAction::Unknown(":s".into()));
        assert_eq!(parse_action(":zzz"), StudioAction::Unknown(":zzz".into()));
    }
}
