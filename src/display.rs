//! 端末表示（履歴パネル・プレビュー）

use svg_genius_common::{
    HistoryEntryView, HistoryList, PreviewContent, EMPTY_HISTORY_TEXT, PLACEHOLDER_TEXT,
};

/// 一覧に表示するIDの長さ
const SHORT_ID_LEN: usize = 8;

/// 番号（1始まり、新しい順）またはIDの前方一致で履歴を特定
///
/// 前方一致が複数ある場合は特定できないので None。
pub fn resolve_entry(history: &HistoryList, token: &str) -> Option<String> {
    let token = token.trim();
    if token.is_empty() {
        return None;
    }
    if let Ok(index) = token.parse::<usize>() {
        if let Some(record) = index.checked_sub(1).and_then(|i| history.iter().nth(i)) {
            return Some(record.id.clone());
        }
    }

    let mut matches = history.iter().filter(|r| r.id.starts_with(token));
    let first = matches.next()?;
    if matches.next().is_some() {
        return None;
    }
    Some(first.id.clone())
}

/// 履歴一覧の行
pub fn history_lines(history: &HistoryList) -> Vec<String> {
    history
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let view = HistoryEntryView::from_record(record);
            let short_id: String = view.id.chars().take(SHORT_ID_LEN).collect();
            format!("{:>2}. {}  {}  {}", i + 1, view.time_of_day, short_id, view.prompt_preview)
        })
        .collect()
}

pub fn print_history(history: &HistoryList) {
    if history.is_empty() {
        println!("{EMPTY_HISTORY_TEXT}");
        return;
    }
    println!("History ({}):", history.len());
    for line in history_lines(history) {
        println!("{line}");
    }
}

pub fn print_preview(content: &PreviewContent) {
    match content {
        PreviewContent::Placeholder => println!("{PLACEHOLDER_TEXT}"),
        PreviewContent::Markup(markup) => println!("{markup}"),
        PreviewContent::Unrenderable(reason) => {
            eprintln!("⚠ プレビューできません: {reason}");
        }
    }
}
