//! SVGコードエディタ

use leptos::prelude::*;

/// 文字数の表示
pub fn character_count_label(markup: &str) -> String {
    match markup.chars().count() {
        0 => "Empty".to_string(),
        n => format!("{n} characters"),
    }
}

#[component]
pub fn CodeEditor<FE>(markup: Memo<String>, on_edit: FE) -> impl IntoView
where
    FE: Fn(String) + 'static + Clone + Send,
{
    view! {
        <section class="code-editor">
            <div class="code-editor-header">
                <span>"SVG Code"</span>
                <span class="text-muted">{move || markup.with(|m| character_count_label(m))}</span>
            </div>
            <textarea
                class="code-editor-input"
                spellcheck="false"
                prop:value=move || markup.get()
                on:input=move |ev| on_edit(event_target_value(&ev))
            />
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_character_count_label() {
        assert_eq!(character_count_label(""), "Empty");
        assert_eq!(character_count_label("<svg/>"), "6 characters");
        // 文字単位で数える
        assert_eq!(character_count_label("<text>αβ</text>"), "15 characters");
    }
}
