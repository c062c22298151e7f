//! プロンプト入力パネル

use leptos::prelude::*;

/// 送信ボタンの表示
pub fn submit_label(is_generating: bool, has_markup: bool) -> &'static str {
    match (is_generating, has_markup) {
        (true, _) => "Generating...",
        (false, true) => "Modify SVG",
        (false, false) => "Generate SVG",
    }
}

/// 入力欄の案内
pub fn prompt_placeholder(has_markup: bool) -> &'static str {
    if has_markup {
        "Describe how to change the current SVG (e.g. \"make it dark mode\")"
    } else {
        "Describe an illustration (e.g. \"a fox sleeping under the moon\")"
    }
}

const QUICK_TIPS: &[&str] = &[
    "Be specific about colors, shapes and composition",
    "After generating, describe changes to modify the current SVG",
    "Pick an entry from the history to continue from it",
];

#[component]
pub fn PromptPanel<FI, FS>(
    prompt: Memo<String>,
    has_markup: Memo<bool>,
    is_generating: Memo<bool>,
    error: Memo<Option<String>>,
    on_input: FI,
    on_submit: FS,
) -> impl IntoView
where
    FI: Fn(String) + 'static + Clone + Send,
    FS: Fn(()) + 'static + Clone + Send,
{
    let is_blank = move || prompt.with(|p| p.trim().is_empty());

    view! {
        <section class="prompt-panel">
            <textarea
                class="prompt-input"
                rows="4"
                placeholder=move || prompt_placeholder(has_markup.get())
                prop:value=move || prompt.get()
                on:input=move |ev| on_input(event_target_value(&ev))
            />

            <button
                class="btn btn-primary"
                disabled=move || is_generating.get() || is_blank()
                on:click={
                    let on_submit = on_submit.clone();
                    move |_| on_submit(())
                }
            >
                {move || submit_label(is_generating.get(), has_markup.get())}
            </button>

            <Show when=move || error.with(Option::is_some)>
                <div class="error-box" role="alert">
                    {move || error.get().unwrap_or_default()}
                </div>
            </Show>

            <div class="quick-tips">
                <h3>"Quick Tips"</h3>
                <ul>
                    {QUICK_TIPS.iter().map(|tip| view! { <li>{*tip}</li> }).collect_view()}
                </ul>
            </div>
        </section>
    }
}
