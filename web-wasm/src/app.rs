//! メインアプリケーションコンポーネント

use crate::api::gemini::generate_markup;
use crate::browser;
use crate::components::{
    editor::CodeEditor,
    header::Header,
    history_panel::HistoryPanel,
    preview::Preview,
    prompt_panel::PromptPanel,
    settings_panel::SettingsPanel,
};
use crate::storage::LocalStore;
use leptos::prelude::*;
use leptos::task::spawn_local;
use svg_genius_common::{
    Controller, GenerationSettings, RenderPolicy, CLEAR_HISTORY_PROMPT, COPY_CONFIRMATION,
};

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    // 状態はコントローラだけが持つ（起動時に localStorage から復元）
    let controller = RwSignal::new(Controller::new(LocalStore));
    let settings = StoredValue::new(GenerationSettings::default());

    let (api_key, set_api_key) =
        signal(option_env!("GEMINI_API_KEY").unwrap_or_default().to_string());
    let (policy, set_policy) = signal(RenderPolicy::default());

    let state = Memo::new(move |_| controller.with(|c| c.state().clone()));
    let markup = Memo::new(move |_| state.with(|s| s.markup.clone()));
    let prompt = Memo::new(move |_| state.with(|s| s.prompt.clone()));
    let error = Memo::new(move |_| state.with(|s| s.error.clone()));
    let history = Memo::new(move |_| state.with(|s| s.history.clone()));
    let has_markup = Memo::new(move |_| state.with(|s| s.has_markup()));
    let is_generating = Memo::new(move |_| state.with(|s| s.is_generating()));

    let on_prompt_input = move |text: String| controller.update(|c| c.set_prompt(text));

    // 生成開始はコントローラが判定（空プロンプト・生成中は None）
    let on_submit = move |_| {
        let mut request = None;
        controller.update(|c| request = c.submit_current_prompt());
        let Some(request) = request else {
            return;
        };

        let api_key = api_key.get_untracked();
        let settings = settings.get_value();
        spawn_local(async move {
            let result = generate_markup(&api_key, &settings, &request).await;
            controller.update(|c| c.finish_generation(result, browser::now_ms()));
        });
    };

    let on_edit = move |text: String| controller.update(|c| c.edit_markup(text));

    let on_select = move |id: String| {
        controller.update(|c| {
            c.select_history_entry(&id);
        })
    };

    let on_clear = move |_| {
        if !controller.with_untracked(|c| c.has_clearable_history()) {
            return;
        }
        if browser::confirm(CLEAR_HISTORY_PROMPT) {
            controller.update(|c| {
                c.clear_history(|| true);
            });
        }
    };

    let on_copy = move |_| {
        let text = markup.get_untracked();
        spawn_local(async move {
            match browser::copy_text(&text).await {
                Ok(()) => browser::alert(COPY_CONFIRMATION),
                Err(e) => gloo::console::error!(e),
            }
        });
    };

    let on_download = move |_| browser::download_svg(&markup.get_untracked());

    view! {
        <div class="container">
            <Header markup=markup on_copy=on_copy on_download=on_download />

            <div class="layout">
                <HistoryPanel history=history on_select=on_select on_clear=on_clear />

                <main class="workspace">
                    <Preview markup=markup policy=policy />
                    <CodeEditor markup=markup on_edit=on_edit />
                </main>

                <div class="sidebar">
                    <PromptPanel
                        prompt=prompt
                        has_markup=has_markup
                        is_generating=is_generating
                        error=error
                        on_input=on_prompt_input
                        on_submit=on_submit
                    />
                    <SettingsPanel
                        api_key=api_key
                        set_api_key=set_api_key
                        policy=policy
                        set_policy=set_policy
                    />
                </div>
            </div>
        </div>
    }
}
