//! 設定パネルコンポーネント

use leptos::prelude::*;
use svg_genius_common::RenderPolicy;

#[component]
pub fn SettingsPanel(
    api_key: ReadSignal<String>,
    set_api_key: WriteSignal<String>,
    policy: ReadSignal<RenderPolicy>,
    set_policy: WriteSignal<RenderPolicy>,
) -> impl IntoView {
    view! {
        <details class="settings-panel">
            <summary>"Settings"</summary>
            <div class="settings-grid">
                <div class="form-group">
                    <label for="api-key">"Gemini API Key"</label>
                    <input
                        type="password"
                        id="api-key"
                        placeholder="API Key..."
                        prop:value=move || api_key.get()
                        on:input=move |ev| {
                            set_api_key.set(event_target_value(&ev));
                        }
                    />
                    <a
                        href="https://aistudio.google.com/app/apikey"
                        target="_blank"
                        rel="noopener noreferrer"
                        class="api-key-link"
                    >
                        "Get an API key →"
                    </a>
                </div>

                <div class="form-group">
                    <label>
                        <input
                            type="checkbox"
                            prop:checked=move || policy.get() == RenderPolicy::Sanitized
                            on:change=move |ev| {
                                set_policy.set(RenderPolicy::from_sanitize_flag(event_target_checked(&ev)));
                            }
                        />
                        " Sanitize preview"
                    </label>
                </div>
            </div>
        </details>
    }
}
