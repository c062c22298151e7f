//! ヘッダーコンポーネント（コピー/ダウンロード）

use leptos::prelude::*;
use svg_genius_common::actions_available;

#[component]
pub fn Header<FC, FD>(markup: Memo<String>, on_copy: FC, on_download: FD) -> impl IntoView
where
    FC: Fn(()) + 'static + Clone + Send,
    FD: Fn(()) + 'static + Clone + Send,
{
    view! {
        <header class="header">
            <h1>"SVG Genius"</h1>
            <span class="header-subtitle">"AI Vector Studio"</span>

            <Show when=move || markup.with(|m| actions_available(m))>
                <div class="header-actions">
                    <button
                        class="btn btn-secondary"
                        on:click={
                            let on_copy = on_copy.clone();
                            move |_| on_copy(())
                        }
                    >
                        "Copy Code"
                    </button>
                    <button
                        class="btn btn-primary"
                        on:click={
                            let on_download = on_download.clone();
                            move |_| on_download(())
                        }
                    >
                        "Download"
                    </button>
                </div>
            </Show>
        </header>
    }
}
