//! プレビューコンポーネント

use leptos::prelude::*;
use svg_genius_common::{render_preview, PreviewContent, RenderPolicy, PLACEHOLDER_TEXT};

#[component]
pub fn Preview(markup: Memo<String>, policy: ReadSignal<RenderPolicy>) -> impl IntoView {
    let content = move || markup.with(|m| render_preview(m, policy.get()));

    view! {
        <section class="preview">
            {move || match content() {
                PreviewContent::Placeholder => view! {
                    <div class="preview-placeholder">
                        <p class="text-muted">{PLACEHOLDER_TEXT}</p>
                    </div>
                }.into_any(),
                PreviewContent::Markup(svg) => view! {
                    <div class="preview-canvas" inner_html=svg></div>
                }.into_any(),
                PreviewContent::Unrenderable(reason) => view! {
                    <div class="preview-placeholder">
                        <p class="error-text">{format!("Cannot preview this SVG: {reason}")}</p>
                    </div>
                }.into_any(),
            }}
        </section>
    }
}
