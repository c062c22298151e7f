//! 履歴サイドバー

use leptos::prelude::*;
use svg_genius_common::{HistoryEntryView, HistoryList, EMPTY_HISTORY_TEXT};

#[component]
pub fn HistoryPanel<FS, FC>(history: Memo<HistoryList>, on_select: FS, on_clear: FC) -> impl IntoView
where
    FS: Fn(String) + 'static + Clone + Send,
    FC: Fn(()) + 'static + Clone + Send,
{
    let entries = move || {
        history.with(|h| h.iter().map(HistoryEntryView::from_record).collect::<Vec<_>>())
    };

    view! {
        <aside class="history-panel">
            <div class="history-header">
                <h2>{move || format!("History ({})", history.with(HistoryList::len))}</h2>
                <Show when=move || !history.with(HistoryList::is_empty)>
                    <button
                        class="btn btn-tertiary btn-small"
                        on:click={
                            let on_clear = on_clear.clone();
                            move |_| on_clear(())
                        }
                    >
                        "Clear All"
                    </button>
                </Show>
            </div>

            <Show
                when=move || !history.with(HistoryList::is_empty)
                fallback=|| view! { <p class="text-muted">{EMPTY_HISTORY_TEXT}</p> }
            >
                <ul class="history-list">
                    <For
                        each=entries
                        key=|entry| entry.id.clone()
                        children={
                            let on_select = on_select.clone();
                            move |entry| {
                                let on_select = on_select.clone();
                                let id = entry.id.clone();
                                view! {
                                    <li class="history-item" on:click=move |_| on_select(id.clone())>
                                        <span class="history-prompt">{entry.prompt_preview}</span>
                                        <span class="history-time">{entry.time_of_day}</span>
                                    </li>
                                }
                            }
                        }
                    />
                </ul>
            </Show>
        </aside>
    }
}
