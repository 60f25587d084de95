use leptos::logging::warn;
use leptos::prelude::*;
use leptos::task::spawn_local;
use name_pair_types::{ExportFormat, Session, SessionEvent, Status};

use crate::{browser, fetch};

#[component]
pub fn App() -> impl IntoView {
    let session = RwSignal::new(Session::new());
    // Bumped when the result set is replaced, not on edits, so the list
    // isn't rebuilt (and the focused input lost) on every keystroke.
    let run = RwSignal::new(0u32);
    let dark = RwSignal::new(browser::prefers_dark());

    Effect::new(move |_| browser::apply_dark(dark.get()));

    let dispatch = move |event: SessionEvent| {
        let replaces_pairs = !matches!(
            event,
            SessionEvent::UrlChanged(_) | SessionEvent::NameEdited(..)
        );
        session.update(|s| *s = s.reduce(event));
        if replaces_pairs {
            run.update(|n| *n += 1);
        }
    };

    let start = move |_| {
        let current = session.get_untracked();
        if !current.can_start() {
            return;
        }
        dispatch(SessionEvent::ExtractionStarted);
        spawn_local(async move {
            let event = match fetch::fetch_page_text(&current.url).await {
                Ok(text) => SessionEvent::ExtractionSucceeded(text),
                Err(e) => {
                    warn!("fetch failed ({}): {e}", e.kind());
                    SessionEvent::ExtractionFailed(e)
                }
            };
            dispatch(event);
        });
    };

    let copy_all = move |_| {
        let pairs = session.with_untracked(|s| s.pairs.clone());
        spawn_local(async move {
            if let Err(e) = browser::copy_text(&pairs).await {
                warn!("clipboard write failed: {e:?}");
            }
        });
    };

    view! {
        <div id="app">
            <header>
                <h1>"📖 Trích xuất tên nhân vật"</h1>
                <button class="theme" on:click=move |_| dark.update(|d| *d = !*d)>
                    {move || if dark.get() { "🌞 Sáng" } else { "🌙 Tối" }}
                </button>
            </header>

            <input
                type="text"
                class="url"
                placeholder="Nhập URL (vd: https://truyenfull.vn/...)"
                prop:value=move || session.with(|s| s.url.clone())
                on:input=move |ev| dispatch(SessionEvent::UrlChanged(event_target_value(&ev)))
            />
            <button
                class="start"
                on:click=start
                disabled=move || !session.with(Session::can_start)
            >
                {move || {
                    if session.with(Session::is_loading) { "Đang tải..." } else { "Bắt đầu trích xuất" }
                }}
            </button>

            {move || session.with(Session::error_message).map(|msg| view! { <p class="error">{msg}</p> })}
            {move || {
                (session.with(|s| s.status == Status::NoMatches))
                    .then(|| view! { <p class="empty">"Không tìm thấy tên nào."</p> })
            }}

            {move || {
                run.track();
                let pairs = session.with_untracked(|s| s.pairs.clone());
                if pairs.is_empty() {
                    return view! { <span/> }.into_any();
                }
                let count = pairs.len();
                view! {
                    <section class="results">
                        <h2>"📋 Kết quả (" {count} " tên):"</h2>
                        <ul class="pair-list">
                            {pairs.into_iter().enumerate().map(|(idx, p)| view! {
                                <li>
                                    <span class="han">{p.han}</span>
                                    <input
                                        prop:value=p.name
                                        on:input=move |ev| {
                                            dispatch(SessionEvent::NameEdited(idx, event_target_value(&ev)))
                                        }
                                    />
                                </li>
                            }).collect_view()}
                        </ul>
                        <div class="actions">
                            {ExportFormat::ALL.into_iter().map(|format| {
                                let label = format!("Tải {}", format.extension().to_uppercase());
                                view! {
                                    <button on:click=move |_| {
                                        let pairs = session.with_untracked(|s| s.pairs.clone());
                                        if let Err(e) = browser::download(&pairs, format) {
                                            warn!("download failed: {e:?}");
                                        }
                                    }>{label}</button>
                                }
                            }).collect_view()}
                            <button class="copy" on:click=copy_all>"📋 Sao chép tất cả"</button>
                        </div>
                    </section>
                }.into_any()
            }}
        </div>
    }
}
