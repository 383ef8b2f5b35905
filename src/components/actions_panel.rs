//! Actions Panel Component
//!
//! Export, import and clear-all for the whole ranking, plus a download of
//! the recent log lines.

use leptos::prelude::*;
use leptos::task::spawn_local;
use rolling_logger::LogBuffer;
use tracing::{info, warn};
use wasm_bindgen::JsCast;

use crate::config::LOG_FILENAME;
use crate::context::AppContext;
use crate::export::{export_snapshot, import_ranking, read_file_text, trigger_download};
use crate::stats::pluralize;
use crate::store::{store_clear, store_replace, use_ranking_store, RankingStateStoreFields};

#[component]
pub fn ActionsPanel(export_filename: &'static str) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_ranking_store();
    let has_flavors = move || !store.ranking().read().is_empty();
    let logs = StoredValue::new(expect_context::<LogBuffer>());

    let on_export = move |_| {
        let snapshot = export_snapshot(&store.ranking().read());
        let result = snapshot
            .to_json_pretty()
            .map_err(|e| e.to_string())
            .and_then(|json| {
                trigger_download(export_filename, &json).map_err(|e| format!("{:?}", e))
            });
        match result {
            Ok(()) => {
                info!(count = snapshot.ranking.len(), "ranking exported");
                ctx.notify("Ranking exported!", "Your chip flavor ranking has been downloaded.");
            }
            Err(e) => {
                warn!(error = %e, "export failed");
                ctx.notify_error("Export failed", "Your browser blocked the download.");
            }
        }
    };

    let on_import = move |ev: web_sys::Event| {
        let Some(input) = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        else {
            return;
        };
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };
        // Allow picking the same file again
        input.set_value("");

        spawn_local(async move {
            let text = match read_file_text(file).await {
                Ok(text) => text,
                Err(e) => {
                    warn!(error = ?e, "reading import file failed");
                    ctx.notify_error("Import failed", "The file could not be read.");
                    return;
                }
            };
            match import_ranking(&text) {
                Ok(ranking) => {
                    let count = ranking.len();
                    store_replace(&store, ranking);
                    ctx.notify(
                        "Ranking imported!",
                        format!("{} loaded into your ranking.", pluralize(count, "flavor")),
                    );
                }
                Err(e) => {
                    warn!(error = %e, "import rejected");
                    ctx.notify_error("Import failed", e.to_string());
                }
            }
        });
    };

    let on_clear = move |_| {
        store_clear(&store);
        ctx.notify("All flavors cleared", "Your ranking list has been reset.");
    };

    let on_download_logs = move |_| {
        let buffer = logs.get_value();
        if buffer.is_empty() {
            ctx.notify("No logs yet", "Nothing has been logged in this session.");
            return;
        }
        let count = buffer.len();
        match trigger_download(LOG_FILENAME, &buffer.render()) {
            Ok(()) => ctx.notify("Logs downloaded", format!("{} saved.", pluralize(count, "log line"))),
            Err(e) => {
                warn!(error = ?e, "log download failed");
                ctx.notify_error("Download failed", "Your browser blocked the download.");
            }
        }
    };

    view! {
        <div class="card actions-panel">
            <h2 class="card-title">"Actions"</h2>
            <Show when=has_flavors>
                <button class="secondary-btn" on:click=on_export>"Export Ranking"</button>
            </Show>
            <label class="secondary-btn file-btn">
                "Import Ranking"
                <input type="file" accept="application/json,.json" class="hidden" on:change=on_import />
            </label>
            <Show when=has_flavors>
                <button class="danger-btn" on:click=on_clear>"Clear All"</button>
            </Show>
            <button class="link-btn" on:click=on_download_logs>"Download Logs"</button>
        </div>
    }
}
