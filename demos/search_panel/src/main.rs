//! Scripted search panel driving every hook through a headless environment.
//!
//! Runs a short session frame by frame: typing faster than the debounce,
//! letting the query settle, fetching results, narrowing the window, and
//! dismissing the panel with an outside click. Pass a URL argument to do a
//! single live fetch through the desktop transport instead.

use std::rc::Rc;

use serde::Deserialize;
use tether_core::backends::{MemoryStorage, StaticMedia, StubTransport};
use tether_core::{Env, EnvEvent, PointerClick, Rect, Runtime, TestClock, Vec2};
use tether_hooks::{
    FetchState, debounced, fetch_json, media_matches, on_click_outside, persisted,
    remember_previous, remember_toggle,
};
use tether_platform::{WindowMedia, WindowMetrics};
use web_time::Duration;

#[derive(Clone, Debug, Deserialize, PartialEq)]
struct Results {
    hits: Vec<String>,
}

const COMPACT: &str = "(max-width: 600px)";
const DEBOUNCE: Duration = Duration::from_millis(250);

/// One frame of the panel; returns a printable summary of its state.
fn search_panel(raw_query: &str) -> String {
    let compact = media_matches(COMPACT);
    let open = remember_toggle(true);
    let last_submitted = persisted("search.last-query", String::new);

    let query = debounced(raw_query.to_string(), DEBOUNCE);
    let previous_query = remember_previous(query.clone());

    let dismiss_area = on_click_outside({
        let open = open.clone();
        move || {
            if open.get() {
                open.flip();
            }
        }
    });
    // Stands in for the host renderer resolving the panel's layout.
    dismiss_area.attach(Rect {
        x: 0.0,
        y: 0.0,
        w: 480.0,
        h: 320.0,
    });

    let results = fetch_json::<Results>(&format!("https://search.example/?q={query}"));
    if results.data.is_some() && last_submitted.get() != query {
        last_submitted.set(query.clone());
    }

    format!(
        "panel[{}{}] query={query:?} (prev {previous_query:?}) results={} saved={:?}",
        if open.get() { "open" } else { "closed" },
        if compact { ", compact" } else { "" },
        describe(&results),
        last_submitted.get(),
    )
}

fn describe(state: &FetchState<Results>) -> String {
    if state.loading {
        "loading".into()
    } else if let Some(err) = &state.error {
        format!("error ({err})")
    } else if let Some(results) = &state.data {
        format!("{} hit(s)", results.hits.len())
    } else {
        "idle".into()
    }
}

fn scripted() {
    let clock = TestClock::start_now();
    let media = StaticMedia::new();
    let http = StubTransport::new();
    http.respond_json("https://search.example/?q=t", r#"{"hits":[]}"#);
    http.respond_json(
        "https://search.example/?q=tether",
        r#"{"hits":["tether-core","tether-hooks","tether-platform"]}"#,
    );

    let env = Env::builder()
        .clock(clock.clone())
        .media(media.clone())
        .storage(MemoryStorage::new())
        .transport(http)
        .build();
    let mut rt = Runtime::new(env);

    // Type "tether" one keystroke per frame, faster than the debounce.
    for prefix in ["t", "te", "tet", "teth", "tethe", "tether"] {
        log::info!("{}", rt.frame(|| search_panel(prefix)));
        clock.advance(Duration::from_millis(40));
        rt.tick();
    }

    // Quiet period: the query settles, the fetch goes out.
    clock.advance(Duration::from_millis(300));
    rt.tick();
    log::info!("{}", rt.frame(|| search_panel("tether")));

    // Next tick delivers the response.
    rt.tick();
    log::info!("{}", rt.frame(|| search_panel("tether")));

    // Narrow the window: the panel goes compact.
    media.set_matches(COMPACT, true);
    rt.dispatch(EnvEvent::MediaChanged);
    log::info!("{}", rt.frame(|| search_panel("tether")));

    // Click outside the panel: it dismisses.
    rt.dispatch(EnvEvent::PointerClick(PointerClick::primary(Vec2 {
        x: 700.0,
        y: 40.0,
    })));
    log::info!("{}", rt.frame(|| search_panel("tether")));

    rt.shutdown();
}

fn live_fetch(url: &str) {
    let media = WindowMedia::new(WindowMetrics::default());
    let env = match tether_platform::desktop_env("tether-search-panel", Rc::clone(&media)) {
        Ok(env) => env,
        Err(err) => {
            log::error!("cannot build desktop env: {err}");
            return;
        }
    };
    let mut rt = Runtime::new(env);
    let url = url.to_string();

    for _ in 0..300 {
        let state = rt.frame(|| fetch_json::<serde_json::Value>(&url));
        if !state.loading {
            match (state.data, state.error) {
                (Some(value), None) => log::info!("{url}: {value}"),
                (_, Some(err)) => log::error!("{url}: {err}"),
                _ => {}
            }
            rt.shutdown();
            return;
        }
        std::thread::sleep(std::time::Duration::from_millis(100));
        rt.tick();
    }
    log::warn!("{url}: no response after 30s");
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match std::env::args().nth(1) {
        Some(url) => live_fetch(&url),
        None => scripted(),
    }
}
