use tether_core::{Dispose, EventKind, current_env, keyed_effect, remember, signal};

/// Reactive boolean for a media condition.
///
/// The initial value is computed synchronously against the current
/// environment; afterwards the condition is re-evaluated on every
/// media-change event. The listener is deregistered when the query string
/// changes or the callsite is torn down.
pub fn media_matches(query: &str) -> bool {
    let env = current_env();

    let matched = remember({
        let env = env.clone();
        let query = query.to_string();
        move || signal(env.media_matches(&query))
    });

    keyed_effect(query.to_string(), {
        let matched = matched.clone();
        let query = query.to_string();
        move || {
            // A new query re-evaluates immediately, before any change event.
            matched.set(env.media_matches(&query));

            let token = env.subscribe(EventKind::MediaChange, {
                let matched = matched.clone();
                let env = env.clone();
                move |_| matched.set(env.media_matches(&query))
            });
            let env = env.clone();
            Dispose::new(move || env.unsubscribe(token))
        }
    });

    matched.get()
}
