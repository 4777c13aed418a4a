#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use web_time::Duration;

    use crate::backends::StaticMedia;
    use crate::clock::TestClock;
    use crate::effects::{Dispose, keyed_effect};
    use crate::env::{Env, EnvEvent, EventKind};
    use crate::geometry::Vec2;
    use crate::input::PointerClick;
    use crate::runtime::{Runtime, remember, remember_state, remember_with_key};
    use crate::scope::Scope;
    use crate::signal::signal;

    #[test]
    fn test_signal_basic() {
        let sig = signal(42);
        assert_eq!(sig.get(), 42);

        sig.set(100);
        assert_eq!(sig.get(), 100);

        sig.update(|v| *v += 1);
        assert_eq!(sig.get(), 101);
    }

    #[test]
    fn test_signal_subscription() {
        let sig = signal(0);
        let seen = Rc::new(RefCell::new(Vec::new()));

        let seen_clone = seen.clone();
        let id = sig.subscribe(move |v| seen_clone.borrow_mut().push(*v));

        sig.set(1);
        sig.update(|v| *v += 1);
        assert_eq!(*seen.borrow(), vec![1, 2]);

        sig.unsubscribe(id);
        sig.set(9);
        assert_eq!(*seen.borrow(), vec![1, 2]);
    }

    #[test]
    fn test_signal_subscriber_may_read_back() {
        let sig = signal(0);
        let observed = Rc::new(Cell::new(-1));

        let sig2 = sig.clone();
        let observed2 = observed.clone();
        sig.subscribe(move |_| observed2.set(sig2.get()));

        sig.set(7);
        assert_eq!(observed.get(), 7);
    }

    #[test]
    fn test_scope_explicit_dispose() {
        let cleaned_up = Rc::new(Cell::new(false));

        let scope = Scope::new();
        let cleaned_up_clone = cleaned_up.clone();
        scope.add_disposer(move || cleaned_up_clone.set(true));

        assert!(!cleaned_up.get());
        scope.dispose();
        assert!(cleaned_up.get());
    }

    #[test]
    fn test_scope_drop_runs_disposers() {
        let cleaned_up = Rc::new(Cell::new(false));
        {
            let scope = Scope::new();
            let cleaned_up_clone = cleaned_up.clone();
            scope.add_disposer(move || cleaned_up_clone.set(true));
        }
        assert!(cleaned_up.get());
    }

    #[test]
    fn test_remember_slot_persists_across_frames() {
        let mut rt = Runtime::headless();

        let first = rt.frame(|| {
            let slot = remember_state(|| 0);
            *slot.borrow_mut() += 1;
            *slot.borrow()
        });
        let second = rt.frame(|| {
            let slot = remember_state(|| 0);
            *slot.borrow_mut() += 1;
            *slot.borrow()
        });

        assert_eq!(first, 1);
        assert_eq!(second, 2);
    }

    #[test]
    fn test_key_based_remember() {
        let mut rt = Runtime::headless();

        rt.frame(|| {
            let val1 = remember_with_key("test", || 42);
            let val2 = remember_with_key("test", || 100);

            // Should return the same instance
            assert_eq!(*val1, 42);
            assert_eq!(*val2, 42); // Not 100, because key exists
        });
    }

    #[test]
    fn test_keyed_effect_lifecycle() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut rt = Runtime::headless();

        let compose = |key: i32, log: Rc<RefCell<Vec<String>>>| {
            keyed_effect(key, move || {
                log.borrow_mut().push(format!("setup {key}"));
                let log = log.clone();
                Dispose::new(move || log.borrow_mut().push(format!("teardown {key}")))
            });
        };

        rt.frame(|| compose(1, log.clone()));
        rt.frame(|| compose(1, log.clone())); // same key: nothing happens
        rt.frame(|| compose(2, log.clone())); // old teardown, new setup
        rt.shutdown(); // final teardown

        assert_eq!(
            *log.borrow(),
            vec!["setup 1", "teardown 1", "setup 2", "teardown 2"]
        );
    }

    #[test]
    fn test_timer_fires_on_pump_after_due() {
        let clock = TestClock::start_now();
        let env = Env::builder().clock(clock.clone()).build();

        let fired = Rc::new(Cell::new(false));
        let fired_clone = fired.clone();
        env.set_timeout(Duration::from_millis(100), move || fired_clone.set(true));

        env.pump();
        assert!(!fired.get());

        clock.advance(Duration::from_millis(99));
        env.pump();
        assert!(!fired.get());

        clock.advance(Duration::from_millis(1));
        env.pump();
        assert!(fired.get());
    }

    #[test]
    fn test_zero_delay_timer_is_not_synchronous() {
        let env = Env::builder().clock(TestClock::start_now()).build();

        let fired = Rc::new(Cell::new(false));
        let fired_clone = fired.clone();
        env.set_timeout(Duration::ZERO, move || fired_clone.set(true));

        assert!(!fired.get());
        env.pump();
        assert!(fired.get());
    }

    #[test]
    fn test_cancelled_timer_never_fires() {
        let clock = TestClock::start_now();
        let env = Env::builder().clock(clock.clone()).build();

        let fired = Rc::new(Cell::new(false));
        let fired_clone = fired.clone();
        let token = env.set_timeout(Duration::from_millis(10), move || fired_clone.set(true));
        env.cancel_timeout(token);

        clock.advance(Duration::from_millis(20));
        env.pump();
        assert!(!fired.get());
    }

    #[test]
    fn test_event_streams_filter_by_kind() {
        let env = Env::headless();

        let clicks = Rc::new(Cell::new(0));
        let medias = Rc::new(Cell::new(0));

        let clicks_clone = clicks.clone();
        let token = env.subscribe(EventKind::PointerClick, move |_| {
            clicks_clone.set(clicks_clone.get() + 1);
        });
        let medias_clone = medias.clone();
        env.subscribe(EventKind::MediaChange, move |_| {
            medias_clone.set(medias_clone.get() + 1);
        });

        env.emit(EnvEvent::PointerClick(PointerClick::primary(Vec2 {
            x: 1.0,
            y: 1.0,
        })));
        env.emit(EnvEvent::MediaChanged);
        assert_eq!((clicks.get(), medias.get()), (1, 1));

        env.unsubscribe(token);
        env.emit(EnvEvent::PointerClick(PointerClick::primary(Vec2 {
            x: 1.0,
            y: 1.0,
        })));
        assert_eq!((clicks.get(), medias.get()), (1, 1));
    }

    #[test]
    fn test_inline_request_delivers_on_pump() {
        use crate::backends::StubTransport;

        let stub = StubTransport::new();
        stub.respond_json("http://x/a", "[1,2]");
        let env = Env::builder().transport(stub).build();

        let got = Rc::new(RefCell::new(None));
        let got_clone = got.clone();
        env.request("http://x/a", move |res| *got_clone.borrow_mut() = Some(res));

        assert!(got.borrow().is_none());
        env.pump();
        assert_eq!(*got.borrow(), Some(Ok(b"[1,2]".to_vec())));
    }

    #[test]
    fn test_superseded_requests_both_deliver_in_order() {
        use crate::backends::StubTransport;

        let stub = StubTransport::new();
        stub.respond_json("http://x/1", "1");
        stub.respond_json("http://x/2", "2");
        let env = Env::builder().transport(stub).build();

        let order = Rc::new(RefCell::new(Vec::new()));
        for url in ["http://x/1", "http://x/2"] {
            let order = order.clone();
            env.request(url, move |res| {
                if let Ok(bytes) = res {
                    order.borrow_mut().push(bytes);
                }
            });
        }

        env.pump();
        assert_eq!(*order.borrow(), vec![b"1".to_vec(), b"2".to_vec()]);
    }

    #[test]
    fn test_static_media_toggles() {
        let media = StaticMedia::new();
        let env = Env::builder().media(media.clone()).build();

        assert!(!env.media_matches("(min-width: 600px)"));
        media.set_matches("(min-width: 600px)", true);
        assert!(env.media_matches("(min-width: 600px)"));
    }

    #[test]
    fn test_remember_survives_only_until_shutdown() {
        let mut rt = Runtime::headless();
        rt.frame(|| {
            let slot = remember(|| 7);
            assert_eq!(*slot, 7);
        });
        rt.shutdown();

        // A fresh runtime starts from empty slots.
        let mut rt = Runtime::headless();
        let value = rt.frame(|| *remember(|| 8));
        assert_eq!(value, 8);
    }
}
