use std::cell::RefCell;
use std::rc::Rc;

use tether_core::{Dispose, EnvEvent, EventKind, NodeRef, current_env, keyed_effect, remember};

type Callback = Box<dyn Fn()>;

/// Invokes `callback` whenever a pointer click lands outside the element the
/// returned handle is attached to.
///
/// The handle is stable across frames; attach it to exactly one rendered
/// element. One click subscription is registered per callsite at mount and
/// removed at unmount; the callback slot is refreshed every frame, so the
/// handler never runs a stale closure. While the handle is unattached no
/// click fires the callback. Rapid clicks are not debounced: each qualifying
/// click fires once.
pub fn on_click_outside(callback: impl Fn() + 'static) -> NodeRef {
    let node = remember(NodeRef::new);
    let latest: Rc<RefCell<Callback>> = remember(|| RefCell::new(Box::new(|| {}) as Callback));
    *latest.borrow_mut() = Box::new(callback);

    keyed_effect((), {
        let node = (*node).clone();
        let latest = latest.clone();
        move || {
            let env = current_env();
            let token = env.subscribe(EventKind::PointerClick, move |event| {
                let EnvEvent::PointerClick(click) = event else {
                    return;
                };
                match node.bounds() {
                    Some(bounds) if !bounds.contains(click.position) => (*latest.borrow())(),
                    // Unattached or inside: not an outside interaction.
                    _ => {}
                }
            });
            Dispose::new(move || env.unsubscribe(token))
        }
    });

    (*node).clone()
}
