use tether_core::{Signal, remember, signal};

/// Boolean flag with a flip that always inverts the latest value.
#[derive(Clone)]
pub struct Toggle {
    state: Signal<bool>,
}

impl Toggle {
    pub fn get(&self) -> bool {
        self.state.get()
    }

    /// Inverts the value as of invocation time, not a snapshot captured at
    /// composition time, so rapid repeated flips each invert correctly.
    pub fn flip(&self) {
        self.state.update(|v| *v = !*v);
    }
}

pub fn remember_toggle(initial: bool) -> Toggle {
    (*remember(move || Toggle {
        state: signal(initial),
    }))
    .clone()
}
