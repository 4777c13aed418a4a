use std::cell::Cell;
use std::rc::Rc;

use tether_core::MediaBackend;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WindowMetrics {
    /// Logical pixels.
    pub width: f32,
    pub height: f32,
    pub dark_mode: bool,
}

impl Default for WindowMetrics {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
            dark_mode: false,
        }
    }
}

/// Evaluates a small media-query subset against live window metrics.
///
/// Supported clauses, joined with `and`:
/// `(min-width: Npx)`, `(max-width: Npx)`, `(min-height: Npx)`,
/// `(max-height: Npx)`, `(orientation: portrait|landscape)`,
/// `(prefers-color-scheme: dark|light)`.
///
/// An unrecognized clause makes the whole query false, with a warning.
pub struct WindowMedia {
    metrics: Cell<WindowMetrics>,
}

impl WindowMedia {
    pub fn new(metrics: WindowMetrics) -> Rc<Self> {
        Rc::new(Self {
            metrics: Cell::new(metrics),
        })
    }

    /// Call on resize or theme change, then emit
    /// [`EnvEvent::MediaChanged`](tether_core::EnvEvent) so watchers
    /// re-evaluate.
    pub fn update(&self, metrics: WindowMetrics) {
        self.metrics.set(metrics);
    }

    pub fn metrics(&self) -> WindowMetrics {
        self.metrics.get()
    }
}

impl MediaBackend for WindowMedia {
    fn matches(&self, query: &str) -> bool {
        let metrics = self.metrics.get();
        query.split(" and ").all(|clause| {
            eval_clause(clause.trim(), &metrics).unwrap_or_else(|| {
                log::warn!("unsupported media clause {clause:?}");
                false
            })
        })
    }
}

fn eval_clause(clause: &str, m: &WindowMetrics) -> Option<bool> {
    let inner = clause.strip_prefix('(')?.strip_suffix(')')?;
    let (name, value) = inner.split_once(':')?;
    let (name, value) = (name.trim(), value.trim());
    match name {
        "min-width" => Some(m.width >= parse_px(value)?),
        "max-width" => Some(m.width <= parse_px(value)?),
        "min-height" => Some(m.height >= parse_px(value)?),
        "max-height" => Some(m.height <= parse_px(value)?),
        "orientation" => match value {
            "landscape" => Some(m.width >= m.height),
            "portrait" => Some(m.width < m.height),
            _ => None,
        },
        "prefers-color-scheme" => match value {
            "dark" => Some(m.dark_mode),
            "light" => Some(!m.dark_mode),
            _ => None,
        },
        _ => None,
    }
}

fn parse_px(value: &str) -> Option<f32> {
    value.strip_suffix("px").unwrap_or(value).trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn media(width: f32, height: f32, dark_mode: bool) -> Rc<WindowMedia> {
        WindowMedia::new(WindowMetrics {
            width,
            height,
            dark_mode,
        })
    }

    #[test]
    fn width_bounds() {
        let m = media(800.0, 600.0, false);
        assert!(m.matches("(min-width: 600px)"));
        assert!(m.matches("(min-width: 800px)"));
        assert!(!m.matches("(min-width: 900px)"));
        assert!(m.matches("(max-width: 1000px)"));
        assert!(!m.matches("(max-width: 640px)"));
    }

    #[test]
    fn and_combination() {
        let m = media(800.0, 600.0, true);
        assert!(m.matches("(min-width: 600px) and (prefers-color-scheme: dark)"));
        assert!(!m.matches("(min-width: 600px) and (prefers-color-scheme: light)"));
    }

    #[test]
    fn orientation() {
        assert!(media(800.0, 600.0, false).matches("(orientation: landscape)"));
        assert!(media(600.0, 800.0, false).matches("(orientation: portrait)"));
    }

    #[test]
    fn unsupported_clause_is_false() {
        let m = media(800.0, 600.0, false);
        assert!(!m.matches("(hover: hover)"));
        assert!(!m.matches("gibberish"));
    }

    #[test]
    fn update_changes_the_answer() {
        let m = media(400.0, 800.0, false);
        assert!(!m.matches("(min-width: 600px)"));
        m.update(WindowMetrics {
            width: 1024.0,
            ..m.metrics()
        });
        assert!(m.matches("(min-width: 600px)"));
    }
}
