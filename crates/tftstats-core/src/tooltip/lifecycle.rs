//! Tooltip show/hide lifecycle.

use parking_lot::Mutex;
use serde_json::Value;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tftstats_types::{Rect, TooltipSettings, TooltipVariant, Viewport};
use tokio::sync::watch;
use tokio::task::AbortHandle;

use super::position::{compute_placement, DEFAULT_MARGIN};
use super::surface::{TooltipDisplay, TriggerId};

/// How the user interacts with triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Hover enter/leave, with a hover-intent delay
    #[default]
    Pointer,
    /// Tap to toggle, no show delay
    Touch,
}

/// Timing and spacing for [`TooltipManager`].
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipOptions {
    pub margin: f64,
    pub hide_delay: Duration,
    pub show_delay: Duration,
    pub touch_show_delay: Duration,
}

impl Default for TooltipOptions {
    fn default() -> Self {
        Self {
            margin: DEFAULT_MARGIN,
            hide_delay: Duration::from_millis(100),
            show_delay: Duration::from_millis(200),
            touch_show_delay: Duration::ZERO,
        }
    }
}

impl From<&TooltipSettings> for TooltipOptions {
    fn from(settings: &TooltipSettings) -> Self {
        Self {
            margin: settings.margin,
            hide_delay: Duration::from_millis(settings.hide_delay_ms),
            show_delay: Duration::from_millis(settings.show_delay_ms),
            touch_show_delay: Duration::from_millis(settings.touch_show_delay_ms),
        }
    }
}

struct PendingTimer {
    generation: u64,
    handle: AbortHandle,
}

impl PendingTimer {
    fn cancel(self) {
        self.handle.abort();
    }
}

struct LifecycleState {
    viewport: Viewport,
    input_mode: InputMode,
    pending_hide: Option<PendingTimer>,
    pending_show: Option<PendingTimer>,
    generation: u64,
}

/// Owner of the one tooltip surface.
///
/// Every trigger shows and hides through the same manager; a `show` always
/// replaces whatever was visible, including a tooltip that is waiting out
/// its hide debounce. Renderers observe the surface through
/// [`TooltipManager::surface`]. Timers run on tokio, so the delayed
/// operations need a runtime.
pub struct TooltipManager {
    state: Mutex<LifecycleState>,
    surface: watch::Sender<TooltipDisplay>,
    options: TooltipOptions,
}

impl TooltipManager {
    pub fn new(options: TooltipOptions) -> Arc<Self> {
        let (surface, _) = watch::channel(TooltipDisplay::default());
        Arc::new(Self {
            state: Mutex::new(LifecycleState {
                viewport: Viewport::default(),
                input_mode: InputMode::default(),
                pending_hide: None,
                pending_show: None,
                generation: 0,
            }),
            surface,
            options,
        })
    }

    /// Receiver for the shared display state.
    pub fn surface(&self) -> watch::Receiver<TooltipDisplay> {
        self.surface.subscribe()
    }

    pub fn current(&self) -> TooltipDisplay {
        self.surface.borrow().clone()
    }

    pub fn set_viewport(&self, viewport: Viewport) {
        self.state.lock().viewport = viewport;
    }

    pub fn set_input_mode(&self, mode: InputMode) {
        self.state.lock().input_mode = mode;
    }

    pub fn input_mode(&self) -> InputMode {
        self.state.lock().input_mode
    }

    pub fn is_hide_pending(&self) -> bool {
        self.state.lock().pending_hide.is_some()
    }

    pub fn is_show_pending(&self) -> bool {
        self.state.lock().pending_show.is_some()
    }

    /// Show `content` for `trigger` right away.
    ///
    /// Cancels any pending hide or delayed show, and places the tooltip
    /// against the current viewport.
    pub fn show(&self, trigger: TriggerId, variant: TooltipVariant, content: Value, origin: Rect) {
        let mut state = self.state.lock();
        self.show_locked(&mut state, trigger, variant, content, origin);
    }

    fn show_locked(
        &self,
        state: &mut LifecycleState,
        trigger: TriggerId,
        variant: TooltipVariant,
        content: Value,
        origin: Rect,
    ) {
        if let Some(timer) = state.pending_hide.take() {
            timer.cancel();
            tracing::trace!(trigger, "pending hide cancelled");
        }
        if let Some(timer) = state.pending_show.take() {
            timer.cancel();
        }

        let placement =
            compute_placement(&origin, variant.estimated_size(), state.viewport, self.options.margin);
        self.surface.send_replace(TooltipDisplay {
            visible: true,
            trigger: Some(trigger),
            variant,
            content,
            placement,
        });
    }

    /// Hide after the debounce, unless a `show` comes first.
    pub fn hide(self: &Arc<Self>) {
        let mut state = self.state.lock();
        if let Some(timer) = state.pending_show.take() {
            timer.cancel();
        }
        if let Some(timer) = state.pending_hide.take() {
            timer.cancel();
        }
        if !self.surface.borrow().visible {
            return;
        }

        state.generation += 1;
        let generation = state.generation;
        let manager = Arc::downgrade(self);
        let delay = self.options.hide_delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            fire_hide(&manager, generation);
        });
        state.pending_hide = Some(PendingTimer { generation, handle: handle.abort_handle() });
    }

    /// Hide immediately, dropping any pending timers.
    pub fn hide_now(&self) {
        let mut state = self.state.lock();
        if let Some(timer) = state.pending_show.take() {
            timer.cancel();
        }
        if let Some(timer) = state.pending_hide.take() {
            timer.cancel();
        }
        self.hide_surface();
    }

    /// Pointer entered a trigger: show after the hover-intent delay.
    ///
    /// `origin` is evaluated when the tooltip actually appears, so a trigger
    /// that moved during the delay is still placed correctly.
    pub fn hover_enter<F>(
        self: &Arc<Self>,
        trigger: TriggerId,
        variant: TooltipVariant,
        content: Value,
        origin: F,
    ) where
        F: FnOnce() -> Rect + Send + 'static,
    {
        let delay = {
            let state = self.state.lock();
            match state.input_mode {
                InputMode::Pointer => self.options.show_delay,
                InputMode::Touch => self.options.touch_show_delay,
            }
        };
        if delay.is_zero() {
            self.show(trigger, variant, content, origin());
            return;
        }

        let mut state = self.state.lock();
        if let Some(timer) = state.pending_show.take() {
            timer.cancel();
        }
        state.generation += 1;
        let generation = state.generation;
        let manager = Arc::downgrade(self);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let Some(manager) = manager.upgrade() else {
                return;
            };
            if !manager.is_current_show(generation) {
                return;
            }
            // Measured unlocked; a leave while measuring cancels the show.
            let rect = origin();
            let mut state = manager.state.lock();
            if state.pending_show.as_ref().map(|t| t.generation) != Some(generation) {
                tracing::trace!(trigger, "delayed show cancelled while measuring");
                return;
            }
            state.pending_show = None;
            manager.show_locked(&mut state, trigger, variant, content, rect);
        });
        state.pending_show = Some(PendingTimer { generation, handle: handle.abort_handle() });
    }

    /// Pointer left a trigger.
    pub fn hover_leave(self: &Arc<Self>) {
        self.hide();
    }

    /// Touch tap on a trigger: toggles its tooltip.
    pub fn tap(&self, trigger: TriggerId, variant: TooltipVariant, content: Value, origin: Rect) {
        let showing_this = {
            let display = self.surface.borrow();
            display.visible && display.trigger == Some(trigger)
        };
        if showing_this {
            self.hide_now();
        } else {
            self.show(trigger, variant, content, origin);
        }
    }

    fn is_current_show(&self, generation: u64) -> bool {
        self.state.lock().pending_show.as_ref().map(|t| t.generation) == Some(generation)
    }

    fn hide_surface(&self) {
        self.surface.send_if_modified(|display| {
            if !display.visible {
                return false;
            }
            display.visible = false;
            display.trigger = None;
            true
        });
    }
}

fn fire_hide(manager: &Weak<TooltipManager>, generation: u64) {
    let Some(manager) = manager.upgrade() else {
        return;
    };
    let mut state = manager.state.lock();
    if state.pending_hide.as_ref().map(|t| t.generation) != Some(generation) {
        return;
    }
    state.pending_hide = None;
    manager.hide_surface();
    tracing::trace!("tooltip hidden after debounce");
}
