//! Leptos DragDrop Utilities
//!
//! Mouse-driven drag-and-drop for flat, ordered Leptos lists.
//! A movement threshold distinguishes a click from a drag; drop targets are
//! either another row or the gap between two rows.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Drop target types
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropTarget<K> {
    /// Drop on a row (take its place)
    Item(K),
    /// Drop on the gap before list index `n` (`n == len` is after the last row)
    Gap(usize),
}

/// Row key usable inside drag signals
pub trait DragKey: Copy + PartialEq + Send + Sync + 'static {}

impl<K: Copy + PartialEq + Send + Sync + 'static> DragKey for K {}

/// DnD state signals
#[derive(Clone, Copy)]
pub struct DndSignals<K: DragKey> {
    pub dragging_id_read: ReadSignal<Option<K>>,
    pub dragging_id_write: WriteSignal<Option<K>>,
    pub drop_target_read: ReadSignal<Option<DropTarget<K>>>,
    pub drop_target_write: WriteSignal<Option<DropTarget<K>>>,
    pub drag_just_ended_read: ReadSignal<bool>,
    pub drag_just_ended_write: WriteSignal<bool>,
    /// Pending row (mousedown but not yet dragging)
    pub pending_id_read: ReadSignal<Option<K>>,
    pub pending_id_write: WriteSignal<Option<K>>,
    /// Start position for movement detection
    pub start_read: ReadSignal<(i32, i32)>,
    pub start_write: WriteSignal<(i32, i32)>,
}

impl<K: DragKey> DndSignals<K> {
    /// Row currently being dragged
    pub fn dragging(&self) -> Option<K> {
        self.dragging_id_read.get()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging_id_read.get().is_some()
    }

    /// Whether `target` is the hovered drop target
    pub fn is_target(&self, target: DropTarget<K>) -> bool {
        self.drop_target_read.get() == Some(target)
    }
}

/// Movement threshold in pixels to start dragging
pub const DRAG_THRESHOLD_PX: i32 = 5;

/// Delay before `drag_just_ended` resets, so the trailing click can be ignored
const DRAG_END_GRACE_MS: i32 = 100;

/// Whether the pointer moved far enough from `start` to begin a drag
pub fn exceeds_threshold(start: (i32, i32), current: (i32, i32)) -> bool {
    let dx = (current.0 - start.0).abs();
    let dy = (current.1 - start.1).abs();
    dx > DRAG_THRESHOLD_PX || dy > DRAG_THRESHOLD_PX
}

pub fn create_dnd_signals<K: DragKey>() -> DndSignals<K> {
    let (dragging_id_read, dragging_id_write) = signal(None::<K>);
    let (drop_target_read, drop_target_write) = signal(None::<DropTarget<K>>);
    let (drag_just_ended_read, drag_just_ended_write) = signal(false);
    let (pending_id_read, pending_id_write) = signal(None::<K>);
    let (start_read, start_write) = signal((0i32, 0i32));
    DndSignals {
        dragging_id_read,
        dragging_id_write,
        drop_target_read,
        drop_target_write,
        drag_just_ended_read,
        drag_just_ended_write,
        pending_id_read,
        pending_id_write,
        start_read,
        start_write,
    }
}

/// End drag operation
pub fn end_drag<K: DragKey>(dnd: &DndSignals<K>) {
    dnd.dragging_id_write.set(None);
    dnd.drop_target_write.set(None);
    dnd.pending_id_write.set(None);
    dnd.drag_just_ended_write.set(true);

    if let Some(win) = web_sys::window() {
        let clear = dnd.drag_just_ended_write;
        let cb = wasm_bindgen::closure::Closure::<dyn FnMut()>::new(move || {
            clear.set(false);
        });
        let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(
            cb.as_ref().unchecked_ref(),
            DRAG_END_GRACE_MS,
        );
        cb.forget();
    }
}

/// Mousedown handler for draggable rows: records a pending drag
pub fn make_on_mousedown<K: DragKey>(
    dnd: DndSignals<K>,
    id: K,
) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |ev: web_sys::MouseEvent| {
        if ev.button() != 0 {
            return;
        }
        // Controls inside the row keep their own click behaviour
        if let Some(target) = ev.target() {
            if target.dyn_ref::<web_sys::HtmlInputElement>().is_some() { return; }
            if target.dyn_ref::<web_sys::HtmlButtonElement>().is_some() { return; }
        }
        dnd.pending_id_write.set(Some(id));
        dnd.start_write.set((ev.client_x(), ev.client_y()));
    }
}

/// Document mousemove: promotes a pending drag once the threshold is passed
fn bind_global_mousemove<K: DragKey>(dnd: DndSignals<K>) {
    use wasm_bindgen::closure::Closure;

    let on_mousemove = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
        let pending = dnd.pending_id_read.get_untracked();
        if pending.is_none() || dnd.dragging_id_read.get_untracked().is_some() {
            return;
        }
        let start = dnd.start_read.get_untracked();
        if exceeds_threshold(start, (ev.client_x(), ev.client_y())) {
            dnd.dragging_id_write.set(pending);
        }
    });

    if let Some(doc) = web_sys::window().and_then(|win| win.document()) {
        let _ = doc.add_event_listener_with_callback("mousemove", on_mousemove.as_ref().unchecked_ref());
    }
    on_mousemove.forget();
}

/// Mouseenter handler for rows
pub fn make_on_item_mouseenter<K: DragKey>(
    dnd: DndSignals<K>,
    id: K,
) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        if let Some(dragging) = dnd.dragging_id_read.get_untracked() {
            // Dropping a row on itself is meaningless
            if dragging != id {
                dnd.drop_target_write.set(Some(DropTarget::Item(id)));
            }
        }
    }
}

/// Mouseenter handler for gaps; `gap` follows the row above as it moves
pub fn make_on_gap_mouseenter<K: DragKey>(
    dnd: DndSignals<K>,
    gap: Signal<usize>,
) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging_id_read.get_untracked().is_some() {
            dnd.drop_target_write.set(Some(DropTarget::Gap(gap.get_untracked())));
        }
    }
}

/// Mouseleave handler
pub fn make_on_mouseleave<K: DragKey>(dnd: DndSignals<K>) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging_id_read.get_untracked().is_some() {
            dnd.drop_target_write.set(None);
        }
    }
}

/// Bind global mouseup (drop detection) and mousemove (drag start).
///
/// `on_drop` runs only for a real drag released over a target.
pub fn bind_global_mouseup<K, F>(dnd: DndSignals<K>, on_drop: F)
where
    K: DragKey,
    F: Fn(K, DropTarget<K>) + 'static,
{
    use wasm_bindgen::closure::Closure;

    let on_mouseup = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |_ev: web_sys::MouseEvent| {
        let dragging_id = dnd.dragging_id_read.get_untracked();
        let drop_target = dnd.drop_target_read.get_untracked();

        end_drag(&dnd);
        if let (Some(dragged), Some(target)) = (dragging_id, drop_target) {
            on_drop(dragged, target);
        }
    });

    if let Some(doc) = web_sys::window().and_then(|win| win.document()) {
        let _ = doc.add_event_listener_with_callback("mouseup", on_mouseup.as_ref().unchecked_ref());
    }
    on_mouseup.forget();

    bind_global_mousemove(dnd);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_is_exclusive() {
        assert!(!exceeds_threshold((0, 0), (DRAG_THRESHOLD_PX, 0)));
        assert!(exceeds_threshold((0, 0), (DRAG_THRESHOLD_PX + 1, 0)));
        assert!(exceeds_threshold((10, 10), (10, 10 - DRAG_THRESHOLD_PX - 1)));
    }

    #[test]
    fn test_drop_target_equality() {
        assert_eq!(DropTarget::Item(3u64), DropTarget::Item(3u64));
        assert_ne!(DropTarget::<u64>::Gap(0), DropTarget::Gap(1));
    }
}
