use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

pub(crate) fn now_ms() -> i64 {
    js_sys::Date::now().round() as i64
}

/// One-shot `window.setTimeout`. Returns the handle for [`clear_timeout`].
pub(crate) fn set_timeout(delay_ms: i32, f: impl FnOnce() + 'static) -> Option<i32> {
    let win = web_sys::window()?;
    let cb = Closure::once_into_js(f);
    win.set_timeout_with_callback_and_timeout_and_arguments_0(
        cb.as_ref().unchecked_ref(),
        delay_ms.max(0),
    )
    .ok()
}

pub(crate) fn clear_timeout(id: i32) {
    if let Some(win) = web_sys::window() {
        win.clear_timeout_with_handle(id);
    }
}

/// Delay until `deadline_ms`, clamped to the `setTimeout` range.
pub(crate) fn delay_until(deadline_ms: i64, now_ms: i64) -> i32 {
    (deadline_ms - now_ms).clamp(0, i32::MAX as i64) as i32
}
