use crate::timing::BusyHold;
use crate::util::{clear_timeout, delay_until, now_ms, set_timeout};
use leptos::prelude::*;

/// Hook that mirrors `busy` but keeps `true` for at least `min_ms` once it
/// turns on.
pub fn use_busy_hold(busy: Signal<bool>, min_ms: i64) -> ReadSignal<bool> {
    let machine = StoredValue::new(BusyHold::new(min_ms));
    let (visible, set_visible) = signal(false);
    let timer: StoredValue<Option<i32>> = StoredValue::new(None);

    Effect::new(move |_| {
        let b = busy.get();
        let now = now_ms();
        machine.update_value(|m| m.set_busy(b, now));
        sync(machine, timer, visible, set_visible);
    });

    on_cleanup(move || {
        if let Some(Some(id)) = timer.try_get_value() {
            clear_timeout(id);
        }
    });

    visible
}

/// Publishes the machine's visibility and arms a timer while it is held.
fn sync(
    machine: StoredValue<BusyHold>,
    timer: StoredValue<Option<i32>>,
    visible: ReadSignal<bool>,
    set_visible: WriteSignal<bool>,
) {
    let Some((is_visible, deadline)) = machine.try_with_value(|m| (m.visible(), m.deadline()))
    else {
        return;
    };
    if visible.try_get_untracked() != Some(is_visible) {
        let _ = set_visible.try_set(is_visible);
    }

    if let Some(Some(id)) = timer.try_get_value() {
        clear_timeout(id);
    }
    let id = deadline.and_then(|deadline| {
        set_timeout(delay_until(deadline, now_ms()), move || {
            let now = now_ms();
            if machine.try_update_value(|m| m.tick(now)).is_some() {
                // An early tick leaves the hold in place and re-arms here.
                sync(machine, timer, visible, set_visible);
            }
        })
    });
    let _ = timer.try_set_value(id);
}
