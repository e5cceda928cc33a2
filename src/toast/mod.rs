mod notifier;
mod queue;

pub(crate) use notifier::Notifier;
pub(crate) use queue::{Toast, ToastKind, ToastQueue};
