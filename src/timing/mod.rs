mod debounce;
mod hold;

pub(crate) use debounce::Debouncer;
pub(crate) use hold::BusyHold;
