pub mod use_busy_hold;
pub mod use_debounced;

pub use use_busy_hold::use_busy_hold;
pub use use_debounced::use_debounced;
