//! Duration text handling.
//!
//! Free-form duration edits such as `"1m30s"`, `"+5m"` or `"-30s"` are turned
//! into whole seconds by [`parse_duration_expr`]. The inverse direction,
//! seconds to editable text, is [`format_duration_text`]; [`format_clock`]
//! renders a countdown face.

mod expr;
mod format;

pub use expr::parse_duration_expr;
pub use format::{format_clock, format_duration_text};
