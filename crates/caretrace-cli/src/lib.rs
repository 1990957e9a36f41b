// NOTE: caretrace Architecture Rationale
//
// Why recompute progress on every call (not store stage state)?
// - The agent pipeline only ever appends events; stage status is a pure function of them
// - A stored tree would drift as soon as a late event arrives out of order
// - Trade-off: each `progress` run refetches the whole session, which is small
//
// Why explicit session selection (not "last viewed")?
// - `--user` and `--session` make every invocation reproducible and scriptable
// - No hidden state file to go stale between a patient list and a progress view
//
// Why degrade on network failure (not abort)?
// - A clinician glancing at a dashboard needs the empty state plus the reason, not a stack of errors
// - Fetch failures become a warning badge and exit 0; bad input and bad config still exit 1

mod args;
mod commands;
mod handlers;
pub mod presentation;

pub use args::{Cli, Commands};
pub use commands::run;
