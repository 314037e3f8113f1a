//! Debugging feature flags.
//!
//! Toggle individual diagnostics here; keep them `false` by default so the
//! pipeline stays quiet outside of targeted debugging sessions.

/// Emit per-stage candidate counts while a pipeline runs.
pub const PRINT_PIPELINE_STAGES: bool = false;

/// Emit a line for every successful zone merge (which pair, resulting band).
pub const PRINT_MERGE_EVENTS: bool = false;

/// If non-empty, emit detailed detection output only for this symbol.
/// Example: "PAXGUSDT". Use "" to disable.
pub const PRINT_DETECTION_FOR_SYMBOL: &str = "";
