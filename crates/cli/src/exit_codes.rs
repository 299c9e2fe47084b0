//! CLI Exit Code Registry
//!
//! Single source of truth for all CLI exit codes. Exit codes are part of the
//! shell contract — scripts rely on them.
//!
//! | Range | Domain    | Description                              |
//! |-------|-----------|------------------------------------------|
//! | 0     | Universal | Success                                  |
//! | 1     | Universal | General error (evaluation failed, etc.)  |
//! | 2     | Universal | CLI usage error (bad args)               |
//! | 10-19 | ai        | AI solver configuration codes            |

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - evaluation produced the error sentinel, solver failed.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, rejected submission.
pub const EXIT_USAGE: u8 = 2;

/// AI disabled in settings — not a fault, just informational.
pub const EXIT_AI_DISABLED: u8 = 10;

/// AI enabled but no API key found in the environment.
pub const EXIT_AI_MISSING_KEY: u8 = 11;
