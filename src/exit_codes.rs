//! Process exit codes of the `asciidocext` binary.
//!
//! A failed render and a broken setup exit differently, so a site build can
//! retry or skip documents without masking configuration mistakes.

/// Every requested document was written, or `check` found a renderer.
pub const SUCCESS: i32 = 0;

/// At least one document failed to render, or `check` found no renderer.
pub const CONVERSION_FAILED: i32 = 1;

/// The tool itself could not run: bad configuration, unreadable stdin, an
/// existing file in the way of `init`.
pub const TOOL_ERROR: i32 = 2;

/// Terminate the process with one of the codes above.
pub mod exit {
    use super::{CONVERSION_FAILED, SUCCESS, TOOL_ERROR};

    pub fn success() -> ! {
        std::process::exit(SUCCESS);
    }

    pub fn conversion_failed() -> ! {
        std::process::exit(CONVERSION_FAILED);
    }

    pub fn tool_error() -> ! {
        std::process::exit(TOOL_ERROR);
    }
}
