//! Trace filtering for construction failures.
//!
//! When a transformed type fails during its own setup, the failure is the test author's to
//! fix; the frames this library contributed to the trace only obscure it. Filtering removes
//! internal frames and nothing else — the failure itself is re-raised unchanged.

use crate::Error;

const INTERNAL_FRAME_PREFIX: &str = "mimicry::";

/// Remove internal framework frames from a trace, in place
pub fn filter_internal_frames(trace: &mut Vec<String>) {
    trace.retain(|frame| !frame.starts_with(INTERNAL_FRAME_PREFIX));
}

/// Filter the trace of an initialization failure; other errors pass through untouched
#[must_use]
pub fn filter(error: Error) -> Error {
    match error {
        Error::Initialization {
            type_name,
            message,
            mut trace,
        } => {
            filter_internal_frames(&mut trace);
            Error::Initialization {
                type_name,
                message,
                trace,
            }
        }
        other => other,
    }
}
