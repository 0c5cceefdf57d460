//! Sculpt core library: Java refactoring engine.
//!
//! Tracks versions of Java sources, locates named program units, validates
//! selections, detects unused declarations, and turns refactoring requests
//! (rename, delete, reformat, optimize imports, fix issue) into changes that
//! are committed to a source history and published through a queue.  With
//! the `python` feature it is compiled as a Python extension module
//! (`_sculpt_core`) via PyO3.

pub mod config;
pub mod errors;
pub mod locate;
pub mod models;
pub mod pipeline;
pub mod recommend;
pub mod session;
pub mod source;

#[cfg(feature = "python")]
mod python;

#[cfg(test)]
mod testing;

#[cfg(feature = "python")]
use pyo3::prelude::*;

// ---------------------------------------------------------------------------
// Top-level Python module: _sculpt_core
// ---------------------------------------------------------------------------

#[cfg(feature = "python")]
#[pymodule]
fn _sculpt_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // -- Session ------------------------------------------------------------
    m.add_class::<python::PySession>()?;

    // -- Config defaults ----------------------------------------------------
    m.add(
        "DEFAULT_WILDCARD_THRESHOLD",
        config::DEFAULT_WILDCARD_THRESHOLD,
    )?;
    m.add("DEFAULT_INDENT_WIDTH", config::DEFAULT_INDENT_WIDTH)?;
    m.add("DEFAULT_SCAN_WORKERS", config::DEFAULT_SCAN_WORKERS)?;
    m.add("KNOWN_DETECTORS", config::KNOWN_DETECTORS.to_vec())?;

    // -- Models -------------------------------------------------------------
    m.add("NEW_NAME", models::NEW_NAME)?;

    Ok(())
}
