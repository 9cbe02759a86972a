//! Diagnostics for reporting on the selected model.

pub mod evaluation;
