//! Native monitor window.
//!
//! | Sub-module       | Responsibility |
//! | ---------------- | -------------- |
//! | [`vitals_app`]   | [`VitalsApp`] state: event draining, renderer and station board |
//! | [`layout`]       | Header, metric tiles, ECG plot, station sidebar and the `eframe::App` impl |
//! | [`run`]          | [`run_dashboard()`] entry point |

mod layout;
mod run;
mod vitals_app;

pub use run::run_dashboard;
pub use vitals_app::{VitalsApp, PLACEHOLDER};
