// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod config;
pub mod drill;
pub mod generator;
pub mod meter;
pub mod runtime;
pub mod scoring;
pub mod selection;
pub mod session;
pub mod ui;
pub mod util;

/// Redraw cadence for the event loop; also how often the meter tween is repainted.
pub const TICK_RATE_MS: u64 = 100;
