// ── Bounded history ──
//
// Process-lifetime ledgers shared by discovery and the bandwidth sampler.

mod history;

pub use history::{HistoryLimits, HistoryStore};
