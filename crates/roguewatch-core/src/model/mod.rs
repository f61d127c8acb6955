// ── Domain model ──
//
// Value types shared by the parser, the detection engine, the baseline
// store, and every front end.

pub mod baseline;
pub mod event;
pub mod mac;
pub mod observation;

// ── Re-exports ──────────────────────────────────────────────────────

pub use baseline::Baseline;
pub use event::{Alert, DetectionEvent, Sighting};
pub use mac::{MacAddress, normalize};
pub use observation::{ApObservation, ScanSnapshot};
