//! vitalyx-web — HTTP surface for the Vitalyx risk engine.
//! Exposes ingest-and-score, scenario simulation against a session baseline,
//! session lifecycle, and score history.

pub mod clinical;
pub mod handlers;
pub mod router;
pub mod state;
