//! # secret-santa
//!
//! Secret Santa registration service.
//!
//! A fixed allow-list of participants register by name; each registrant
//! is assigned a random receiver from the allowed names that is neither
//! themselves nor already assigned to someone else. Assignments are
//! persisted and never change.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers (api/)          POST /register, GET /health
//!     ├── Static assets                 fallback to PUBLIC_DIR
//!     │
//!     ├── RegistrationService (service/)
//!     ├── Roster, ReceiverPicker, Messages (domain/)
//!     │
//!     └── PlayerStore (persistence/)
//!             ├── SQLite
//!             └── JSON documents
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
