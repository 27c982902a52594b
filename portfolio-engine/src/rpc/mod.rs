//! JSON-RPC 2.0 bridge between the portfolio canvas and its host page.
//!
//! The WASM build usually runs inside an iframe; the embedding page talks to
//! it with `postMessage`.
//!
//! ```text
//! Host page (parent window)  <──postMessage──>  Bevy (iframe)
//!        │                                        │
//!        ├─ Request (with ID) ──────────────────> │
//!        │                                        ├─ Process request
//!        │ <───────────────── Response (with ID) ─┤
//!        │                                        │
//!        │ <────────── Notification (no ID) ─────┤
//! ```
//!
//! ## Requests
//!
//! - `set_language` `{ "language": "en" | "fr" }`
//! - `set_theme` `{ "theme": "light" | "dark" | "toggle" }`
//! - `get_settings`
//! - `scroll_to_section` `{ "section": "<section id>" }`
//! - `get_active_section`
//!
//! ## Notifications
//!
//! - `loader_progress` `{ "percent", "phase" }`
//! - `loader_complete`
//! - `active_section_changed` `{ "section" }`
//! - `section_revealed` `{ "section" }`
//! - `contact_submitted` `{ "name", "email" }`
//!
//! ## Error Handling
//!
//! Standard JSON-RPC 2.0 error codes:
//! - `-32600`: Invalid request
//! - `-32601`: Method not found
//! - `-32602`: Invalid params
//! - `-32603`: Internal error

/// JSON-RPC 2.0 bidirectional communication with the host page.
///
/// Handles request-response patterns, notifications, and WASM message listeners.
pub mod web_rpc;
