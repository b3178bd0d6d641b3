//! Page-level plumbing for the NEXORA site.
//!
//! Route resolution, per-page SEO metadata, and client-side validation of
//! the contact and demo-request forms. Nothing here depends on the
//! animation engine, and nothing here talks to a network.

pub mod forms;
pub mod routes;
pub mod seo;
