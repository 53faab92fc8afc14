//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter filtered
//! by `RUST_LOG`.
//!
//! ## What Gets Traced
//!
//! - **Actor lifecycle**: `Actor started` / `Shutdown` with `entity_type` and
//!   the final store `size`
//! - **Resource operations**: `Created`, `Updated`, `Deleted`, `Reparented`,
//!   with the `id` of the node or resource
//! - **Policy**: allowed decisions at `debug`, denied ones at `warn`
//! - **Rejections**: validation failures and cycle refusals at `warn`
//!
//! ```bash
//! RUST_LOG=info cargo run      # lifecycle and mutations
//! RUST_LOG=debug cargo run     # payloads, queries and policy decisions
//! RUST_LOG=property_finder::policy=debug cargo run
//! ```
//!
//! A reparent that would close a loop looks like this at `info`:
//!
//! ```text
//! INFO Created entity_type="Location" id=location_1 size=1
//! INFO Created entity_type="Location" id=location_2 size=2
//! WARN Request rejected entity_type="Location" op="reparent" error=Invalid location operation: moving location_1 under location_2 would create a cycle
//! ```

/// Installs the global subscriber. Call once, at startup.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // entity_type already says where a line comes from
        .compact()
        .init();
}
