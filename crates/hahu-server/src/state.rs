use hahu_core::JobSnapshot;

/// Shared application state, available to all route handlers via `State<Arc<AppState>>`.
///
/// The snapshot is loaded once at startup and never mutated.
pub struct AppState {
    pub snapshot: JobSnapshot,
}
