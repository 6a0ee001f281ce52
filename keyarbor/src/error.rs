/// Errors surfaced by the index core.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A range scan failed partway through a refresh. The previous
    /// tree/flat-keys state is left untouched: stale but valid.
    #[error("scan failure: {0}")]
    ScanFailure(#[from] keyarbor_storage::Error),

    /// A point operation against the store failed.
    #[error("store operation failed: {0}")]
    Store(keyarbor_storage::Error),

    /// A session operation needed a selected key and none is selected.
    #[error("no key selected")]
    NoSelection,
}
