pub mod desktop;
pub mod file_io;
pub mod http_client;
pub mod local;
pub mod remote;

pub use desktop::DesktopShellProvider;
pub use http_client::{RepoApiClient, RepoApiError};
pub use local::LocalFileProvider;
pub use remote::RemoteRepoProvider;

/// True when `err` says the requested model does not exist, whichever
/// provider produced it.
pub fn is_not_found(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        matches!(
            cause.downcast_ref::<RepoApiError>(),
            Some(RepoApiError::NotFound { .. })
        ) || cause
            .downcast_ref::<std::io::Error>()
            .is_some_and(|io| io.kind() == std::io::ErrorKind::NotFound)
    })
}
