//! Fail-fast checks run before anything is launched.

use std::path::Path;

use crate::domain::Resource;
use crate::error::BootstrapError;
use crate::infrastructure::config::services::ServiceConfig;

/// Check, in order, the tunnel executable, the application executable and
/// the working directory. Stops at the first missing resource.
pub fn check(services: &ServiceConfig) -> Result<(), BootstrapError> {
    require(
        Resource::TunnelExecutable,
        &services.tunnel_executable,
        Path::exists,
    )?;
    require(
        Resource::AppExecutable,
        &services.app_executable,
        Path::exists,
    )?;
    require(
        Resource::WorkingDirectory,
        &services.working_dir,
        Path::is_dir,
    )?;
    Ok(())
}

fn require(
    resource: Resource,
    path: &Path,
    present: fn(&Path) -> bool,
) -> Result<(), BootstrapError> {
    if present(path) {
        Ok(())
    } else {
        Err(BootstrapError::MissingResource {
            resource,
            path: path.to_path_buf(),
        })
    }
}
