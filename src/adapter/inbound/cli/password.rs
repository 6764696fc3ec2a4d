//! Handler for the `hash-password` command.
//!
//! Writes a bcrypt hash that the web app reads to authenticate its admin
//! user. Nothing is written unless both entries match.

use std::path::Path;

use dialoguer::Password;
use tracing::info;

use super::command::HashPasswordArgs;
use super::output;
use crate::error::{PasswordError, Result};

/// Execute the hash-password command.
pub fn execute(args: &HashPasswordArgs) -> Result<()> {
    output::header(env!("CARGO_PKG_VERSION"));
    output::hint("This will securely set a new admin password.");

    let password = Password::new()
        .with_prompt("Enter the new admin password")
        .allow_empty_password(true)
        .interact()?;
    if password.is_empty() {
        return Err(PasswordError::Empty.into());
    }
    let confirmation = Password::new()
        .with_prompt("Confirm the new admin password")
        .allow_empty_password(true)
        .interact()?;

    set_admin_password(&args.output, &password, &confirmation, args.cost)?;
    output::success("Admin password has been securely updated.");
    output::field("File", args.output.display());
    Ok(())
}

/// Hash `password` after checking it against its confirmation.
pub fn hash_password(
    password: &str,
    confirmation: &str,
    cost: u32,
) -> std::result::Result<String, PasswordError> {
    if password.is_empty() {
        return Err(PasswordError::Empty);
    }
    if password != confirmation {
        return Err(PasswordError::Mismatch);
    }
    Ok(bcrypt::hash(password, cost)?)
}

/// Hash and store the password. The file is left untouched on any error.
pub fn set_admin_password(
    path: &Path,
    password: &str,
    confirmation: &str,
    cost: u32,
) -> Result<()> {
    let hashed = hash_password(password, confirmation, cost)?;
    std::fs::write(path, hashed)?;
    info!(path = %path.display(), cost, "Admin password hash written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    const TEST_COST: u32 = 4;

    #[test]
    fn hash_verifies_with_bcrypt() {
        let hashed = hash_password("hunter2", "hunter2", TEST_COST).unwrap();
        assert!(hashed.starts_with("$2b$04$"));
        assert!(bcrypt::verify("hunter2", &hashed).unwrap());
        assert!(!bcrypt::verify("hunter3", &hashed).unwrap());
    }

    #[test]
    fn empty_password_is_rejected() {
        assert!(matches!(
            hash_password("", "", TEST_COST),
            Err(PasswordError::Empty)
        ));
    }

    #[test]
    fn mismatch_is_rejected() {
        assert!(matches!(
            hash_password("one", "two", TEST_COST),
            Err(PasswordError::Mismatch)
        ));
    }

    #[test]
    fn writes_hash_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("admin_password.txt");

        set_admin_password(&path, "s3cret", "s3cret", TEST_COST).unwrap();

        let stored = std::fs::read_to_string(&path).unwrap();
        assert!(!stored.ends_with('\n'));
        assert!(bcrypt::verify("s3cret", &stored).unwrap());
    }

    #[test]
    fn mismatch_leaves_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("admin_password.txt");
        std::fs::write(&path, "previous-hash").unwrap();

        let err = set_admin_password(&path, "a", "b", TEST_COST).unwrap_err();
        assert!(matches!(err, Error::Password(PasswordError::Mismatch)));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "previous-hash");
    }
}
