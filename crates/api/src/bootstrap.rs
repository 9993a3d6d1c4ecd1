//! Startup provisioning of the first admin account.

use draftboard_core::roles::ROLE_ADMIN;
use draftboard_db::models::voter::CreateVoter;
use draftboard_db::repositories::VoterRepo;
use draftboard_db::DbPool;

use crate::auth::password::hash_password;
use crate::config::BootstrapAdmin;
use crate::error::{AppError, AppResult};

/// Create the configured admin account unless the mobile number is taken.
///
/// Returns `true` when a new account was inserted. An existing account is
/// left untouched, including its password.
pub async fn ensure_admin(pool: &DbPool, admin: &BootstrapAdmin) -> AppResult<bool> {
    if let Some(existing) = VoterRepo::find_by_mobile(pool, &admin.mobile_number).await? {
        if existing.role != ROLE_ADMIN {
            tracing::warn!(
                voter_id = existing.id,
                "Bootstrap admin mobile number belongs to a non-admin account"
            );
        }
        return Ok(false);
    }

    let password_hash = hash_password(&admin.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let voter = VoterRepo::create(
        pool,
        &CreateVoter {
            name: "Administrator".to_string(),
            mobile_number: admin.mobile_number.clone(),
            password_hash,
            role: Some(ROLE_ADMIN.to_string()),
        },
    )
    .await?;

    tracing::info!(voter_id = voter.id, "Bootstrap admin created");
    Ok(true)
}
