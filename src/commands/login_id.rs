//! `hrms login-id` commands.

use chrono::NaiveDate;

use crate::allocator::{AllocationRequest, Allocator};
use crate::context::ServiceContext;
use crate::onboarding::OnboardError;

use super::CommandError;

/// Execute `login-id preview`: run allocation against the current store
/// and print the result. Nothing is written, so a later onboarding may get
/// a different id if someone else joins the scope first.
///
/// # Errors
///
/// Returns the allocation failure with its exit code.
pub async fn preview(
    ctx: &ServiceContext,
    organization: &str,
    first_name: &str,
    last_name: &str,
    joined_on: Option<NaiveDate>,
) -> Result<(), CommandError> {
    let request = AllocationRequest {
        organization: organization.trim().to_string(),
        first_name: first_name.trim().to_string(),
        last_name: last_name.trim().to_string(),
        joined_on: joined_on.unwrap_or_else(|| ctx.clock.now().date_naive()),
    };
    let login_id = Allocator::new(ctx.store.as_ref())
        .allocate(&request)
        .await
        .map_err(OnboardError::from)?;
    println!("{login_id}");
    Ok(())
}
