use crate::cli::actions::Action;
use crate::signet::new;
use anyhow::Result;
use tracing::debug;

/// Handle the server action
/// # Errors
/// Return error if the server fails to start
pub async fn handle(action: Action) -> Result<()> {
    match action {
        Action::Server {
            port,
            allowed_origin,
            work_factor,
        } => {
            debug!(?work_factor, %allowed_origin, "starting server");

            new(port, allowed_origin, work_factor).await?;
        }
    }

    Ok(())
}
