use crate::prelude::Result;

pub async fn livez() -> Result<()> {
    tracing::debug!("service is live");
    Ok(())
}
