//! Contract document retrieval over HTTP.

use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::codegen::ContractDocument;
use crate::error::GenerateError;

const FETCH_TIMEOUT_SECS: u64 = 10;

/// Fetch and parse the contract document from `source` + `endpoint`.
///
/// Any transport failure, non-success status, or parse failure aborts the
/// pipeline here, before the generator runs.
pub async fn fetch_contract(source: &str, endpoint: &str) -> Result<ContractDocument, GenerateError> {
    let base = Url::parse(source)?;
    let url = base.join(endpoint)?;
    debug!(url = %url, "Fetching contract document.");

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
        .build()?;
    let response = client.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(GenerateError::Status { status });
    }

    let body = response.text().await?;
    let document = ContractDocument::from_json(&body)?;
    debug!(
        version = %document.version,
        routes = document.routes.len(),
        "Contract document parsed."
    );

    Ok(document)
}
