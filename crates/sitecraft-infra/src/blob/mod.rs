//! HTTP-backed `AssetMetadataProvider`: queries the external blob store's
//! metadata API for a previously uploaded logo (§3.1 `AssetInfo`, §4.A
//! "logo validation"). This adapter never transfers the asset's bytes.

use std::time::Duration;

use sitecraft_core::blob::AssetMetadataProvider;
use sitecraft_types::draft::AssetInfo;
use sitecraft_types::error::AssetError;
use sitecraft_types::ids::AssetId;

/// Queries `{base_url}/assets/{assetId}` for metadata.
pub struct HttpAssetMetadataProvider {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAssetMetadataProvider {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("failed to build asset metadata http client");

        Self { client, base_url }
    }

    fn url(&self, asset_id: &AssetId) -> String {
        format!("{}/assets/{}", self.base_url.trim_end_matches('/'), asset_id)
    }
}

impl AssetMetadataProvider for HttpAssetMetadataProvider {
    async fn get_asset(&self, asset_id: &AssetId) -> Result<Option<AssetInfo>, AssetError> {
        let response = self
            .client
            .get(self.url(asset_id))
            .send()
            .await
            .map_err(|e| AssetError::Adapter(format!("request failed: {e}")))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AssetError::Adapter(format!("HTTP {status}: {body}")));
        }

        let info: AssetInfo = response
            .json()
            .await
            .map_err(|e| AssetError::Adapter(format!("invalid response body: {e}")))?;

        Ok(Some(info))
    }
}
