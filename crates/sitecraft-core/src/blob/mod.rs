//! `AssetMetadataProvider`: the core's only view of the logo blob store.
//! It never reads bytes, only the previously uploaded asset's metadata
//! record (§3.1 `AssetInfo`).

use std::future::Future;

use sitecraft_types::draft::AssetInfo;
use sitecraft_types::error::AssetError;
use sitecraft_types::ids::AssetId;

pub trait AssetMetadataProvider: Send + Sync {
    fn get_asset(
        &self,
        asset_id: &AssetId,
    ) -> impl Future<Output = Result<Option<AssetInfo>, AssetError>> + Send;
}
