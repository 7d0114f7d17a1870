pub mod instances_api;
pub mod playlist_api;
pub mod videos_api;
pub mod videos_csv;

use crate::mirror::Mirror;
use crate::result::Result;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct VideoEntry {
    pub title: String,
    pub author: String,
}

/// A way of turning ranked mirrors into video metadata.
#[async_trait]
pub trait Extract {
    type Data;

    async fn extract(&self, mirrors: Vec<Mirror>) -> Result<Self::Data>;
}
