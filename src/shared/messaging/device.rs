//! Push device registration bodies

use serde::{Deserialize, Serialize};

/// Request body of `PUT /pushy`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterTokenRequest {
    /// Device token issued by the push provider
    #[serde(default)]
    pub token: Option<String>,
}
