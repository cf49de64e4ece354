//! Optional listing criteria as supplied by a caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Optional criteria for listing files. Absent fields do not constrain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileFilterParams {
    /// Case-insensitive substring of the file name.
    #[serde(default)]
    pub name: Option<String>,
    /// Earliest upload time, inclusive.
    #[serde(default)]
    pub upload_date_from: Option<DateTime<Utc>>,
    /// Latest upload time, inclusive.
    #[serde(default)]
    pub upload_date_to: Option<DateTime<Utc>>,
    /// Earliest modification time, inclusive.
    #[serde(default)]
    pub modified_date_from: Option<DateTime<Utc>>,
    /// Latest modification time, inclusive.
    #[serde(default)]
    pub modified_date_to: Option<DateTime<Utc>>,
    /// Accepted extensions. Empty means any.
    #[serde(default)]
    pub extensions: Vec<String>,
}
