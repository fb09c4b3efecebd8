use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::scraper::ProfileRecord;

#[derive(Deserialize)]
pub struct ProfileRequest {
    pub profile_url: String,
    #[serde(default)]
    pub mock: bool,
}

#[derive(Serialize)]
pub struct ProfileResponse {
    pub profile_url: String,
    pub mock: bool,
    pub person: Option<ProfileRecord>,
    pub fetched_at: DateTime<Utc>,
}

#[derive(Serialize)]
pub struct SummaryResponse {
    pub profile_url: String,
    pub mock: bool,
    pub model: String,
    pub summary: String,
    pub generated_at: DateTime<Utc>,
}
