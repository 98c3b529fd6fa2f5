use serde::{Serialize, Deserialize};

// ip-api.com response, only the fields we show.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct GeoLookup {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(rename = "regionName")]
    #[serde(default)]
    pub region_name: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub isp: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub zip: Option<String>
}

impl GeoLookup {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}
