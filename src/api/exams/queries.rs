use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(super) struct ListExamsQuery {
    #[serde(default)]
    pub(super) status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct RangeQuery {
    #[serde(rename = "startDate", alias = "start_date")]
    pub(super) start_date: String,
    #[serde(rename = "endDate", alias = "end_date")]
    pub(super) end_date: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct StatusQuery {
    pub(super) status: String,
}
