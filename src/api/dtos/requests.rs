use serde::Deserialize;

/// `?club=` filter accepted by every child list endpoint.
#[derive(Debug, Deserialize, Default)]
pub struct ListQuery {
    pub club: Option<i64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub user_id: String,
    pub password: String,
}
