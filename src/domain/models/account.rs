use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

pub const ROLE_STUDENT: &str = "student";
pub const ROLE_MANAGER: &str = "manager";
pub const ACCOUNT_ROLES: &[&str] = &[ROLE_STUDENT, ROLE_MANAGER];

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub user_id: String,
    pub ten: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    pub user_id: String,
    pub ten: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

impl Account {
    pub fn new(input: NewAccount, password_hash: String) -> Self {
        Self {
            user_id: input.user_id,
            ten: input.ten,
            email: input.email.to_lowercase(),
            password_hash,
            role: input.role,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AccountPatch {
    pub ten: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

impl AccountPatch {
    /// Whether applying this patch changes what the account's sessions were issued for.
    pub fn changes_credentials(&self, account: &Account) -> bool {
        self.password.is_some() || self.role.as_ref().is_some_and(|role| *role != account.role)
    }
}

impl Account {
    /// `password_hash` is the fresh hash of `patch.password`, when one was sent.
    pub fn apply(&mut self, patch: AccountPatch, password_hash: Option<String>) {
        if let Some(val) = patch.ten { self.ten = val; }
        if let Some(val) = patch.email { self.email = val.to_lowercase(); }
        if let Some(val) = password_hash { self.password_hash = val; }
        if let Some(val) = patch.role { self.role = val; }
    }
}
