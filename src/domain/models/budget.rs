use serde::{Deserialize, Serialize};
use chrono::NaiveDate;
use sqlx::FromRow;

pub const BUDGET_COUNTER: &str = "budget";
pub const ALLOCATION_COUNTER: &str = "budget_allocation";

/// A spending/income line in a club's ledger.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    #[serde(rename = "_id")]
    pub id: i64,
    pub ten: String,
    pub khoan_chi: f64,
    pub khoan_thu: f64,
    pub ngay: NaiveDate,
    pub thanh_vien_phu_trach: Option<String>,
    pub mo_ta: Option<String>,
    pub club: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBudget {
    pub ten: String,
    pub khoan_chi: Option<f64>,
    pub khoan_thu: Option<f64>,
    pub ngay: NaiveDate,
    pub thanh_vien_phu_trach: Option<String>,
    pub mo_ta: Option<String>,
    pub club: i64,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct BudgetPatch {
    pub ten: Option<String>,
    pub khoan_chi: Option<f64>,
    pub khoan_thu: Option<f64>,
    pub ngay: Option<NaiveDate>,
    #[serde(default, deserialize_with = "super::clearable")]
    pub thanh_vien_phu_trach: Option<Option<String>>,
    #[serde(default, deserialize_with = "super::clearable")]
    pub mo_ta: Option<Option<String>>,
    pub club: Option<i64>,
}

impl Budget {
    pub fn new(id: i64, input: NewBudget) -> Self {
        Self {
            id,
            ten: input.ten,
            khoan_chi: input.khoan_chi.unwrap_or(0.0),
            khoan_thu: input.khoan_thu.unwrap_or(0.0),
            ngay: input.ngay,
            thanh_vien_phu_trach: input.thanh_vien_phu_trach,
            mo_ta: input.mo_ta,
            club: input.club,
        }
    }

    pub fn apply(&mut self, patch: BudgetPatch) {
        if let Some(val) = patch.ten { self.ten = val; }
        if let Some(val) = patch.khoan_chi { self.khoan_chi = val; }
        if let Some(val) = patch.khoan_thu { self.khoan_thu = val; }
        if let Some(val) = patch.ngay { self.ngay = val; }
        if let Some(val) = patch.thanh_vien_phu_trach { self.thanh_vien_phu_trach = val; }
        if let Some(val) = patch.mo_ta { self.mo_ta = val; }
        if let Some(val) = patch.club { self.club = val; }
    }
}

/// Money granted to a club. Kept apart from `Budget` lines.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BudgetAllocation {
    #[serde(rename = "_id")]
    pub id: i64,
    pub so_tien: f64,
    pub muc_dich: Option<String>,
    pub ngay_cap_phat: NaiveDate,
    pub club: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBudgetAllocation {
    pub so_tien: f64,
    pub muc_dich: Option<String>,
    pub ngay_cap_phat: NaiveDate,
    pub club: i64,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct BudgetAllocationPatch {
    pub so_tien: Option<f64>,
    #[serde(default, deserialize_with = "super::clearable")]
    pub muc_dich: Option<Option<String>>,
    pub ngay_cap_phat: Option<NaiveDate>,
    pub club: Option<i64>,
}

impl BudgetAllocation {
    pub fn new(id: i64, input: NewBudgetAllocation) -> Self {
        Self {
            id,
            so_tien: input.so_tien,
            muc_dich: input.muc_dich,
            ngay_cap_phat: input.ngay_cap_phat,
            club: input.club,
        }
    }

    pub fn apply(&mut self, patch: BudgetAllocationPatch) {
        if let Some(val) = patch.so_tien { self.so_tien = val; }
        if let Some(val) = patch.muc_dich { self.muc_dich = val; }
        if let Some(val) = patch.ngay_cap_phat { self.ngay_cap_phat = val; }
        if let Some(val) = patch.club { self.club = val; }
    }
}
