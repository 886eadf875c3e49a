use serde::{Deserialize, Serialize};
use chrono::NaiveDate;
use sqlx::{types::Json, FromRow};

pub const REPORT_COUNTER: &str = "report";

#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    #[serde(rename = "_id")]
    pub id: i64,
    pub ten_bao_cao: String,
    pub ngay_bao_cao: NaiveDate,
    pub nhan_su_phu_trach: Option<String>,
    /// Event ids as they were when the report was written.
    pub danh_sach_su_kien: Json<Vec<i64>>,
    pub tong_ngan_sach_chi: f64,
    pub tong_thu: f64,
    pub ket_qua_dat_duoc: Option<String>,
    pub club: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReport {
    pub ten_bao_cao: String,
    pub ngay_bao_cao: NaiveDate,
    pub nhan_su_phu_trach: Option<String>,
    pub danh_sach_su_kien: Option<Vec<i64>>,
    pub tong_ngan_sach_chi: Option<f64>,
    pub tong_thu: Option<f64>,
    pub ket_qua_dat_duoc: Option<String>,
    pub club: i64,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ReportPatch {
    pub ten_bao_cao: Option<String>,
    pub ngay_bao_cao: Option<NaiveDate>,
    #[serde(default, deserialize_with = "super::clearable")]
    pub nhan_su_phu_trach: Option<Option<String>>,
    pub danh_sach_su_kien: Option<Vec<i64>>,
    pub tong_ngan_sach_chi: Option<f64>,
    pub tong_thu: Option<f64>,
    #[serde(default, deserialize_with = "super::clearable")]
    pub ket_qua_dat_duoc: Option<Option<String>>,
    pub club: Option<i64>,
}

impl Report {
    pub fn new(id: i64, input: NewReport) -> Self {
        Self {
            id,
            ten_bao_cao: input.ten_bao_cao,
            ngay_bao_cao: input.ngay_bao_cao,
            nhan_su_phu_trach: input.nhan_su_phu_trach,
            danh_sach_su_kien: Json(input.danh_sach_su_kien.unwrap_or_default()),
            tong_ngan_sach_chi: input.tong_ngan_sach_chi.unwrap_or(0.0),
            tong_thu: input.tong_thu.unwrap_or(0.0),
            ket_qua_dat_duoc: input.ket_qua_dat_duoc,
            club: input.club,
        }
    }

    pub fn apply(&mut self, patch: ReportPatch) {
        if let Some(val) = patch.ten_bao_cao { self.ten_bao_cao = val; }
        if let Some(val) = patch.ngay_bao_cao { self.ngay_bao_cao = val; }
        if let Some(val) = patch.nhan_su_phu_trach { self.nhan_su_phu_trach = val; }
        if let Some(val) = patch.danh_sach_su_kien { self.danh_sach_su_kien = Json(val); }
        if let Some(val) = patch.tong_ngan_sach_chi { self.tong_ngan_sach_chi = val; }
        if let Some(val) = patch.tong_thu { self.tong_thu = val; }
        if let Some(val) = patch.ket_qua_dat_duoc { self.ket_qua_dat_duoc = val; }
        if let Some(val) = patch.club { self.club = val; }
    }
}
