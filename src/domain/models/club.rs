use serde::{Deserialize, Serialize};
use chrono::NaiveDate;
use sqlx::FromRow;

pub const CLUB_ACTIVE: &str = "Còn hoạt động";
pub const CLUB_INACTIVE: &str = "Ngừng hoạt động";
pub const CLUB_STATUSES: &[&str] = &[CLUB_ACTIVE, CLUB_INACTIVE];

/// Counter kind under which club ids are minted.
pub const CLUB_COUNTER: &str = "club";

#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Club {
    pub club_id: i64,
    pub ten: String,
    pub logo: Option<String>,
    pub linh_vuc_hoat_dong: String,
    pub ngay_thanh_lap: NaiveDate,
    pub giao_vien_phu_trach: String,
    pub mo_ta: Option<String>,
    pub quy_dinh: Option<String>,
    #[serde(rename = "truongBanCLB")]
    pub truong_ban_clb: String,
    pub ngan_sach: f64,
    pub tinh_trang: String,
}

/// Validated create payload. The id is minted separately.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewClub {
    pub ten: String,
    pub logo: Option<String>,
    pub linh_vuc_hoat_dong: String,
    pub ngay_thanh_lap: NaiveDate,
    pub giao_vien_phu_trach: String,
    pub mo_ta: Option<String>,
    pub quy_dinh: Option<String>,
    #[serde(rename = "truongBanCLB")]
    pub truong_ban_clb: String,
    pub ngan_sach: Option<f64>,
    pub tinh_trang: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ClubPatch {
    pub ten: Option<String>,
    #[serde(default, deserialize_with = "super::clearable")]
    pub logo: Option<Option<String>>,
    pub linh_vuc_hoat_dong: Option<String>,
    pub ngay_thanh_lap: Option<NaiveDate>,
    pub giao_vien_phu_trach: Option<String>,
    #[serde(default, deserialize_with = "super::clearable")]
    pub mo_ta: Option<Option<String>>,
    #[serde(default, deserialize_with = "super::clearable")]
    pub quy_dinh: Option<Option<String>>,
    #[serde(rename = "truongBanCLB")]
    pub truong_ban_clb: Option<String>,
    pub ngan_sach: Option<f64>,
    pub tinh_trang: Option<String>,
}

impl Club {
    pub fn new(club_id: i64, input: NewClub) -> Self {
        Self {
            club_id,
            ten: input.ten,
            logo: input.logo,
            linh_vuc_hoat_dong: input.linh_vuc_hoat_dong,
            ngay_thanh_lap: input.ngay_thanh_lap,
            giao_vien_phu_trach: input.giao_vien_phu_trach,
            mo_ta: input.mo_ta,
            quy_dinh: input.quy_dinh,
            truong_ban_clb: input.truong_ban_clb,
            ngan_sach: input.ngan_sach.unwrap_or(0.0),
            tinh_trang: input.tinh_trang.unwrap_or_else(|| CLUB_ACTIVE.to_string()),
        }
    }

    pub fn apply(&mut self, patch: ClubPatch) {
        if let Some(val) = patch.ten { self.ten = val; }
        if let Some(val) = patch.logo { self.logo = val; }
        if let Some(val) = patch.linh_vuc_hoat_dong { self.linh_vuc_hoat_dong = val; }
        if let Some(val) = patch.ngay_thanh_lap { self.ngay_thanh_lap = val; }
        if let Some(val) = patch.giao_vien_phu_trach { self.giao_vien_phu_trach = val; }
        if let Some(val) = patch.mo_ta { self.mo_ta = val; }
        if let Some(val) = patch.quy_dinh { self.quy_dinh = val; }
        if let Some(val) = patch.truong_ban_clb { self.truong_ban_clb = val; }
        if let Some(val) = patch.ngan_sach { self.ngan_sach = val; }
        if let Some(val) = patch.tinh_trang { self.tinh_trang = val; }
    }
}
