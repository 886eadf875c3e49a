use serde::{Deserialize, Serialize};
use chrono::NaiveDate;
use sqlx::FromRow;

pub const PRIZE_COUNTER: &str = "prize";

#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Prize {
    #[serde(rename = "_id")]
    pub id: i64,
    pub ten_giai_thuong: String,
    pub ngay_dat_giai: NaiveDate,
    pub loai_giai: Option<String>,
    pub ghi_chu: Option<String>,
    /// Opaque reference handed over by the upload layer.
    pub anh_dat_giai: Option<String>,
    pub club: i64,
    pub thanh_vien: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPrize {
    pub ten_giai_thuong: String,
    pub ngay_dat_giai: NaiveDate,
    pub loai_giai: Option<String>,
    pub ghi_chu: Option<String>,
    pub anh_dat_giai: Option<String>,
    pub club: i64,
    pub thanh_vien: String,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PrizePatch {
    pub ten_giai_thuong: Option<String>,
    pub ngay_dat_giai: Option<NaiveDate>,
    #[serde(default, deserialize_with = "super::clearable")]
    pub loai_giai: Option<Option<String>>,
    #[serde(default, deserialize_with = "super::clearable")]
    pub ghi_chu: Option<Option<String>>,
    #[serde(default, deserialize_with = "super::clearable")]
    pub anh_dat_giai: Option<Option<String>>,
    pub club: Option<i64>,
    pub thanh_vien: Option<String>,
}

impl Prize {
    pub fn new(id: i64, input: NewPrize) -> Self {
        Self {
            id,
            ten_giai_thuong: input.ten_giai_thuong,
            ngay_dat_giai: input.ngay_dat_giai,
            loai_giai: input.loai_giai,
            ghi_chu: input.ghi_chu,
            anh_dat_giai: input.anh_dat_giai,
            club: input.club,
            thanh_vien: input.thanh_vien,
        }
    }

    pub fn apply(&mut self, patch: PrizePatch) {
        if let Some(val) = patch.ten_giai_thuong { self.ten_giai_thuong = val; }
        if let Some(val) = patch.ngay_dat_giai { self.ngay_dat_giai = val; }
        if let Some(val) = patch.loai_giai { self.loai_giai = val; }
        if let Some(val) = patch.ghi_chu { self.ghi_chu = val; }
        if let Some(val) = patch.anh_dat_giai { self.anh_dat_giai = val; }
        if let Some(val) = patch.club { self.club = val; }
        if let Some(val) = patch.thanh_vien { self.thanh_vien = val; }
    }
}
