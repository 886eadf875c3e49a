mod common;

use axum::http::StatusCode;
use common::{club_payload, member_payload, TestApp};
use serde_json::{json, Value};

#[tokio::test]
async fn test_club_then_member_then_cross_club_conflict() {
    let app = TestApp::new().await;
    let auth = app.manager().await;

    let (status, club) = app.send("POST", "/api/v1/clubs", Some(&auth), Some(json!({
        "ten": "CLB Tin học",
        "linhVucHoatDong": "Công nghệ",
        "ngayThanhLap": "2024-01-10",
        "giaoVienPhuTrach": "Nguyen Van A",
        "truongBanCLB": "gv001"
    }))).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(club["clubId"], 1);
    assert_eq!(club["tinhTrang"], "Còn hoạt động");

    let (status, member) = app.send("POST", "/api/v1/members", Some(&auth), Some(member_payload("hs001", 1))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(member["maSoHocSinh"], "hs001");
    assert_eq!(member["vaiTro"], "Thành viên");

    let second = app.create_club(&auth, "CLB Bóng đá", "gv001").await;
    assert_eq!(second, 2);

    let (status, body) = app.send("POST", "/api/v1/members", Some(&auth), Some(member_payload("hs001", second))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("hs001"));

    let (_, members) = app.send("GET", "/api/v1/members?club=2", Some(&auth), None).await;
    assert!(members.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_club_round_trip_keeps_submitted_fields() {
    let app = TestApp::new().await;
    let auth = app.manager().await;

    let payload = json!({
        "ten": "CLB Hóa học",
        "linhVucHoatDong": "Khoa học",
        "ngayThanhLap": "2023-09-05",
        "giaoVienPhuTrach": "Tran Thi B",
        "moTa": "Thí nghiệm vui",
        "quyDinh": "Đeo kính bảo hộ",
        "truongBanCLB": "hs100",
        "nganSach": 1500000.5,
        "tinhTrang": "Ngừng hoạt động"
    });

    let (status, created) = app.send("POST", "/api/v1/clubs", Some(&auth), Some(payload.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["clubId"].as_i64().unwrap();

    let (status, fetched) = app.send("GET", &format!("/api/v1/clubs/{}", id), Some(&auth), None).await;
    assert_eq!(status, StatusCode::OK);

    for (key, value) in payload.as_object().unwrap() {
        assert_eq!(&fetched[key], value, "field {} differs", key);
    }
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_invalid_club_reports_every_bad_field() {
    let app = TestApp::new().await;
    let auth = app.manager().await;

    let (status, body) = app.send("POST", "/api/v1/clubs", Some(&auth), Some(json!({
        "ten": "",
        "ngayThanhLap": "10/01/2024",
        "nganSach": "nhiều",
        "tinhTrang": "Tạm nghỉ"
    }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let fields: Vec<&str> = body["fields"].as_array().unwrap()
        .iter()
        .map(|f| f["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec![
        "ten", "linhVucHoatDong", "ngayThanhLap", "giaoVienPhuTrach",
        "truongBanCLB", "nganSach", "tinhTrang",
    ]);

    assert_eq!(app.state.counter_repo.current_value("club").await.unwrap(), 0);
}

#[tokio::test]
async fn test_partial_update_and_missing_club() {
    let app = TestApp::new().await;
    let auth = app.manager().await;
    let id = app.create_club(&auth, "CLB Cờ vua", "gv001").await;

    let (status, updated) = app.send("PUT", &format!("/api/v1/clubs/{}", id), Some(&auth), Some(json!({
        "tinhTrang": "Ngừng hoạt động",
        "nganSach": 200
    }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["tinhTrang"], "Ngừng hoạt động");
    assert_eq!(updated["ten"], "CLB Cờ vua");

    let (status, body) = app.send("PUT", &format!("/api/v1/clubs/{}", id), Some(&auth), Some(json!({
        "ten": null
    }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["fields"][0]["problem"], "cannot be cleared");

    let (status, _) = app.send("PUT", "/api/v1/clubs/99", Some(&auth), Some(json!({"ten": "X"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = app.send("GET", "/api/v1/clubs/99", Some(&auth), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = app.send("DELETE", "/api/v1/clubs/99", Some(&auth), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_with_null_clears_optional_fields() {
    let app = TestApp::new().await;
    let auth = app.manager().await;
    let id = app.create_club(&auth, "CLB Nhiếp ảnh", "gv001").await;
    let uri = format!("/api/v1/clubs/{}", id);

    let (status, _) = app.send("PUT", &uri, Some(&auth), Some(json!({"moTa": "abc", "quyDinh": "Đúng giờ"}))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, updated) = app.send("PUT", &uri, Some(&auth), Some(json!({"moTa": null}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["moTa"], Value::Null);
    assert_eq!(updated["quyDinh"], "Đúng giờ");

    let (_, fetched) = app.send("GET", &uri, Some(&auth), None).await;
    assert_eq!(fetched["moTa"], Value::Null);

    let (status, body) = app.send("PUT", &uri, Some(&auth), Some(json!({"tinhTrang": null}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["fields"][0]["field"], "tinhTrang");
    assert_eq!(body["fields"][0]["problem"], "cannot be cleared");
}

#[tokio::test]
async fn test_deleting_club_leaves_children_dangling() {
    let app = TestApp::new().await;
    let auth = app.manager().await;
    let id = app.create_club(&auth, "CLB Âm nhạc", "gv001").await;

    let (status, _) = app.send("POST", "/api/v1/members", Some(&auth), Some(member_payload("hs010", id))).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, event) = app.send("POST", "/api/v1/events", Some(&auth), Some(json!({
        "ten": "Văn nghệ 20/11",
        "ngayToChuc": "2024-11-20",
        "club": id
    }))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app.send("DELETE", &format!("/api/v1/clubs/{}", id), Some(&auth), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "deleted");

    let (status, member) = app.send("GET", "/api/v1/members/hs010", Some(&auth), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(member["club"], id);

    let (status, event) = app.send("GET", &format!("/api/v1/events/{}", event["id"]), Some(&auth), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(event["club"], id);

    // Ids are never reused after a delete.
    let next = app.create_club(&auth, "CLB Mới", "gv001").await;
    assert_eq!(next, id + 1);
}

#[tokio::test]
async fn test_students_cannot_write_clubs() {
    let app = TestApp::new().await;
    let manager = app.manager().await;
    let id = app.create_club(&manager, "CLB Văn học", "hs200").await;

    assert_eq!(app.register("hs200", "student", None).await, StatusCode::CREATED);
    let student = app.login("hs200", common::PASSWORD).await;

    let (status, _) = app.send("POST", "/api/v1/clubs", Some(&student), Some(club_payload("CLB Lậu", "hs200"))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = app.send("DELETE", &format!("/api/v1/clubs/{}", id), Some(&student), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, clubs) = app.send("GET", "/api/v1/clubs", Some(&student), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(clubs.as_array().unwrap().len(), 1);

    let (status, _) = app.send("GET", "/api/v1/clubs", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
