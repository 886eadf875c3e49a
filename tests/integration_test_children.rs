mod common;

use axum::http::StatusCode;
use common::{member_payload, TestApp};
use serde_json::json;

#[tokio::test]
async fn test_children_of_unknown_club_are_not_persisted() {
    let app = TestApp::new().await;
    let auth = app.manager().await;
    let ghost = 404;

    let attempts = vec![
        ("/api/v1/events", json!({"ten": "Hội trại", "ngayToChuc": "2024-03-26", "club": ghost})),
        ("/api/v1/budgets", json!({"ten": "Quỹ lớp", "khoanThu": 100, "ngay": "2024-03-01", "club": ghost})),
        ("/api/v1/budget-allocations", json!({"soTien": 500, "ngayCapPhat": "2024-03-01", "club": ghost})),
        ("/api/v1/reports", json!({"tenBaoCao": "Tổng kết", "ngayBaoCao": "2024-05-30", "club": ghost})),
        ("/api/v1/prizes", json!({"tenGiaiThuong": "Giải nhất", "ngayDatGiai": "2024-04-01", "club": ghost, "thanhVien": "hs001"})),
    ];

    for (uri, payload) in attempts {
        let (status, _) = app.send("POST", uri, Some(&auth), Some(payload)).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{} accepted an unknown club", uri);

        let (status, listed) = app.send("GET", uri, Some(&auth), None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(listed.as_array().unwrap().is_empty(), "{} persisted a record", uri);
    }

    for kind in ["event", "budget", "budget_allocation", "report", "prize"] {
        assert_eq!(app.state.counter_repo.current_value(kind).await.unwrap(), 0, "{} minted an id", kind);
    }
}

#[tokio::test]
async fn test_event_crud_and_list_filter() {
    let app = TestApp::new().await;
    let auth = app.manager().await;
    let a = app.create_club(&auth, "CLB A", "gv001").await;
    let b = app.create_club(&auth, "CLB B", "gv001").await;

    let (status, event) = app.send("POST", "/api/v1/events", Some(&auth), Some(json!({
        "ten": "Ngày hội STEM",
        "ngayToChuc": "2024-04-12",
        "thoiGian": "08:00",
        "diaDiem": "Sân trường",
        "khachMoi": ["Hiệu trưởng", "Phụ huynh"],
        "club": a
    }))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(event["id"], 1);
    assert_eq!(event["khachMoi"], json!(["Hiệu trưởng", "Phụ huynh"]));
    assert_eq!(event["nganSach"], 0.0);

    app.send("POST", "/api/v1/events", Some(&auth), Some(json!({
        "ten": "Giao lưu", "ngayToChuc": "2024-05-01", "club": b
    }))).await;

    let (_, only_a) = app.send("GET", &format!("/api/v1/events?club={}", a), Some(&auth), None).await;
    assert_eq!(only_a.as_array().unwrap().len(), 1);
    let (_, all) = app.send("GET", "/api/v1/events", Some(&auth), None).await;
    assert_eq!(all.as_array().unwrap().len(), 2);

    let (status, _) = app.send("PUT", "/api/v1/events/1", Some(&auth), Some(json!({"club": 999}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, updated) = app.send("PUT", "/api/v1/events/1", Some(&auth), Some(json!({"diaDiem": "Nhà thi đấu"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["diaDiem"], "Nhà thi đấu");
    assert_eq!(updated["thoiGian"], "08:00");

    let (status, cleared) = app.send("PUT", "/api/v1/events/1", Some(&auth), Some(json!({"thoiGian": null}))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(cleared["thoiGian"].is_null());
    assert_eq!(cleared["diaDiem"], "Nhà thi đấu");

    let (status, _) = app.send("DELETE", "/api/v1/events/1", Some(&auth), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = app.send("GET", "/api/v1/events/1", Some(&auth), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_report_event_ids_checked_at_write_time() {
    let app = TestApp::new().await;
    let auth = app.manager().await;
    let club = app.create_club(&auth, "CLB Sử học", "gv001").await;

    let (_, event) = app.send("POST", "/api/v1/events", Some(&auth), Some(json!({
        "ten": "Tham quan bảo tàng", "ngayToChuc": "2024-03-08", "club": club
    }))).await;
    let event_id = event["id"].as_i64().unwrap();

    let (status, body) = app.send("POST", "/api/v1/reports", Some(&auth), Some(json!({
        "tenBaoCao": "Báo cáo quý 1",
        "ngayBaoCao": "2024-03-31",
        "danhSachSuKien": [event_id, 55],
        "club": club
    }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("55"));

    let (status, report) = app.send("POST", "/api/v1/reports", Some(&auth), Some(json!({
        "tenBaoCao": "Báo cáo quý 1",
        "ngayBaoCao": "2024-03-31",
        "danhSachSuKien": [event_id],
        "tongNganSachChi": 300000,
        "club": club
    }))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(report["_id"], 1);

    // The report keeps the id after the event is gone.
    app.send("DELETE", &format!("/api/v1/events/{}", event_id), Some(&auth), None).await;
    let (status, fetched) = app.send("GET", "/api/v1/reports/1", Some(&auth), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["danhSachSuKien"], json!([event_id]));

    let (status, updated) = app.send("PUT", "/api/v1/reports/1", Some(&auth), Some(json!({
        "ketQuaDatDuoc": "Hoàn thành"
    }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["ketQuaDatDuoc"], "Hoàn thành");
}

#[tokio::test]
async fn test_prize_requires_member() {
    let app = TestApp::new().await;
    let auth = app.manager().await;
    let club = app.create_club(&auth, "CLB Toán", "gv001").await;

    let (status, _) = app.send("POST", "/api/v1/prizes", Some(&auth), Some(json!({
        "tenGiaiThuong": "Giải nhì Olympic", "ngayDatGiai": "2024-04-20", "club": club, "thanhVien": "hs900"
    }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    app.send("POST", "/api/v1/members", Some(&auth), Some(member_payload("hs900", club))).await;

    let (status, prize) = app.send("POST", "/api/v1/prizes", Some(&auth), Some(json!({
        "tenGiaiThuong": "Giải nhì Olympic",
        "ngayDatGiai": "2024-04-20",
        "loaiGiai": "Cấp tỉnh",
        "anhDatGiai": "uploads/olympic.jpg",
        "club": club,
        "thanhVien": "hs900"
    }))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(prize["_id"], 1);
    assert_eq!(prize["anhDatGiai"], "uploads/olympic.jpg");

    let (status, _) = app.send("PUT", "/api/v1/prizes/1", Some(&auth), Some(json!({"thanhVien": "ghost"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_club_finance_rolls_up_both_ledgers() {
    let app = TestApp::new().await;
    let auth = app.manager().await;
    let club = app.create_club(&auth, "CLB Kinh doanh", "gv001").await;
    let other = app.create_club(&auth, "CLB Khác", "gv001").await;

    for (chi, thu) in [(200.0, 0.0), (50.5, 300.0)] {
        let (status, _) = app.send("POST", "/api/v1/budgets", Some(&auth), Some(json!({
            "ten": "Hội chợ", "khoanChi": chi, "khoanThu": thu, "ngay": "2024-03-10", "club": club
        }))).await;
        assert_eq!(status, StatusCode::CREATED);
    }
    app.send("POST", "/api/v1/budget-allocations", Some(&auth), Some(json!({
        "soTien": 1000, "mucDich": "Kinh phí năm", "ngayCapPhat": "2024-01-15", "club": club
    }))).await;
    app.send("POST", "/api/v1/budget-allocations", Some(&auth), Some(json!({
        "soTien": 9999, "ngayCapPhat": "2024-01-15", "club": other
    }))).await;

    let (status, finance) = app.send("GET", &format!("/api/v1/clubs/{}/finance", club), Some(&auth), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(finance["totalAllocated"], 1000.0);
    assert_eq!(finance["totalIncome"], 300.0);
    assert_eq!(finance["totalExpense"], 250.5);
    assert_eq!(finance["balance"], 1049.5);

    let (status, _) = app.send("GET", "/api/v1/clubs/123/finance", Some(&auth), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, budgets) = app.send("GET", &format!("/api/v1/budgets?club={}", club), Some(&auth), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(budgets.as_array().unwrap().len(), 2);
    assert_eq!(budgets[0]["_id"], 2);
}
