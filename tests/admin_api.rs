#[macro_use]
mod common;

use actix_web::{ResponseError, http::StatusCode, test};
use common::*;
use serde_json::{Value, json};

async fn json_body<B: actix_web::body::MessageBody>(
    resp: actix_web::dev::ServiceResponse<B>,
) -> Value {
    serde_json::from_str(&body_text(resp).await).unwrap()
}

#[actix_web::test]
async fn admin_routes_need_a_staff_token() {
    let state = TestState::new().await;
    let app = test_app!(state);

    let req = test::TestRequest::get().uri("/api/v1/admin/site").to_request();
    let err = test::try_call_service(&app, req).await.err().unwrap();
    assert_eq!(
        err.as_response_error().status_code(),
        StatusCode::UNAUTHORIZED
    );

    let req = test::TestRequest::get()
        .uri("/api/v1/admin/site")
        .insert_header(("Authorization", format!("Bearer {}", state.token(1, false))))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::get()
        .uri("/api/v1/admin/site")
        .insert_header(("Authorization", format!("Bearer {}", state.token(1, true))))
        .to_request();
    let body = json_body(test::call_service(&app, req).await).await;
    assert_eq!(body["data"]["site_header"], "Administrare Magazin Încălțăminte");
    assert_eq!(body["data"]["site_title"], "Panou Admin Magazin");
    assert_eq!(body["data"]["index_title"], "Bine ai venit în panoul de control");
}

#[actix_web::test]
async fn size_stock_is_unique_per_product_and_size() {
    let state = TestState::new().await;
    let cat = category(&state.pool, "Sport", true).await;
    let br = brand(&state.pool, "Nike").await;
    let p = product(&state.pool, "Air Max", cat.id, br.id, |_| {}).await;
    let s42 = size(&state.pool, "42").await;
    let token = state.token(1, true);
    let app = test_app!(state);

    let payload = json!({ "product_id": p.id, "size_id": s42.id, "quantity": 3 });
    let req = test::TestRequest::post()
        .uri("/api/v1/admin/size-stocks")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(&payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["data"]["size"], "42 (EU)");
    assert_eq!(body["data"]["product_name"], "Air Max");

    let req = test::TestRequest::post()
        .uri("/api/v1/admin/size-stocks")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(&payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = json_body(resp).await;
    assert_eq!(body["success"], false);
    assert!(body["error"]["fields"]["__all__"].is_array());

    // search spans the related product name
    let req = test::TestRequest::get()
        .uri("/api/v1/admin/size-stocks?q=air")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let body = json_body(test::call_service(&app, req).await).await;
    assert_eq!(body["data"]["total"], 1);

    let req = test::TestRequest::get()
        .uri("/api/v1/admin/size-stocks?q=zzz")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let body = json_body(test::call_service(&app, req).await).await;
    assert_eq!(body["data"]["total"], 0);
}

#[actix_web::test]
async fn product_update_keeps_creation_time() {
    let state = TestState::new().await;
    let cat = category(&state.pool, "Sport", true).await;
    let br = brand(&state.pool, "Nike").await;
    let token = state.token(1, true);
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/v1/admin/products")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({
            "nume": "Pegasus Trail",
            "descriere": "Pantof de alergare pentru trasee montane",
            "categorie": cat.id,
            "brand": br.id,
            "culoare_principala": "Verde",
            "pret_furnizor": "100.00",
            "adaos_procent": "25",
            "greutate_stang": 310.0,
            "greutate_drept": 320.0
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let created = json_body(resp).await;
    let id = created["data"]["id"].as_i64().unwrap();
    let created_at = created["data"]["created_at"].clone();
    assert_eq!(created["data"]["weight"], 315.0);

    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/admin/products/{id}"))
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({ "name": "Pegasus Trail 2", "in_stock": false }))
        .to_request();
    let updated = json_body(test::call_service(&app, req).await).await;
    assert_eq!(updated["data"]["name"], "Pegasus Trail 2");
    assert_eq!(updated["data"]["in_stock"], false);
    assert_eq!(updated["data"]["created_at"], created_at);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/admin/products/{id}"))
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let fetched = json_body(test::call_service(&app, req).await).await;
    assert_eq!(fetched["data"]["created_at"], created_at);
}

#[actix_web::test]
async fn product_form_errors_are_reported_per_field() {
    let state = TestState::new().await;
    let token = state.token(1, true);
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/v1/admin/products")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({ "nume": "ab", "descriere": "prea scurt" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = json_body(resp).await;
    let fields = &body["error"]["fields"];
    assert!(fields["nume"].is_array());
    assert!(fields["descriere"].is_array());
    assert!(fields["categorie"].is_array());
}

#[actix_web::test]
async fn product_list_is_most_expensive_first_and_paged() {
    let state = TestState::new().await;
    let cat = category(&state.pool, "Sport", true).await;
    let br = brand(&state.pool, "Nike").await;
    for (i, p) in ["10.50", "70.50", "30.50", "90.50", "50.50", "20.50"]
        .into_iter()
        .enumerate()
    {
        product(&state.pool, &format!("Model {i}"), cat.id, br.id, |m| {
            m.price = sea_orm::Set(price(p));
            m.in_stock = sea_orm::Set(i % 2 == 0);
        })
        .await;
    }
    let token = state.token(1, true);
    let app = test_app!(state);

    let req = test::TestRequest::get()
        .uri("/api/v1/admin/products")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let body = json_body(test::call_service(&app, req).await).await;
    let rows = body["data"]["data"].as_array().unwrap();
    assert_eq!(rows.len(), 5);
    assert_eq!(body["data"]["total_pages"], 2);
    assert_eq!(rows[0]["name"], "Model 3");
    assert_eq!(rows[0]["brand"], "Nike");
    assert_eq!(rows[0]["category"], "Sport (Unisex)");

    let req = test::TestRequest::get()
        .uri("/api/v1/admin/products?in_stoc=1")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let body = json_body(test::call_service(&app, req).await).await;
    assert_eq!(body["data"]["total"], 3);
}

#[actix_web::test]
async fn brand_names_are_unique() {
    let state = TestState::new().await;
    brand(&state.pool, "Nike").await;
    let token = state.token(1, true);
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/v1/admin/brands")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({ "name": "Nike", "country": "SUA" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = json_body(resp).await;
    assert!(body["error"]["fields"]["name"].is_array());
}

#[actix_web::test]
async fn promotions_link_existing_categories() {
    let state = TestState::new().await;
    let cat = category(&state.pool, "Sport", true).await;
    let token = state.token(1, true);
    let app = test_app!(state);

    let payload = |categories: Vec<i32>| {
        json!({
            "nume": "Reduceri de iarnă",
            "data_expirare": "2099-12-31T23:59",
            "reducere": 20,
            "subiect": "Reduceri mari",
            "categorii": categories,
            "mesaj": "reduceri_sezon.txt"
        })
    };

    let req = test::TestRequest::post()
        .uri("/api/v1/admin/promotions")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(payload(vec![cat.id, 999]))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/api/v1/admin/promotions")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(payload(vec![cat.id]))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["data"]["category_ids"], json!([cat.id]));
    assert_eq!(body["data"]["template"], "reduceri_sezon.txt");
    let id = body["data"]["id"].as_i64().unwrap();

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/admin/promotions/{id}"))
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/admin/promotions/{id}"))
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );
}
