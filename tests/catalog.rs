#[macro_use]
mod common;

use actix_web::{http::StatusCode, test};
use common::*;
use sea_orm::Set;

struct Seeded {
    sport: i32,
    boots: i32,
    ecco: i32,
    leather: i32,
}

/// Three products that differ on every filterable field.
async fn seed_three(state: &TestState) -> Seeded {
    let pool = &state.pool;
    let sport = category(pool, "Sport", true).await;
    let boots = category(pool, "Ghete", true).await;
    let nike = brand(pool, "Nike").await;
    let ecco = brand(pool, "Ecco").await;
    let textile = material(pool, "Textil").await;
    let leather = material(pool, "Piele").await;

    product(pool, "Alpha Runner", sport.id, nike.id, |p| {
        p.description = Set("Pantof sport usor pentru alergare zilnica".into());
        p.primary_color = Set("Rosu".into());
        p.price = Set(price("149.99"));
        p.weight = Set(Some(300.5));
        p.material_id = Set(Some(textile.id));
        p.created_at = Set(utc(2024, 1, 10));
    })
    .await;
    product(pool, "Bravo Boot", boots.id, ecco.id, |p| {
        p.description = Set("Gheata de iarna din piele naturala".into());
        p.primary_color = Set("Negru".into());
        p.price = Set(price("399.99"));
        p.weight = Set(Some(750.5));
        p.in_stock = Set(false);
        p.material_id = Set(Some(leather.id));
        p.created_at = Set(utc(2025, 2, 1));
    })
    .await;
    product(pool, "Charlie Sandal", sport.id, ecco.id, |p| {
        p.description = Set("Sandala de vara comoda si aerisita".into());
        p.primary_color = Set("Alb".into());
        p.price = Set(price("89.50"));
        p.weight = Set(Some(200.25));
        p.created_at = Set(utc(2025, 6, 1));
    })
    .await;

    Seeded {
        sport: sport.id,
        boots: boots.id,
        ecco: ecco.id,
        leather: leather.id,
    }
}

#[actix_web::test]
async fn each_filter_field_narrows_the_listing() {
    let state = TestState::new().await;
    let s = seed_three(&state).await;
    let app = test_app!(state);

    let cases: Vec<(String, &[&str])> = vec![
        ("nume=alpha".into(), &["Alpha Runner"]),
        ("descriere=iarna".into(), &["Bravo Boot"]),
        ("culoare_principala=alb".into(), &["Charlie Sandal"]),
        ("pret_min=100".into(), &["Alpha Runner", "Bravo Boot"]),
        ("pret_max=150".into(), &["Alpha Runner", "Charlie Sandal"]),
        ("greutate_min=250&greutate_max=400".into(), &["Alpha Runner"]),
        ("data_adaugarii_min=2025-01-01".into(), &["Bravo Boot", "Charlie Sandal"]),
        ("in_stoc=0".into(), &["Bravo Boot"]),
        ("in_stoc=1".into(), &["Alpha Runner", "Charlie Sandal"]),
        (format!("categorie={}", s.sport), &["Alpha Runner", "Charlie Sandal"]),
        (format!("categorie={}", s.boots), &["Bravo Boot"]),
        (format!("brand={}", s.ecco), &["Bravo Boot", "Charlie Sandal"]),
        (format!("material={}", s.leather), &["Bravo Boot"]),
    ];

    for (query, expected) in cases {
        let req = test::TestRequest::get()
            .uri(&format!("/produse?{query}"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK, "{query}");
        let html = body_text(resp).await;

        for name in ["Alpha Runner", "Bravo Boot", "Charlie Sandal"] {
            assert_eq!(
                lists_product(&html, name),
                expected.contains(&name),
                "{name} with {query}"
            );
        }
    }
}

#[actix_web::test]
async fn invalid_filter_shows_errors_and_leaves_listing_unfiltered() {
    let state = TestState::new().await;
    seed_three(&state).await;
    let app = test_app!(state);

    let req = test::TestRequest::get()
        .uri("/produse?pret_min=200&pret_max=100&nume=a%40b")
        .to_request();
    let html = body_text(test::call_service(&app, req).await).await;

    assert!(html.contains("Prețul maxim nu poate fi mai mic decât prețul minim"));
    assert!(html.contains("caractere speciale"));
    assert_eq!(card_count(&html), 3);
}

#[actix_web::test]
async fn unknown_reference_is_a_form_error() {
    let state = TestState::new().await;
    seed_three(&state).await;
    let app = test_app!(state);

    let req = test::TestRequest::get()
        .uri("/produse?categorie=999")
        .to_request();
    let html = body_text(test::call_service(&app, req).await).await;

    assert!(html.contains("Selectați o opțiune validă"));
    assert_eq!(card_count(&html), 3);
}

#[actix_web::test]
async fn price_sort_orders_cards() {
    let state = TestState::new().await;
    seed_three(&state).await;
    let app = test_app!(state);

    let req = test::TestRequest::get().uri("/produse?sort=a").to_request();
    let html = body_text(test::call_service(&app, req).await).await;
    let charlie = html.find(">Charlie Sandal<").unwrap();
    let alpha = html.find(">Alpha Runner<").unwrap();
    let bravo = html.find(">Bravo Boot<").unwrap();
    assert!(charlie < alpha && alpha < bravo);

    let req = test::TestRequest::get().uri("/produse?sort=d").to_request();
    let html = body_text(test::call_service(&app, req).await).await;
    assert!(html.find(">Bravo Boot<").unwrap() < html.find(">Charlie Sandal<").unwrap());
}

#[actix_web::test]
async fn pagination_uses_page_size_and_clamps_bad_pages() {
    let state = TestState::new().await;
    let cat = category(&state.pool, "Sport", true).await;
    let br = brand(&state.pool, "Puma").await;
    for i in 1..=7 {
        product(&state.pool, &format!("Model {i}"), cat.id, br.id, |_| {}).await;
    }
    let app = test_app!(state);

    let html = body_text(
        test::call_service(&app, test::TestRequest::get().uri("/produse").to_request()).await,
    )
    .await;
    assert_eq!(card_count(&html), 5);
    assert!(html.contains("Pagina 1 din 2"));

    for (page, expected_page, cards) in [("99", 2, 2), ("0", 2, 2), ("-1", 2, 2), ("abc", 1, 5), ("2", 2, 2)] {
        let req = test::TestRequest::get()
            .uri(&format!("/produse?page={page}"))
            .to_request();
        let html = body_text(test::call_service(&app, req).await).await;
        assert!(html.contains(&format!("Pagina {expected_page} din 2")), "page={page}");
        assert_eq!(card_count(&html), cards, "page={page}");
    }

    let req = test::TestRequest::get()
        .uri("/produse?items_pe_pagina=10")
        .to_request();
    let html = body_text(test::call_service(&app, req).await).await;
    assert_eq!(card_count(&html), 7);
    assert!(html.contains("Pagina 1 din 1"));
}

#[actix_web::test]
async fn pagination_links_keep_other_parameters() {
    let state = TestState::new().await;
    let cat = category(&state.pool, "Sport", true).await;
    let br = brand(&state.pool, "Puma").await;
    for i in 1..=6 {
        product(&state.pool, &format!("Model {i}"), cat.id, br.id, |_| {}).await;
    }
    let app = test_app!(state);

    let req = test::TestRequest::get()
        .uri("/produse?culoare_principala=Negru&sort=d")
        .to_request();
    let html = body_text(test::call_service(&app, req).await).await;
    assert!(html.contains("/produse?culoare_principala=Negru&amp;sort=d&amp;page=2"));
    assert!(html.contains("/produse?culoare_principala=Negru&amp;sort=a"));
}

#[actix_web::test]
async fn product_detail_and_missing_product() {
    let state = TestState::new().await;
    let cat = category(&state.pool, "Sport", true).await;
    let br = brand(&state.pool, "Adidas").await;
    let p = product(&state.pool, "Samba Classic", cat.id, br.id, |_| {}).await;
    let s38 = size(&state.pool, "38").await;
    stock(&state.pool, p.id, s38.id, 4).await;
    let app = test_app!(state);

    let req = test::TestRequest::get()
        .uri(&format!("/produse/{}", p.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(resp).await;
    assert!(html.contains("Samba Classic"));
    assert!(html.contains("38 (EU): 4 buc."));

    let req = test::TestRequest::get().uri("/produse/9999").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let html = body_text(resp).await;
    assert!(html.contains("Eroare 404"));
    assert!(html.contains("Produsul cu ID-ul 9999 nu există."));
}

#[actix_web::test]
async fn category_page_lists_only_its_products() {
    let state = TestState::new().await;
    seed_three(&state).await;
    let app = test_app!(state);

    let req = test::TestRequest::get().uri("/categorii/Ghete").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(resp).await;
    assert!(lists_product(&html, "Bravo Boot"));
    assert!(!lists_product(&html, "Alpha Runner"));

    let req = test::TestRequest::get().uri("/categorii/Inexistenta").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn navigation_shows_visible_categories() {
    let state = TestState::new().await;
    category(&state.pool, "Sandale de vara", true).await;
    category(&state.pool, "Ascunsa", false).await;
    let app = test_app!(state);

    let html = body_text(
        test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await,
    )
    .await;
    assert!(html.contains("/categorii/Sandale%20de%20vara"));
    assert!(!html.contains("Ascunsa"));
}

#[actix_web::test]
async fn like_wildcards_in_text_filters_match_literally() {
    let state = TestState::new().await;
    let seeded = seed_three(&state).await;
    let app = test_app!(state);

    for query in ["descriere=%25", "descriere=_", "culoare_principala=%25"] {
        let req = test::TestRequest::get()
            .uri(&format!("/produse?{query}"))
            .to_request();
        let html = body_text(test::call_service(&app, req).await).await;
        assert_eq!(card_count(&html), 0, "{query}");
    }

    product(&state.pool, "Delta Promo", seeded.sport, seeded.ecco, |p| {
        p.description = Set("Pantof sport cu 50% reducere".into());
    })
    .await;
    let req = test::TestRequest::get()
        .uri("/produse?descriere=50%25")
        .to_request();
    let html = body_text(test::call_service(&app, req).await).await;
    assert_eq!(card_count(&html), 1);
    assert!(lists_product(&html, "Delta Promo"));
}

#[actix_web::test]
async fn database_failure_renders_an_html_error_page() {
    use sea_orm::ConnectionTrait;

    let state = TestState::new().await;
    category(&state.pool, "Sport", true).await;
    let app = test_app!(state);
    state
        .pool
        .execute_unprepared("DROP TABLE products")
        .await
        .unwrap();

    let req = test::TestRequest::get().uri("/produse").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let html = body_text(resp).await;
    assert!(html.contains("Eroare 500"));
    assert!(!html.contains("\"success\""));
}
