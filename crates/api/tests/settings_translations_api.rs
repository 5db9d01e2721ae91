//! Integration tests for user settings and the translation catalogue.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, post_json, put_json, register_user};
use serde_json::json;

// ---------------------------------------------------------------------------
// Test: User settings
// ---------------------------------------------------------------------------

#[tokio::test]
async fn settings_are_created_with_defaults_and_patched_by_user_id() {
    let app = common::build_test_app();
    let user = register_user(&app, "alice").await;

    let response = post_json(
        &app,
        "/api/v1/user-settings",
        json!({ "user_id": user["id"] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let settings = body_json(response).await;
    assert_eq!(settings["language"], "en");
    assert_eq!(settings["notifications_enabled"], true);
    assert_eq!(settings["dark_mode"], false);

    let response = put_json(
        &app,
        &format!("/api/v1/user-settings/{}", user["id"]),
        json!({ "language": "pt", "dark_mode": true }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let fetched =
        body_json(get(&app, &format!("/api/v1/user-settings/{}", user["id"])).await).await;
    assert_eq!(fetched["language"], "pt");
    assert_eq!(fetched["dark_mode"], true);
    assert_eq!(fetched["notifications_enabled"], true);
}

#[tokio::test]
async fn fetching_settings_for_a_user_without_any_returns_404() {
    let app = common::build_test_app();
    let response = get(&app, "/api/v1/user-settings/9999").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: Translations
// ---------------------------------------------------------------------------

#[tokio::test]
async fn translations_are_listed_grouped_by_section_and_language() {
    let app = common::build_test_app();

    for (key, en, pt) in [
        ("home.title", "Find My Document", "Encontre Meu Documento"),
        ("home.subtitle", "Welcome", "Bem-vindo"),
        ("profile.title", "Profile", "Perfil"),
    ] {
        let response = post_json(
            &app,
            "/api/v1/translations",
            json!({ "key": key, "en": en, "pt": pt }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let catalogue = body_json(get(&app, "/api/v1/translations").await).await;
    assert_eq!(catalogue["home"]["en"]["title"], "Find My Document");
    assert_eq!(catalogue["home"]["pt"]["subtitle"], "Bem-vindo");
    assert_eq!(catalogue["profile"]["pt"]["title"], "Perfil");
}

#[tokio::test]
async fn a_translation_is_updated_by_its_key() {
    let app = common::build_test_app();
    post_json(
        &app,
        "/api/v1/translations",
        json!({ "key": "home.title", "en": "Old", "pt": "Velho" }),
    )
    .await;

    let response = put_json(
        &app,
        "/api/v1/translations/home.title",
        json!({ "en": "New" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let fetched = body_json(get(&app, "/api/v1/translations/home.title").await).await;
    assert_eq!(fetched["en"], "New");
    assert_eq!(fetched["pt"], "Velho");
}

#[tokio::test]
async fn updating_an_unknown_key_returns_404() {
    let app = common::build_test_app();

    let response = put_json(
        &app,
        "/api/v1/translations/missing.key",
        json!({ "en": "x" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn duplicate_translation_keys_conflict() {
    let app = common::build_test_app();
    let entry = json!({ "key": "home.title", "en": "A", "pt": "B" });

    post_json(&app, "/api/v1/translations", entry.clone()).await;
    let response = post_json(&app, "/api/v1/translations", entry).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}
