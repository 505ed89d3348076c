mod support;

use actix_web::http::StatusCode;
use actix_web::{test, App};
use backend::configure_app;
use common::model::template::TemplateInfo;
use common::responses::{ErrorBody, RenderPreviewResponse};
use serde_json::json;
use support::{env, JSON_LIMIT};

#[actix_web::test]
async fn catalogue_lists_registered_templates() {
    let env = env();
    let app = test::init_service(App::new().configure(configure_app(env.state.clone(), JSON_LIMIT))).await;

    let req = test::TestRequest::get().uri("/api/templates").to_request();
    let templates: Vec<TemplateInfo> = test::call_and_read_body_json(&app, req).await;
    let ids: Vec<&str> = templates.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["classic", "prize-wheel", "minimal"]);
    assert!(templates.iter().all(|t| !t.field_schema.is_empty()));
}

#[actix_web::test]
async fn template_detail_and_unknown_ids() {
    let env = env();
    let app = test::init_service(App::new().configure(configure_app(env.state.clone(), JSON_LIMIT))).await;

    let req = test::TestRequest::get().uri("/api/templates/prize-wheel").to_request();
    let info: TemplateInfo = test::call_and_read_body_json(&app, req).await;
    assert_eq!(info.id, "prize-wheel");

    let req = test::TestRequest::get().uri("/api/templates/retro").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: ErrorBody = test::read_body_json(resp).await;
    assert_eq!(body.error, "Template 'retro' not found");
}

#[actix_web::test]
async fn preview_renders_with_a_pinned_version() {
    let env = env();
    let app = test::init_service(App::new().configure(configure_app(env.state.clone(), JSON_LIMIT))).await;
    let config = support::acme_site().config;

    let req = test::TestRequest::post()
        .uri("/api/templates/classic/render")
        .set_json(json!({"config": config, "pageVersion": "v1"}))
        .to_request();
    let preview: RenderPreviewResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(preview.page_version, "v1");
    assert!(preview.markup.contains("data-page-version=\"v1\""));
    assert!(preview.markup.contains("Launch in a day"));
    assert!(preview.stylesheet.contains("--color-primary: #0f766e;"));

    // Same input, same output.
    let req = test::TestRequest::post()
        .uri("/api/templates/classic/render")
        .set_json(json!({"config": config, "pageVersion": "v1"}))
        .to_request();
    let again: RenderPreviewResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(again, preview);

    let req = test::TestRequest::post()
        .uri("/api/templates/retro/render")
        .set_json(json!({"config": config}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
