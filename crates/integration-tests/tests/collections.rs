//! Loading, filtering and mutating collections through the dashboard.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, ResponseTemplate};

use selam_admin::controllers::{ListFilter, LoadOutcome};
use selam_admin::models::{JobDraft, JobPosting};
use selam_admin::notifications::Variant;
use selam_admin::{AppError, DashboardView, Envelope};
use selam_core::Slug;
use selam_integration_tests::{TestContext, accepted, jobs, ok, products};

#[tokio::test]
async fn filtering_returns_a_subset_and_empty_filter_is_identity() {
    let ctx = TestContext::new().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/jobs"))
        .respond_with(ok(jobs()))
        .mount(&ctx.server)
        .await;

    let mut dashboard = ctx.signed_in().await;
    dashboard.navigate(DashboardView::Jobs).await.unwrap();

    let all = dashboard.jobs.filter(&ListFilter::new());
    assert_eq!(all.len(), dashboard.jobs.items().len());

    let filters = [
        ListFilter::new().term("engineer"),
        ListFilter::new().facet("department", "engineering"),
        ListFilter::new().facet("status", "published").term("nairobi"),
        ListFilter::new().facet("type", "Contract").facet("status", "all"),
    ];
    for filter in &filters {
        let subset = dashboard.jobs.filter(filter);
        assert!(subset.len() <= all.len());
        for job in subset {
            assert!(dashboard.jobs.items().contains(job));
        }
    }

    let published_nairobi = dashboard.jobs.filter(&filters[2]);
    assert_eq!(published_nairobi.len(), 1);
    assert_eq!(published_nairobi[0].id.as_str(), "j-3");

    // Filtering never touches the collection.
    assert_eq!(dashboard.jobs.items().len(), 3);
}

#[tokio::test]
async fn created_job_appears_after_reload() {
    let ctx = TestContext::new().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/jobs"))
        .and(body_partial_json(json!({"title": "Data Analyst", "department": "Data"})))
        .respond_with(accepted())
        .expect(1)
        .mount(&ctx.server)
        .await;
    let mut after = jobs();
    after.as_array_mut().unwrap().push(json!({
        "id": "j-9", "title": "Data Analyst", "department": "Data", "location": "Remote"
    }));
    Mock::given(method("GET"))
        .and(path("/api/v1/jobs"))
        .respond_with(ok(after))
        .mount(&ctx.server)
        .await;

    let mut dashboard = ctx.signed_in().await;
    let draft = JobDraft {
        title: "Data Analyst".to_string(),
        department: "Data".to_string(),
        location: "Remote".to_string(),
        ..JobDraft::default()
    };
    dashboard.jobs.create(draft).await.unwrap();

    let created = dashboard.jobs.get("j-9").unwrap();
    assert_eq!(created.title, "Data Analyst");
    assert_eq!(dashboard.notifier().count(Variant::Success), 1);
}

#[tokio::test]
async fn rejected_load_notifies_once_and_keeps_collection() {
    let ctx = TestContext::new().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/products"))
        .respond_with(ok(products()))
        .up_to_n_times(1)
        .mount(&ctx.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/products"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": false, "message": "maintenance"})),
        )
        .mount(&ctx.server)
        .await;

    let mut dashboard = ctx.signed_in().await;
    dashboard.navigate(DashboardView::Products).await.unwrap();
    assert_eq!(dashboard.products.items().len(), 2);

    let err = dashboard
        .navigate(DashboardView::Products)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Rejected(ref msg) if msg == "maintenance"));
    assert_eq!(dashboard.products.items().len(), 2);
    assert_eq!(dashboard.notifier().count(Variant::Destructive), 1);
    // A rejection is not an auth failure.
    assert!(dashboard.session.is_authenticated());
}

#[tokio::test]
async fn deleting_unknown_product_leaves_collection_unchanged() {
    let ctx = TestContext::new().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/products"))
        .respond_with(ok(products()))
        .mount(&ctx.server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/products/no-such-product"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"success": false})))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let mut dashboard = ctx.signed_in().await;
    dashboard.navigate(DashboardView::Products).await.unwrap();
    let before = dashboard.products.items().to_vec();

    let result = dashboard
        .products
        .delete(&Slug::parse("no-such-product").unwrap())
        .await;
    let err = dashboard.observe(result).unwrap_err();

    assert!(err.api_error().unwrap().is_not_found());
    assert_eq!(dashboard.products.items(), before.as_slice());
    assert_eq!(dashboard.notifier().count(Variant::Destructive), 1);
    assert!(dashboard.session.is_authenticated());
}

#[tokio::test]
async fn stale_load_response_is_discarded() {
    let ctx = TestContext::new().await;
    let mut dashboard = ctx.signed_in().await;

    let first = dashboard.jobs.begin_load();
    let second = dashboard.jobs.begin_load();

    let stale: Envelope<Vec<JobPosting>> =
        serde_json::from_value(json!({"success": true, "data": jobs()})).unwrap();
    let fresh: Envelope<Vec<JobPosting>> = serde_json::from_value(json!({
        "success": true,
        "data": [{"id": "j-7", "title": "Platform Engineer"}]
    }))
    .unwrap();

    // The newer response lands first; the older one must not overwrite it.
    assert_eq!(
        dashboard.jobs.apply(second, Ok(fresh)).unwrap(),
        LoadOutcome::Applied(1)
    );
    assert_eq!(
        dashboard.jobs.apply(first, Ok(stale)).unwrap(),
        LoadOutcome::Stale
    );
    assert_eq!(dashboard.jobs.items().len(), 1);
    assert_eq!(dashboard.jobs.items()[0].id.as_str(), "j-7");
}
