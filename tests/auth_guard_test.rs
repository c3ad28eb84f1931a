mod common;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
};
use coursecraft::db::Db;
use coursecraft::email::ResendEmailSender;
use coursecraft::judge::JudgeClient;
use coursecraft::services::auth::AuthService;
use coursecraft::services::campaign::CampaignService;
use coursecraft::{names, router, AppState};
use tower::ServiceExt;

/// App state wired the way `main` does in dev mode: no Resend key, no judge.
fn test_state(db: Db) -> AppState {
    let email = ResendEmailSender::new(None);
    AppState {
        auth: AuthService::new(db.clone(), email.clone(), "http://localhost:3000".to_string()),
        campaigns: CampaignService::new(db.clone(), email),
        judge: JudgeClient::new(None),
        db,
        secure_cookies: false,
    }
}

async fn signed_in_user(db: &Db, role: &str) -> String {
    let user_id = db
        .create_user(&format!("{role}@test.dev"), "password123", "Tester")
        .await
        .expect("create user");
    if role != names::ROLE_MEMBER {
        assert!(db.set_user_role(user_id, role).await.expect("set role"));
    }
    let session = db.create_user_session(user_id).await.expect("create session");
    format!("{}={}", names::USER_SESSION_COOKIE_NAME, session)
}

async fn get_status(app: &axum::Router, uri: &str, cookie: Option<&str>) -> StatusCode {
    let mut req = Request::builder().method(Method::GET).uri(uri);
    if let Some(cookie) = cookie {
        req = req.header("cookie", cookie);
    }
    let resp = app
        .clone()
        .oneshot(req.body(Body::empty()).expect("request build should succeed"))
        .await
        .expect("router should respond");
    resp.status()
}

#[tokio::test]
async fn protected_pages_reject_anonymous_visitors() {
    let db = common::create_test_db().await;
    let app = router(test_state(db));

    let protected = [
        names::DASHBOARD_URL,
        names::WISHLIST_URL,
        names::ACCOUNT_URL,
        "/learn/xyz",
        names::STUDIO_URL,
        names::ADMIN_URL,
    ];
    for uri in protected {
        assert_eq!(
            get_status(&app, uri, None).await,
            StatusCode::UNAUTHORIZED,
            "expected UNAUTHORIZED for {uri}",
        );
    }

    // The catalog and certificate verification stay public.
    assert_eq!(get_status(&app, names::CATALOG_URL, None).await, StatusCode::OK);
    assert_eq!(
        get_status(&app, names::VERIFY_CERTIFICATE_URL, None).await,
        StatusCode::OK
    );
    assert!(get_status(&app, "/", None).await.is_redirection());
}

#[tokio::test]
async fn signed_in_members_reach_their_pages_but_not_staff_pages() {
    let db = common::create_test_db().await;
    let cookie = signed_in_user(&db, names::ROLE_MEMBER).await;
    let app = router(test_state(db));

    for uri in [names::DASHBOARD_URL, names::WISHLIST_URL, names::ACCOUNT_URL] {
        assert_eq!(
            get_status(&app, uri, Some(&cookie)).await,
            StatusCode::OK,
            "expected OK for {uri}",
        );
    }

    let staff_only = [
        names::STUDIO_URL,
        names::ADMIN_URL,
        names::ADMIN_USERS_URL,
        names::MODERATION_URL,
        names::CAMPAIGNS_URL,
        names::AUDIT_LOG_URL,
    ];
    for uri in staff_only {
        assert_eq!(
            get_status(&app, uri, Some(&cookie)).await,
            StatusCode::FORBIDDEN,
            "expected FORBIDDEN for {uri}",
        );
    }
}

#[tokio::test]
async fn role_gates_split_the_admin_area() {
    let db = common::create_test_db().await;
    let admin = signed_in_user(&db, names::ROLE_ADMIN).await;
    let moderator = signed_in_user(&db, names::ROLE_PLATFORM_MANAGER).await;
    let super_admin = signed_in_user(&db, names::ROLE_SUPER_ADMIN).await;
    let app = router(test_state(db));

    // Authors run the studio and campaigns but not user management or
    // moderation.
    assert_eq!(get_status(&app, names::STUDIO_URL, Some(&admin)).await, StatusCode::OK);
    assert_eq!(get_status(&app, names::CAMPAIGNS_URL, Some(&admin)).await, StatusCode::OK);
    assert_eq!(
        get_status(&app, names::ADMIN_USERS_URL, Some(&admin)).await,
        StatusCode::FORBIDDEN
    );
    assert_eq!(
        get_status(&app, names::MODERATION_URL, Some(&admin)).await,
        StatusCode::FORBIDDEN
    );

    // Platform managers moderate but do not author.
    assert_eq!(
        get_status(&app, names::MODERATION_URL, Some(&moderator)).await,
        StatusCode::OK
    );
    assert_eq!(
        get_status(&app, names::STUDIO_URL, Some(&moderator)).await,
        StatusCode::FORBIDDEN
    );
    assert_eq!(
        get_status(&app, names::ADMIN_USERS_URL, Some(&moderator)).await,
        StatusCode::FORBIDDEN
    );

    // Super admins reach everything.
    for uri in [
        names::STUDIO_URL,
        names::ADMIN_URL,
        names::ADMIN_USERS_URL,
        names::MODERATION_URL,
        names::CAMPAIGNS_URL,
        names::AUDIT_LOG_URL,
    ] {
        assert_eq!(
            get_status(&app, uri, Some(&super_admin)).await,
            StatusCode::OK,
            "expected OK for {uri}",
        );
    }
}

#[tokio::test]
async fn state_changing_requests_need_the_htmx_header() {
    let db = common::create_test_db().await;
    let cookie = signed_in_user(&db, names::ROLE_MEMBER).await;
    let app = router(test_state(db));

    // Without the header the CSRF layer rejects before any handler runs.
    let req = Request::builder()
        .method(Method::POST)
        .uri(names::WISHLIST_CLEAR_URL)
        .header("cookie", &cookie)
        .body(Body::empty())
        .expect("request build should succeed");
    let resp = app.clone().oneshot(req).await.expect("router should respond");
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = Request::builder()
        .method(Method::POST)
        .uri(names::WISHLIST_CLEAR_URL)
        .header("cookie", &cookie)
        .header("HX-Request", "true")
        .body(Body::empty())
        .expect("request build should succeed");
    let resp = app.clone().oneshot(req).await.expect("router should respond");
    assert_eq!(resp.status(), StatusCode::OK);

    // The header alone is not a session.
    let req = Request::builder()
        .method(Method::POST)
        .uri(names::WISHLIST_CLEAR_URL)
        .header("HX-Request", "true")
        .body(Body::empty())
        .expect("request build should succeed");
    let resp = app.oneshot(req).await.expect("router should respond");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
