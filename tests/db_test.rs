mod common;

use common::create_test_db;
use coursecraft::db::{CatalogFilter, Db};
use coursecraft::models::McqImport;
use coursecraft::names;

async fn seed_author(db: &Db) -> i32 {
    let user_id = db
        .create_user("author@test.dev", "password123", "Author")
        .await
        .unwrap();
    assert!(db.set_user_role(user_id, names::ROLE_ADMIN).await.unwrap());
    user_id
}

async fn seed_learner(db: &Db, email: &str, name: &str) -> i32 {
    db.create_user(email, "password123", name).await.unwrap()
}

/// Create a course and return (course_id, public_id).
async fn seed_course(
    db: &Db,
    author: i32,
    title: &str,
    category: &str,
    price_type: &str,
    price_cents: i32,
) -> (i32, String) {
    let public_id = db
        .create_course(title, "About this course", category, price_type, price_cents, None, author)
        .await
        .unwrap();
    let course = db.find_course_by_public_id(&public_id).await.unwrap().unwrap();
    (course.id, public_id)
}

async fn activate(db: &Db, public_id: &str) {
    db.set_course_status(public_id, "active").await.unwrap().unwrap();
}

/// Course with two chapters, two lessons each. Returns
/// (course_id, public_id, chapter_ids, lesson_ids).
async fn seed_course_with_content(db: &Db, author: i32) -> (i32, String, Vec<i32>, Vec<i32>) {
    let (course_id, public_id) =
        seed_course(db, author, "Rust from Scratch", "programming", "free", 0).await;
    let mut chapters = Vec::new();
    let mut lessons = Vec::new();
    for c in 1..=2 {
        let chapter_id = db
            .add_chapter(course_id, &format!("Chapter {c}"), "intro")
            .await
            .unwrap();
        chapters.push(chapter_id);
        for l in 1..=2 {
            let lesson_id = db
                .add_lesson(chapter_id, &format!("Lesson {c}.{l}"), "content", 10, &[])
                .await
                .unwrap();
            lessons.push(lesson_id);
        }
    }
    activate(db, &public_id).await;
    (course_id, public_id, chapters, lessons)
}

// ----- catalog -----

#[tokio::test]
async fn catalog_lists_only_active_courses() {
    let db = create_test_db().await;
    let author = seed_author(&db).await;

    let (_, active_id) = seed_course(&db, author, "Live course", "general", "free", 0).await;
    activate(&db, &active_id).await;
    let (_, inactive_id) = seed_course(&db, author, "Paused course", "general", "free", 0).await;
    activate(&db, &inactive_id).await;
    db.set_course_status(&inactive_id, "inactive").await.unwrap().unwrap();
    seed_course(&db, author, "Draft course", "general", "free", 0).await;

    let filter = CatalogFilter::default();
    let cards = db.catalog(&filter).await.unwrap();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].title, "Live course");
    assert_eq!(db.catalog_count(&filter).await.unwrap(), 1);
}

#[tokio::test]
async fn catalog_filters_by_category_price_and_search() {
    let db = create_test_db().await;
    let author = seed_author(&db).await;

    let (_, a) = seed_course(&db, author, "Intro to Rust", "programming", "free", 0).await;
    let (_, b) = seed_course(&db, author, "Figma Basics", "design", "paid", 1999).await;
    let (_, c) = seed_course(&db, author, "Advanced Rust", "programming", "paid", 4999).await;
    for id in [&a, &b, &c] {
        activate(&db, id).await;
    }

    let by_category = CatalogFilter {
        category: "programming".to_string(),
        ..Default::default()
    };
    assert_eq!(db.catalog(&by_category).await.unwrap().len(), 2);

    let by_price = CatalogFilter {
        price_type: "paid".to_string(),
        ..Default::default()
    };
    assert_eq!(db.catalog(&by_price).await.unwrap().len(), 2);

    let by_search = CatalogFilter {
        search: "rust".to_string(),
        ..Default::default()
    };
    let found = db.catalog(&by_search).await.unwrap();
    assert_eq!(found.len(), 2);
    assert!(found.iter().all(|card| card.title.contains("Rust")));

    let combined = CatalogFilter {
        category: "programming".to_string(),
        price_type: "paid".to_string(),
        search: "rust".to_string(),
        ..Default::default()
    };
    let found = db.catalog(&combined).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].title, "Advanced Rust");

    let categories = db.catalog_categories().await.unwrap();
    assert_eq!(categories, vec!["design".to_string(), "programming".to_string()]);
}

#[tokio::test]
async fn catalog_paginates() {
    let db = create_test_db().await;
    let author = seed_author(&db).await;

    for i in 0..names::CATALOG_PAGE_SIZE + 1 {
        let (_, id) = seed_course(&db, author, &format!("Course {i:02}"), "general", "free", 0).await;
        activate(&db, &id).await;
    }

    let first = CatalogFilter::default();
    assert_eq!(db.catalog(&first).await.unwrap().len() as i64, names::CATALOG_PAGE_SIZE);

    let second = CatalogFilter {
        page: 1,
        ..Default::default()
    };
    assert_eq!(db.catalog(&second).await.unwrap().len(), 1);
    assert_eq!(db.catalog_count(&second).await.unwrap(), names::CATALOG_PAGE_SIZE + 1);
}

// ----- enrollment and progress -----

#[tokio::test]
async fn enroll_is_idempotent() {
    let db = create_test_db().await;
    let author = seed_author(&db).await;
    let learner = seed_learner(&db, "learner@test.dev", "Learner").await;
    let (course_id, public_id, _, _) = seed_course_with_content(&db, author).await;

    assert!(!db.is_enrolled(learner, course_id).await.unwrap());
    assert!(db.enroll(learner, course_id, Some("2026-spring")).await.unwrap());
    assert!(!db.enroll(learner, course_id, None).await.unwrap());
    assert!(db.is_enrolled(learner, course_id).await.unwrap());
    assert_eq!(db.enrollment_count(course_id).await.unwrap(), 1);

    let enrolled = db.enrolled_courses(learner).await.unwrap();
    assert_eq!(enrolled.len(), 1);
    assert_eq!(enrolled[0].public_id, public_id);
    assert_eq!(enrolled[0].batch.as_deref(), Some("2026-spring"));
    assert_eq!(enrolled[0].total_lessons, 4);
    assert_eq!(enrolled[0].completed_lessons, 0);
}

#[tokio::test]
async fn chapter_locking_follows_lesson_completion() {
    let db = create_test_db().await;
    let author = seed_author(&db).await;
    let learner = seed_learner(&db, "learner@test.dev", "Learner").await;
    let (course_id, _, _, lessons) = seed_course_with_content(&db, author).await;
    db.enroll(learner, course_id, None).await.unwrap();

    let chapters = db.chapters_with_progress(course_id, learner).await.unwrap();
    assert!(!chapters[0].locked);
    assert!(chapters[1].locked);

    // One lesson left in chapter 1 keeps chapter 2 locked.
    db.complete_lesson(learner, lessons[0]).await.unwrap();
    let chapters = db.chapters_with_progress(course_id, learner).await.unwrap();
    assert!(chapters[1].locked);

    db.complete_lesson(learner, lessons[1]).await.unwrap();
    let chapters = db.chapters_with_progress(course_id, learner).await.unwrap();
    assert!(!chapters[1].locked);
    assert_eq!(chapters[0].completed_lessons, 2);

    let (completed, total) = db.course_progress(learner, course_id).await.unwrap();
    assert_eq!((completed, total), (2, 4));
}

#[tokio::test]
async fn complete_lesson_twice_counts_once() {
    let db = create_test_db().await;
    let author = seed_author(&db).await;
    let learner = seed_learner(&db, "learner@test.dev", "Learner").await;
    let (course_id, _, _, lessons) = seed_course_with_content(&db, author).await;
    db.enroll(learner, course_id, None).await.unwrap();

    db.complete_lesson(learner, lessons[0]).await.unwrap();
    db.complete_lesson(learner, lessons[0]).await.unwrap();

    let (completed, _) = db.course_progress(learner, course_id).await.unwrap();
    assert_eq!(completed, 1);
}

// ----- certificates -----

#[tokio::test]
async fn certificate_requires_completing_every_lesson() {
    let db = create_test_db().await;
    let author = seed_author(&db).await;
    let learner = seed_learner(&db, "learner@test.dev", "Learner").await;
    let (course_id, _, _, lessons) = seed_course_with_content(&db, author).await;
    db.enroll(learner, course_id, None).await.unwrap();

    assert!(db.issue_certificate(learner, course_id).await.unwrap().is_none());

    for lesson_id in &lessons {
        db.complete_lesson(learner, *lesson_id).await.unwrap();
    }
    let code = db.issue_certificate(learner, course_id).await.unwrap().unwrap();

    // Claiming again returns the same certificate instead of a second row.
    let again = db.issue_certificate(learner, course_id).await.unwrap().unwrap();
    assert_eq!(code, again);
    assert_eq!(
        db.certificate_code_for(learner, course_id).await.unwrap(),
        Some(code)
    );
}

#[tokio::test]
async fn certificate_with_no_lessons_is_never_issued() {
    let db = create_test_db().await;
    let author = seed_author(&db).await;
    let learner = seed_learner(&db, "learner@test.dev", "Learner").await;
    let (course_id, public_id) = seed_course(&db, author, "Empty", "general", "free", 0).await;
    activate(&db, &public_id).await;
    db.enroll(learner, course_id, None).await.unwrap();

    assert!(db.issue_certificate(learner, course_id).await.unwrap().is_none());
}

#[tokio::test]
async fn open_certificate_counts_downloads_and_checks_owner() {
    let db = create_test_db().await;
    let author = seed_author(&db).await;
    let learner = seed_learner(&db, "learner@test.dev", "Learner").await;
    let other = seed_learner(&db, "other@test.dev", "Other").await;
    let (course_id, _, _, lessons) = seed_course_with_content(&db, author).await;
    db.enroll(learner, course_id, None).await.unwrap();
    for lesson_id in &lessons {
        db.complete_lesson(learner, *lesson_id).await.unwrap();
    }
    let code = db.issue_certificate(learner, course_id).await.unwrap().unwrap();

    assert!(db.open_certificate(&code, other).await.unwrap().is_none());

    let cert = db.open_certificate(&code, learner).await.unwrap().unwrap();
    assert_eq!(cert.user_name, "Learner");
    assert_eq!(cert.status, "issued");
    db.open_certificate(&code, learner).await.unwrap().unwrap();

    let mine = db.certificates_for_user(learner).await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].download_count, 2);

    // Public verification needs no owner and does not count as a download.
    let verified = db.find_certificate_by_code(&code).await.unwrap().unwrap();
    assert_eq!(verified.course_title, "Rust from Scratch");
    assert!(db.find_certificate_by_code("NOPE").await.unwrap().is_none());
    let mine = db.certificates_for_user(learner).await.unwrap();
    assert_eq!(mine[0].download_count, 2);
}

// ----- studio -----

#[tokio::test]
async fn update_course_returns_changed_fields() {
    let db = create_test_db().await;
    let author = seed_author(&db).await;
    let (_, public_id) = seed_course(&db, author, "Original", "general", "free", 0).await;

    let changed = db
        .update_course(&public_id, "Renamed", "About this course", "general", "paid", 999, None)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(changed, vec!["title".to_string(), "price".to_string()]);

    // Saving identical values reports no changes.
    let changed = db
        .update_course(&public_id, "Renamed", "About this course", "general", "paid", 999, None)
        .await
        .unwrap()
        .unwrap();
    assert!(changed.is_empty());

    assert!(db
        .update_course("missing", "x", "y", "general", "free", 0, None)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn only_draft_courses_can_be_deleted() {
    let db = create_test_db().await;
    let author = seed_author(&db).await;

    let (_, draft_id) = seed_course(&db, author, "Draft", "general", "free", 0).await;
    let (course_id, title) = db.delete_draft_course(&draft_id).await.unwrap().unwrap();
    assert_eq!(title, "Draft");
    assert!(course_id > 0);
    assert!(db.find_course_by_public_id(&draft_id).await.unwrap().is_none());

    let (_, live_id) = seed_course(&db, author, "Live", "general", "free", 0).await;
    activate(&db, &live_id).await;
    assert!(db.delete_draft_course(&live_id).await.unwrap().is_none());
    assert!(db.find_course_by_public_id(&live_id).await.unwrap().is_some());
}

#[tokio::test]
async fn mcq_import_is_atomic_and_validated() {
    let db = create_test_db().await;
    let author = seed_author(&db).await;
    let (course_id, _, chapters, _) = seed_course_with_content(&db, author).await;

    let options = |a: &str, b: &str, c: &str, d: &str| {
        vec![a.to_string(), b.to_string(), c.to_string(), d.to_string()]
    };

    let imported = db
        .import_mcqs(
            course_id,
            &[
                McqImport {
                    chapter_id: chapters[0],
                    question: "What is ownership?".to_string(),
                    options: options("a", "b", "c", "d"),
                    correct_index: 0,
                },
                McqImport {
                    chapter_id: chapters[1],
                    question: "What is borrowing?".to_string(),
                    options: options("w", "x", "y", "z"),
                    correct_index: 3,
                },
            ],
        )
        .await
        .unwrap();
    assert_eq!(imported, 2);
    assert_eq!(db.mcqs_for_chapter(chapters[0]).await.unwrap().len(), 1);

    // A chapter from another course rejects the whole file.
    let (other_course, _, other_chapters, _) = seed_course_with_content(&db, author).await;
    assert!(other_course != course_id);
    let result = db
        .import_mcqs(
            course_id,
            &[
                McqImport {
                    chapter_id: chapters[0],
                    question: "Fine".to_string(),
                    options: options("1", "2", "3", "4"),
                    correct_index: 1,
                },
                McqImport {
                    chapter_id: other_chapters[0],
                    question: "Wrong course".to_string(),
                    options: options("1", "2", "3", "4"),
                    correct_index: 1,
                },
            ],
        )
        .await;
    assert!(result.is_err());
    assert_eq!(db.mcqs_for_chapter(chapters[0]).await.unwrap().len(), 1);

    // Duplicate options reject.
    let result = db
        .import_mcqs(
            course_id,
            &[McqImport {
                chapter_id: chapters[0],
                question: "Dupes".to_string(),
                options: options("same", "same", "c", "d"),
                correct_index: 0,
            }],
        )
        .await;
    assert!(result.is_err());

    // Out-of-range correct_index rejects.
    let result = db
        .import_mcqs(
            course_id,
            &[McqImport {
                chapter_id: chapters[0],
                question: "Bad index".to_string(),
                options: options("a", "b", "c", "d"),
                correct_index: 4,
            }],
        )
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn chapters_reorder_within_their_course() {
    let db = create_test_db().await;
    let author = seed_author(&db).await;
    let (course_id, _, chapters, _) = seed_course_with_content(&db, author).await;

    // The first chapter has nothing above it.
    assert!(!db.move_chapter(chapters[0], true).await.unwrap());

    assert!(db.move_chapter(chapters[1], true).await.unwrap());
    let ordered = db.chapters(course_id).await.unwrap();
    assert_eq!(ordered[0].id, chapters[1]);
    assert_eq!(ordered[1].id, chapters[0]);
}

// ----- wishlist -----

#[tokio::test]
async fn wishlist_positions_move_and_clamp() {
    let db = create_test_db().await;
    let author = seed_author(&db).await;
    let learner = seed_learner(&db, "learner@test.dev", "Learner").await;

    let mut course_ids = Vec::new();
    for i in 0..3 {
        let (course_id, public_id) =
            seed_course(&db, author, &format!("Course {i}"), "general", "free", 0).await;
        activate(&db, &public_id).await;
        db.add_wishlist_item(learner, course_id).await.unwrap();
        course_ids.push(course_id);
    }

    let items = db.wishlist_items(learner).await.unwrap();
    assert_eq!(items.iter().map(|i| i.position).collect::<Vec<_>>(), vec![1, 2, 3]);
    assert!(db.wishlist_contains(learner, course_ids[2]).await.unwrap());
    assert_eq!(db.wishlist_count(learner).await.unwrap(), 3);

    // Move the last entry to the top.
    assert!(db.move_wishlist_item(learner, course_ids[2], 1).await.unwrap());
    let items = db.wishlist_items(learner).await.unwrap();
    assert_eq!(items[0].course_id, course_ids[2]);
    assert_eq!(items[1].course_id, course_ids[0]);

    // Out-of-range target clamps to the end.
    assert!(db.move_wishlist_item(learner, course_ids[2], 99).await.unwrap());
    let items = db.wishlist_items(learner).await.unwrap();
    assert_eq!(items[2].course_id, course_ids[2]);

    assert!(!db.move_wishlist_item(learner, 999_999, 1).await.unwrap());

    assert!(db.remove_wishlist_item(learner, course_ids[0]).await.unwrap());
    assert!(!db.remove_wishlist_item(learner, course_ids[0]).await.unwrap());
    assert_eq!(db.clear_wishlist(learner).await.unwrap(), 2);
    assert_eq!(db.wishlist_count(learner).await.unwrap(), 0);
}

// ----- ratings -----

#[tokio::test]
async fn rating_upserts_and_moderation_toggles_visibility() {
    let db = create_test_db().await;
    let author = seed_author(&db).await;
    let learner = seed_learner(&db, "learner@test.dev", "Learner").await;
    let (course_id, public_id) = seed_course(&db, author, "Rated", "general", "free", 0).await;
    activate(&db, &public_id).await;
    db.enroll(learner, course_id, None).await.unwrap();

    db.rate_course(learner, course_id, 3, "okay").await.unwrap();
    db.rate_course(learner, course_id, 5, "actually great").await.unwrap();

    let visible = db.visible_ratings(course_id).await.unwrap();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].score, 5);
    assert_eq!(visible[0].review, "actually great");

    let (avg, count) = db.rating_summary(course_id).await.unwrap();
    assert_eq!(avg, Some(5.0));
    assert_eq!(count, 1);

    let rating_id = db.ratings_for_moderation().await.unwrap()[0].id;
    assert_eq!(db.toggle_rating_status(rating_id).await.unwrap().as_deref(), Some("hidden"));
    assert!(db.visible_ratings(course_id).await.unwrap().is_empty());
    let (avg, count) = db.rating_summary(course_id).await.unwrap();
    assert_eq!(avg, None);
    assert_eq!(count, 0);

    assert_eq!(db.toggle_rating_status(rating_id).await.unwrap().as_deref(), Some("visible"));
    assert!(db.toggle_rating_status(999_999).await.unwrap().is_none());
}

// ----- audit log -----

#[tokio::test]
async fn audit_log_filters_and_paginates() {
    let db = create_test_db().await;
    let author = seed_author(&db).await;
    let (course_id, _) = seed_course(&db, author, "Audited", "general", "free", 0).await;

    for i in 0..names::AUDIT_PAGE_SIZE + 2 {
        let action = if i % 2 == 0 { "updated" } else { "activated" };
        db.record_course_action(
            Some(course_id),
            "Audited",
            action,
            author,
            "Author",
            &["status".to_string()],
        )
        .await
        .unwrap();
    }

    let all_first = db.audit_page("", 0).await.unwrap();
    assert_eq!(all_first.len() as i64, names::AUDIT_PAGE_SIZE);
    let all_second = db.audit_page("", 1).await.unwrap();
    assert_eq!(all_second.len(), 2);
    assert_eq!(db.audit_count("").await.unwrap(), names::AUDIT_PAGE_SIZE + 2);

    let updated_only = db.audit_page("updated", 0).await.unwrap();
    assert!(updated_only.iter().all(|row| row.action == "updated"));
    assert_eq!(db.audit_count("updated").await.unwrap(), 14);

    assert_eq!(
        db.audit_actions().await.unwrap(),
        vec!["activated".to_string(), "updated".to_string()]
    );
}

#[tokio::test]
async fn audit_rows_survive_course_deletion() {
    let db = create_test_db().await;
    let author = seed_author(&db).await;
    let (course_id, public_id) = seed_course(&db, author, "Doomed", "general", "free", 0).await;

    db.record_course_action(Some(course_id), "Doomed", "created", author, "Author", &[])
        .await
        .unwrap();
    db.delete_draft_course(&public_id).await.unwrap().unwrap();
    db.record_course_action(None, "Doomed", "deleted", author, "Author", &[])
        .await
        .unwrap();

    let rows = db.audit_page("", 0).await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].action, "deleted");
    assert!(rows.iter().all(|row| row.course_id.is_none()));
    assert!(rows.iter().all(|row| row.course_title == "Doomed"));
}

// ----- campaigns -----

#[tokio::test]
async fn campaign_can_only_be_claimed_once() {
    let db = create_test_db().await;
    let author = seed_author(&db).await;

    let id = db
        .create_campaign("Hello", "<p>Hi</p>", names::AUDIENCE_ALL, author)
        .await
        .unwrap();
    assert_eq!(db.find_campaign(id).await.unwrap().unwrap().status, "draft");

    let claimed = db.claim_campaign_for_sending(id).await.unwrap().unwrap();
    assert_eq!(claimed.status, "sending");
    assert!(db.claim_campaign_for_sending(id).await.unwrap().is_none());

    db.record_campaign_recipient(id, "author@test.dev", "sent").await.unwrap();
    db.finish_campaign(id, 1, 0, "sent").await.unwrap();
    let finished = db.find_campaign(id).await.unwrap().unwrap();
    assert_eq!(finished.status, "sent");
    assert_eq!(finished.sent_count, 1);
    assert!(finished.sent_date.is_some());

    // Past-draft campaigns cannot be deleted.
    assert!(!db.delete_draft_campaign(id).await.unwrap());

    let draft = db
        .create_campaign("Bye", "<p>Bye</p>", names::AUDIENCE_ALL, author)
        .await
        .unwrap();
    assert!(db.delete_draft_campaign(draft).await.unwrap());
    assert!(db.find_campaign(draft).await.unwrap().is_none());
}

#[tokio::test]
async fn campaign_recipients_respect_audience_and_account_state() {
    let db = create_test_db().await;
    let author = seed_author(&db).await;
    let enrolled = seed_learner(&db, "enrolled@test.dev", "Enrolled").await;
    let bystander = seed_learner(&db, "bystander@test.dev", "Bystander").await;
    let disabled = seed_learner(&db, "disabled@test.dev", "Disabled").await;
    db.toggle_user_active(disabled).await.unwrap().unwrap();

    let (course_id, public_id, _, _) = seed_course_with_content(&db, author).await;
    db.enroll(enrolled, course_id, None).await.unwrap();
    db.enroll(bystander, course_id, None).await.unwrap();

    let everyone = db.all_recipient_emails().await.unwrap();
    assert_eq!(
        everyone,
        vec![
            "author@test.dev".to_string(),
            "bystander@test.dev".to_string(),
            "enrolled@test.dev".to_string(),
        ]
    );

    let course_audience = db.enrolled_recipient_emails(&public_id).await.unwrap();
    assert_eq!(
        course_audience,
        vec!["bystander@test.dev".to_string(), "enrolled@test.dev".to_string()]
    );
}

// ----- user administration -----

#[tokio::test]
async fn roles_change_and_deactivation_drops_sessions() {
    let db = create_test_db().await;
    let learner = seed_learner(&db, "learner@test.dev", "Learner").await;

    assert!(db.set_user_role(learner, names::ROLE_PLATFORM_MANAGER).await.unwrap());
    assert!(!db.set_user_role(999_999, names::ROLE_ADMIN).await.unwrap());

    let session = db.create_user_session(learner).await.unwrap();
    let user = db.get_user_by_session(&session).await.unwrap().unwrap();
    assert_eq!(user.role, names::ROLE_PLATFORM_MANAGER);

    // Deactivation logs the user out everywhere.
    assert_eq!(db.toggle_user_active(learner).await.unwrap(), Some(false));
    assert!(db.get_user_by_session(&session).await.unwrap().is_none());

    assert_eq!(db.toggle_user_active(learner).await.unwrap(), Some(true));
    assert!(db.toggle_user_active(999_999).await.unwrap().is_none());

    let rows = db.users_with_enrollments().await.unwrap();
    let row = rows.iter().find(|r| r.id == learner).unwrap();
    assert_eq!(row.role, names::ROLE_PLATFORM_MANAGER);
    assert!(row.is_active);
}

// ----- platform stats -----

#[tokio::test]
async fn platform_stats_count_the_basics() {
    let db = create_test_db().await;
    let author = seed_author(&db).await;
    let learner = seed_learner(&db, "learner@test.dev", "Learner").await;
    let (course_id, _, _, lessons) = seed_course_with_content(&db, author).await;
    db.enroll(learner, course_id, None).await.unwrap();
    for lesson_id in &lessons {
        db.complete_lesson(learner, *lesson_id).await.unwrap();
    }
    db.issue_certificate(learner, course_id).await.unwrap().unwrap();

    let stats = db.platform_stats().await.unwrap();
    assert_eq!(stats.total_users, 2);
    assert_eq!(stats.total_courses, 1);
    assert_eq!(stats.active_courses, 1);
    assert_eq!(stats.total_enrollments, 1);
    assert_eq!(stats.certificates_issued, 1);
    assert_eq!(stats.campaigns_sent, 0);

    let monthly = db.monthly_enrollments().await.unwrap();
    assert_eq!(monthly.iter().map(|m| m.count).sum::<i64>(), 1);
}
