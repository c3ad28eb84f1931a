// Database model structs

use serde::Serialize;

use crate::names;

#[derive(Clone, sqlx::FromRow)]
pub struct AuthUser {
    pub id: i32,
    pub email: String,
    pub display_name: String,
    pub role: String,
    pub is_active: bool,
}

impl AuthUser {
    /// Any role above plain membership.
    pub fn is_staff(&self) -> bool {
        self.role != names::ROLE_MEMBER
    }

    /// May create and edit courses, campaigns, and view the audit log.
    pub fn can_author(&self) -> bool {
        self.role == names::ROLE_ADMIN || self.role == names::ROLE_SUPER_ADMIN
    }

    /// May change course status and rating visibility.
    pub fn can_moderate(&self) -> bool {
        self.role == names::ROLE_PLATFORM_MANAGER || self.role == names::ROLE_SUPER_ADMIN
    }

    /// May change roles and deactivate accounts.
    pub fn can_manage_users(&self) -> bool {
        self.role == names::ROLE_SUPER_ADMIN
    }
}

#[derive(sqlx::FromRow)]
pub struct Course {
    pub id: i32,
    pub public_id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub price_type: String,
    pub price_cents: i32,
    pub image_url: Option<String>,
    pub status: String,
    pub created_by: i32,
}

/// Catalog card row: course plus derived enrollment and rating aggregates.
#[derive(sqlx::FromRow)]
pub struct CourseCard {
    pub id: i32,
    pub public_id: String,
    pub title: String,
    pub category: String,
    pub price_type: String,
    pub price_cents: i32,
    pub image_url: Option<String>,
    pub status: String,
    pub enrollment_count: i64,
    pub rating_avg: Option<f64>,
    pub rating_count: i64,
}

#[derive(sqlx::FromRow)]
pub struct Chapter {
    pub id: i32,
    pub course_id: i32,
    pub title: String,
    pub content: String,
    pub position: i32,
}

/// Chapter row for the learning page. `locked` is derived after the query:
/// a chapter is locked until every lesson of every earlier chapter is done.
#[derive(sqlx::FromRow)]
pub struct ChapterProgress {
    pub id: i32,
    pub title: String,
    pub position: i32,
    pub lesson_count: i64,
    pub completed_lessons: i64,
    pub mcq_count: i64,
    #[sqlx(default)]
    pub locked: bool,
}

#[derive(sqlx::FromRow)]
pub struct Lesson {
    pub id: i32,
    pub chapter_id: i32,
    pub title: String,
    pub content: String,
    pub position: i32,
    pub duration_minutes: i32,
}

#[derive(sqlx::FromRow)]
pub struct LessonResource {
    pub id: i32,
    pub kind: String,
    pub url: String,
}

#[derive(sqlx::FromRow)]
pub struct LessonListItem {
    pub id: i32,
    pub title: String,
    pub position: i32,
    pub duration_minutes: i32,
    pub completed: bool,
}

#[derive(sqlx::FromRow)]
pub struct Mcq {
    pub id: i32,
    pub course_id: i32,
    pub chapter_id: i32,
    pub question: String,
    pub options: Vec<String>,
    pub correct_index: i32,
}

#[derive(sqlx::FromRow)]
pub struct CodingQuestion {
    pub id: i32,
    pub course_id: i32,
    pub title: String,
    pub description: String,
    pub difficulty: String,
    pub test_cases: serde_json::Value,
    pub starter_code: serde_json::Value,
    pub allowed_languages: Vec<String>,
    pub time_limit_ms: i32,
    pub memory_limit_mb: i32,
}

#[derive(sqlx::FromRow)]
pub struct CodingQuestionSummary {
    pub id: i32,
    pub title: String,
    pub difficulty: String,
}

/// Enrollment joined with its course and progress summary.
#[derive(sqlx::FromRow)]
pub struct EnrolledCourse {
    pub course_id: i32,
    pub public_id: String,
    pub title: String,
    pub category: String,
    pub image_url: Option<String>,
    pub batch: Option<String>,
    pub enrolled_date: String,
    pub total_chapters: i64,
    pub completed_chapters: i64,
    pub total_lessons: i64,
    pub completed_lessons: i64,
}

#[derive(sqlx::FromRow)]
pub struct Certificate {
    pub id: i32,
    pub certificate_code: String,
    pub course_title: String,
    pub status: String,
    pub issued_date: String,
    pub download_count: i32,
}

#[derive(sqlx::FromRow)]
pub struct CertificateVerification {
    pub certificate_code: String,
    pub course_title: String,
    pub user_name: String,
    pub status: String,
    pub issued_date: String,
}

#[derive(sqlx::FromRow)]
pub struct Rating {
    pub id: i32,
    pub user_name: String,
    pub score: i32,
    pub review: String,
    pub status: String,
    pub created_date: String,
}

#[derive(sqlx::FromRow)]
pub struct ModerationRating {
    pub id: i32,
    pub course_title: String,
    pub user_name: String,
    pub score: i32,
    pub review: String,
    pub status: String,
}

/// A wishlisted course with its embedded course snapshot, ordered by
/// `position` (insertion order unless the user reorders).
#[derive(Clone, Debug, PartialEq, Serialize, sqlx::FromRow)]
pub struct WishlistItem {
    pub id: i32,
    pub course_id: i32,
    pub position: i32,
    pub added_date: String,
    pub course_public_id: String,
    pub course_title: String,
    pub course_category: String,
    pub course_status: String,
    pub price_type: String,
    pub price_cents: i32,
    pub image_url: Option<String>,
}

/// Derived wishlist aggregation. Pure function of the local item list.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct WishlistStats {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
    pub draft: usize,
    pub free: usize,
    pub paid: usize,
    pub categories: usize,
}

#[derive(sqlx::FromRow)]
pub struct AuditLogRow {
    pub id: i32,
    pub course_id: Option<i32>,
    pub course_title: String,
    pub action: String,
    pub user_name: String,
    pub changed_fields: Vec<String>,
    pub created_date: String,
}

#[derive(sqlx::FromRow)]
pub struct Campaign {
    pub id: i32,
    pub subject: String,
    pub body_html: String,
    pub audience: String,
    pub status: String,
    pub sent_count: i32,
    pub failed_count: i32,
    pub created_date: String,
    pub sent_date: Option<String>,
}

#[derive(sqlx::FromRow)]
pub struct UserAdminRow {
    pub id: i32,
    pub email: String,
    pub display_name: String,
    pub role: String,
    pub is_active: bool,
    pub created_date: String,
    pub enrollment_count: i64,
}

#[derive(sqlx::FromRow)]
pub struct ModerationCourse {
    pub id: i32,
    pub public_id: String,
    pub title: String,
    pub category: String,
    pub status: String,
    pub creator_name: String,
    pub enrollment_count: i64,
}

#[derive(sqlx::FromRow)]
pub struct PlatformStats {
    pub total_users: i64,
    pub total_courses: i64,
    pub active_courses: i64,
    pub total_enrollments: i64,
    pub certificates_issued: i64,
    pub campaigns_sent: i64,
}

#[derive(sqlx::FromRow)]
pub struct MonthlyEnrollment {
    pub month_label: String,
    pub count: i64,
}
