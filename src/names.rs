pub const LOGIN_URL: &str = "/login";
pub const REGISTER_URL: &str = "/register";
pub const LOGOUT_URL: &str = "/logout";
pub const RESEND_VERIFICATION_URL: &str = "/resend-verification";
pub const FORGOT_PASSWORD_URL: &str = "/forgot-password";
pub const RESET_PASSWORD_URL: &str = "/reset-password";
pub const ACCOUNT_URL: &str = "/account";
pub const CHANGE_PASSWORD_URL: &str = "/change-password";

pub const USER_SESSION_COOKIE_NAME: &str = "user_session";

pub const CATALOG_URL: &str = "/courses";
pub const DASHBOARD_URL: &str = "/dashboard";
pub const WISHLIST_URL: &str = "/wishlist";
pub const WISHLIST_CLEAR_URL: &str = "/wishlist/clear";
pub const WISHLIST_EXPORT_URL: &str = "/wishlist/export";
pub const WISHLIST_COUNT_URL: &str = "/wishlist/count";
pub const VERIFY_CERTIFICATE_URL: &str = "/verify-certificate";

pub const STUDIO_URL: &str = "/studio";
pub const CREATE_COURSE_URL: &str = "/studio/create-course";

pub const ADMIN_URL: &str = "/admin";
pub const ADMIN_USERS_URL: &str = "/admin/users";
pub const MODERATION_URL: &str = "/admin/moderation";
pub const AUDIT_LOG_URL: &str = "/admin/audit";
pub const CAMPAIGNS_URL: &str = "/admin/campaigns";
pub const CREATE_CAMPAIGN_URL: &str = "/admin/campaigns/create";

pub fn course_page_url(public_id: &str) -> String {
    format!("/course/{public_id}")
}

pub fn enroll_url(public_id: &str) -> String {
    format!("/course/{public_id}/enroll")
}

pub fn rate_course_url(public_id: &str) -> String {
    format!("/course/{public_id}/rate")
}

pub fn learn_url(public_id: &str) -> String {
    format!("/learn/{public_id}")
}

pub fn lesson_url(public_id: &str, lesson_id: i32) -> String {
    format!("/learn/{public_id}/lesson/{lesson_id}")
}

pub fn complete_lesson_url(public_id: &str, lesson_id: i32) -> String {
    format!("/learn/{public_id}/lesson/{lesson_id}/complete")
}

pub fn chapter_practice_url(public_id: &str, chapter_id: i32) -> String {
    format!("/learn/{public_id}/practice/{chapter_id}")
}

pub fn check_mcq_url(public_id: &str, mcq_id: i32) -> String {
    format!("/learn/{public_id}/mcq/{mcq_id}/check")
}

pub fn coding_question_url(public_id: &str, question_id: i32) -> String {
    format!("/learn/{public_id}/coding/{question_id}")
}

pub fn submit_code_url(public_id: &str, question_id: i32) -> String {
    format!("/learn/{public_id}/coding/{question_id}/submit")
}

pub fn claim_certificate_url(public_id: &str) -> String {
    format!("/learn/{public_id}/certificate")
}

pub fn certificate_url(code: &str) -> String {
    format!("/certificate/{code}")
}

pub fn add_to_wishlist_url(public_id: &str) -> String {
    format!("/wishlist/add/{public_id}")
}

pub fn remove_from_wishlist_url(public_id: &str) -> String {
    format!("/wishlist/remove/{public_id}")
}

pub fn move_wishlist_item_url(public_id: &str) -> String {
    format!("/wishlist/move/{public_id}")
}

pub fn studio_course_url(public_id: &str) -> String {
    format!("/studio/course/{public_id}")
}

pub fn edit_course_url(public_id: &str) -> String {
    format!("/studio/course/{public_id}/edit")
}

pub fn delete_course_url(public_id: &str) -> String {
    format!("/studio/course/{public_id}/delete")
}

pub fn course_status_url(public_id: &str) -> String {
    format!("/studio/course/{public_id}/status")
}

pub fn add_chapter_url(public_id: &str) -> String {
    format!("/studio/course/{public_id}/add-chapter")
}

pub fn edit_chapter_url(public_id: &str, chapter_id: i32) -> String {
    format!("/studio/course/{public_id}/chapter/{chapter_id}/edit")
}

pub fn delete_chapter_url(public_id: &str, chapter_id: i32) -> String {
    format!("/studio/course/{public_id}/chapter/{chapter_id}/delete")
}

pub fn move_chapter_url(public_id: &str, chapter_id: i32) -> String {
    format!("/studio/course/{public_id}/chapter/{chapter_id}/move")
}

pub fn add_lesson_url(public_id: &str, chapter_id: i32) -> String {
    format!("/studio/course/{public_id}/chapter/{chapter_id}/add-lesson")
}

pub fn edit_lesson_url(public_id: &str, lesson_id: i32) -> String {
    format!("/studio/course/{public_id}/lesson/{lesson_id}/edit")
}

pub fn delete_lesson_url(public_id: &str, lesson_id: i32) -> String {
    format!("/studio/course/{public_id}/lesson/{lesson_id}/delete")
}

pub fn add_mcq_url(public_id: &str, chapter_id: i32) -> String {
    format!("/studio/course/{public_id}/chapter/{chapter_id}/add-mcq")
}

pub fn edit_mcq_url(public_id: &str, mcq_id: i32) -> String {
    format!("/studio/course/{public_id}/mcq/{mcq_id}/edit")
}

pub fn delete_mcq_url(public_id: &str, mcq_id: i32) -> String {
    format!("/studio/course/{public_id}/mcq/{mcq_id}/delete")
}

pub fn import_mcqs_url(public_id: &str) -> String {
    format!("/studio/course/{public_id}/import-mcqs")
}

pub fn add_coding_question_url(public_id: &str) -> String {
    format!("/studio/course/{public_id}/add-coding-question")
}

pub fn edit_coding_question_url(public_id: &str, question_id: i32) -> String {
    format!("/studio/course/{public_id}/coding/{question_id}/edit")
}

pub fn delete_coding_question_url(public_id: &str, question_id: i32) -> String {
    format!("/studio/course/{public_id}/coding/{question_id}/delete")
}

pub fn send_campaign_url(campaign_id: i32) -> String {
    format!("/admin/campaigns/{campaign_id}/send")
}

pub fn delete_campaign_url(campaign_id: i32) -> String {
    format!("/admin/campaigns/{campaign_id}/delete")
}

pub fn set_user_role_url(user_id: i32) -> String {
    format!("/admin/users/{user_id}/role")
}

pub fn toggle_user_active_url(user_id: i32) -> String {
    format!("/admin/users/{user_id}/toggle-active")
}

pub fn moderate_course_url(public_id: &str) -> String {
    format!("/admin/moderation/course/{public_id}/status")
}

pub fn toggle_rating_url(rating_id: i32) -> String {
    format!("/admin/moderation/rating/{rating_id}/toggle")
}

// Roles
pub const ROLE_MEMBER: &str = "member";
pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_PLATFORM_MANAGER: &str = "platform_manager";
pub const ROLE_SUPER_ADMIN: &str = "super_admin";
pub const ROLES: &[&str] = &[
    ROLE_MEMBER,
    ROLE_ADMIN,
    ROLE_PLATFORM_MANAGER,
    ROLE_SUPER_ADMIN,
];

// Course catalog defaults
pub const COURSE_STATUSES: &[&str] = &["draft", "active", "inactive"];
pub const PRICE_TYPES: &[&str] = &["free", "paid"];
pub const COURSE_CATEGORIES: &[&str] = &[
    "general",
    "programming",
    "design",
    "business",
    "data-science",
    "language",
];
pub const CATALOG_PAGE_SIZE: i64 = 12;
pub const AUDIT_PAGE_SIZE: i64 = 25;

// Questions
pub const MCQ_OPTION_COUNT: usize = 4;
pub const DIFFICULTIES: &[&str] = &["easy", "medium", "hard"];

// Ratings
pub const MIN_RATING_SCORE: i32 = 1;
pub const MAX_RATING_SCORE: i32 = 5;

// Campaign audiences
pub const AUDIENCE_ALL: &str = "all";
pub const AUDIENCE_COURSE_PREFIX: &str = "course:";

// i18n
pub const LOCALE_COOKIE_NAME: &str = "lang";
pub const DEFAULT_LOCALE: &str = "en";
pub const SET_LOCALE_URL: &str = "/set-locale";
