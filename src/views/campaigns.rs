use maud::{html, Markup};
use rust_i18n::t;

use crate::db::models::{Campaign, CourseCard};
use crate::{names, views::components};

pub fn campaigns_page(campaigns: &[Campaign], email_enabled: bool, locale: &str) -> Markup {
    html! {
        h1 { (t!("campaigns.title", locale = locale)) }

        @if !email_enabled {
            p { mark { (t!("campaigns.email_disabled", locale = locale)) } }
        }

        p {
            (components::nav_link(
                names::CREATE_CAMPAIGN_URL,
                html! { (t!("campaigns.new_btn", locale = locale)) },
            ))
        }

        @if campaigns.is_empty() {
            p { (t!("campaigns.empty", locale = locale)) }
        } @else {
            table {
                thead {
                    tr {
                        th { (t!("campaigns.subject", locale = locale)) }
                        th { (t!("campaigns.audience", locale = locale)) }
                        th { (t!("campaigns.status", locale = locale)) }
                        th { (t!("campaigns.delivered", locale = locale)) }
                        th { (t!("campaigns.created", locale = locale)) }
                        th { (t!("campaigns.sent", locale = locale)) }
                        th {}
                    }
                }
                tbody {
                    @for campaign in campaigns {
                        tr {
                            td { (campaign.subject) }
                            td { (audience_label(&campaign.audience, locale)) }
                            td {
                                @match campaign.status.as_str() {
                                    "sent" => { (campaign.status) }
                                    _ => { mark { (campaign.status) } }
                                }
                            }
                            td {
                                @if campaign.status == "draft" {
                                    "-"
                                } @else {
                                    (campaign.sent_count)
                                    @if campaign.failed_count > 0 {
                                        " (" (campaign.failed_count) " "
                                        (t!("campaigns.failed_suffix", locale = locale)) ")"
                                    }
                                }
                            }
                            td { (campaign.created_date) }
                            td {
                                @match campaign.sent_date {
                                    Some(ref date) => { (date) }
                                    None => { "-" }
                                }
                            }
                            td style="white-space: nowrap;" {
                                @if campaign.status == "draft" {
                                    button style="width: fit-content;"
                                           hx-post=(names::send_campaign_url(campaign.id))
                                           hx-ext="json-enc"
                                           hx-target="main"
                                           hx-swap="innerHTML"
                                           hx-confirm=(t!("campaigns.send_confirm", locale = locale))
                                           disabled[!email_enabled] {
                                        (t!("campaigns.send_btn", locale = locale))
                                    }
                                    " "
                                    button class="outline secondary"
                                           style="width: fit-content;"
                                           hx-post=(names::delete_campaign_url(campaign.id))
                                           hx-ext="json-enc"
                                           hx-target="main"
                                           hx-swap="innerHTML"
                                           hx-confirm=(t!("campaigns.delete_confirm", locale = locale)) {
                                        (t!("campaigns.delete_btn", locale = locale))
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn audience_label(audience: &str, locale: &str) -> Markup {
    html! {
        @match audience.strip_prefix(names::AUDIENCE_COURSE_PREFIX) {
            Some(public_id) => {
                (t!("campaigns.audience_course", locale = locale))
                " "
                (components::nav_link(
                    &names::course_page_url(public_id),
                    html! { code { (public_id) } },
                ))
            }
            None => { (t!("campaigns.audience_all", locale = locale)) }
        }
    }
}

pub enum CreateCampaignState {
    NoError,
    EmptyFields,
}

pub fn create_campaign_page(
    courses: &[CourseCard],
    state: CreateCampaignState,
    locale: &str,
) -> Markup {
    let error_msg = match state {
        CreateCampaignState::NoError => None,
        CreateCampaignState::EmptyFields => Some(t!("campaigns.empty_fields", locale = locale)),
    };

    html! {
        h1 { (t!("campaigns.create_title", locale = locale)) }
        article style="max-width: 48rem;" {
            form hx-post=(names::CREATE_CAMPAIGN_URL)
                 hx-ext="json-enc"
                 hx-target="main"
                 hx-swap="innerHTML" {
                label {
                    (t!("campaigns.subject", locale = locale))
                    @if let Some(ref msg) = error_msg {
                        input name="subject"
                              type="text"
                              required="true"
                              placeholder=(t!("campaigns.subject", locale = locale))
                              aria-invalid="true"
                              aria-label=(t!("campaigns.subject", locale = locale));
                        small { (msg) }
                    } @else {
                        input name="subject"
                              type="text"
                              required="true"
                              placeholder=(t!("campaigns.subject", locale = locale))
                              aria-label=(t!("campaigns.subject", locale = locale));
                    }
                }
                label {
                    (t!("campaigns.body", locale = locale))
                    textarea name="body_html"
                             rows="10"
                             required="true"
                             placeholder=(t!("campaigns.body_placeholder", locale = locale)) {}
                }
                label {
                    (t!("campaigns.audience", locale = locale))
                    select name="audience" {
                        option value=(names::AUDIENCE_ALL) {
                            (t!("campaigns.audience_all", locale = locale))
                        }
                        @for course in courses {
                            option value=(format!("{}{}", names::AUDIENCE_COURSE_PREFIX, course.public_id)) {
                                (t!("campaigns.audience_enrolled_in", locale = locale, title = &course.title))
                            }
                        }
                    }
                }
                button type="submit" { (t!("campaigns.create_btn", locale = locale)) }
            }
            p {
                (components::nav_link(
                    names::CAMPAIGNS_URL,
                    html! { (t!("campaigns.back_to_list", locale = locale)) },
                ))
            }
        }
    }
}
