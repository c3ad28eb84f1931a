use axum::http::HeaderValue;
use color_eyre::Result;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build a session-style cookie header value. `Secure` is only set when the
/// server runs behind HTTPS, so local development over plain HTTP still works.
pub fn cookie(name: &str, value: &str, secure: bool) -> Result<HeaderValue> {
    let secure_attr = if secure { " Secure;" } else { "" };
    let cookie =
        format!("{name}={value}; HttpOnly; Max-Age=2592000;{secure_attr} Path=/; SameSite=Strict");
    Ok(HeaderValue::from_str(&cookie)?)
}

/// Build a cookie header value that expires the named cookie immediately.
pub fn clear_cookie(name: &str, secure: bool) -> Result<HeaderValue> {
    let secure_attr = if secure { " Secure;" } else { "" };
    let cookie = format!("{name}=; HttpOnly; Max-Age=0;{secure_attr} Path=/; SameSite=Strict");
    Ok(HeaderValue::from_str(&cookie)?)
}

/// Format a price in cents as dollars for display.
pub fn format_price(price_cents: i32) -> String {
    format!("${}.{:02}", price_cents / 100, price_cents % 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_omits_secure_for_plain_http() {
        let value = cookie("user_session", "abc", false).unwrap();
        let s = value.to_str().unwrap();
        assert!(!s.contains("Secure"), "plain-http cookie must not be Secure");
        assert!(s.contains("HttpOnly"));
    }

    #[test]
    fn cookie_sets_secure_for_https() {
        let value = cookie("user_session", "abc", true).unwrap();
        assert!(value.to_str().unwrap().contains("Secure"));
    }

    #[test]
    fn clear_cookie_expires_immediately() {
        let value = clear_cookie("user_session", false).unwrap();
        assert!(value.to_str().unwrap().contains("Max-Age=0"));
    }

    #[test]
    fn format_price_renders_cents() {
        assert_eq!(format_price(4999), "$49.99");
        assert_eq!(format_price(500), "$5.00");
        assert_eq!(format_price(100000), "$1000.00");
    }
}
