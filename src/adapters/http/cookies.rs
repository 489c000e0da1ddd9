//! Session and redirect cookies.
//!
//! Both cookies are `HttpOnly; Secure; SameSite=Lax` on `Path=/`. The
//! session cookie holds the auth provider's access token verbatim; it is only
//! ever forwarded to the provider, never decoded here.

use axum::http::{header, HeaderMap, HeaderValue};

pub const SESSION_COOKIE: &str = "tamm_session";
pub const REDIRECT_COOKIE: &str = "tamm_redirect";

/// 30 days.
pub const SESSION_MAX_AGE_SECS: u64 = 2_592_000;
/// 10 minutes, long enough to open the magic-link email.
pub const REDIRECT_MAX_AGE_SECS: u64 = 600;

const ATTRIBUTES: &str = "Path=/; HttpOnly; Secure; SameSite=Lax";

fn set_cookie(name: &str, value: &str, max_age: u64) -> String {
    format!("{name}={value}; {ATTRIBUTES}; Max-Age={max_age}")
}

pub fn session_cookie(token: &str) -> String {
    set_cookie(SESSION_COOKIE, token, SESSION_MAX_AGE_SECS)
}

pub fn redirect_cookie(signed_value: &str) -> String {
    set_cookie(REDIRECT_COOKIE, signed_value, REDIRECT_MAX_AGE_SECS)
}

/// Expires `name` immediately.
pub fn clear_cookie(name: &str) -> String {
    set_cookie(name, "", 0)
}

/// Convert a `Set-Cookie` string into a header value.
///
/// Tokens come from the auth provider; anything that is not a valid header
/// value is dropped rather than echoed.
pub fn header_value(cookie: String) -> Option<HeaderValue> {
    HeaderValue::from_str(&cookie).ok()
}

/// Value of cookie `name` across all `Cookie` headers. Empty values count as
/// absent.
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(cookies: &[&str]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for cookie in cookies {
            map.append(header::COOKIE, HeaderValue::from_str(cookie).unwrap());
        }
        map
    }

    #[test]
    fn session_cookie_has_thirty_day_lifetime() {
        assert_eq!(
            session_cookie("abc"),
            "tamm_session=abc; Path=/; HttpOnly; Secure; SameSite=Lax; Max-Age=2592000"
        );
    }

    #[test]
    fn redirect_cookie_lives_ten_minutes() {
        assert!(redirect_cookie("x.y").ends_with("Max-Age=600"));
    }

    #[test]
    fn cleared_cookie_is_empty_with_zero_max_age() {
        assert_eq!(
            clear_cookie(REDIRECT_COOKIE),
            "tamm_redirect=; Path=/; HttpOnly; Secure; SameSite=Lax; Max-Age=0"
        );
    }

    #[test]
    fn reads_named_cookie_among_others() {
        let map = headers(&["theme=dark; tamm_session=tok-123; other=1"]);
        assert_eq!(read_cookie(&map, SESSION_COOKIE), Some("tok-123".to_string()));
    }

    #[test]
    fn reads_cookie_from_second_header() {
        let map = headers(&["theme=dark", "tamm_redirect=%2Fa.abc"]);
        assert_eq!(read_cookie(&map, REDIRECT_COOKIE), Some("%2Fa.abc".to_string()));
    }

    #[test]
    fn does_not_match_cookie_name_suffix() {
        let map = headers(&["xtamm_session=nope"]);
        assert_eq!(read_cookie(&map, SESSION_COOKIE), None);
    }

    #[test]
    fn empty_cookie_is_absent() {
        let map = headers(&["tamm_session="]);
        assert_eq!(read_cookie(&map, SESSION_COOKIE), None);
        assert_eq!(read_cookie(&HeaderMap::new(), SESSION_COOKIE), None);
    }
}
