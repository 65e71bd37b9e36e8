use axum::http::{header, HeaderMap};

/// Read a cookie value from the `Cookie` request headers
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim_matches('"').to_string())
        .filter(|value| !value.is_empty())
}

/// Build a `Set-Cookie` value for an HttpOnly, path-wide cookie
pub fn build_cookie(name: &str, value: &str, max_age_secs: u64, secure: bool) -> String {
    let mut cookie = format!(
        "{}={}; Path=/; Max-Age={}; HttpOnly; SameSite=Lax",
        name, value, max_age_secs
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Build a `Set-Cookie` value that removes the cookie on the client
pub fn expire_cookie(name: &str, secure: bool) -> String {
    build_cookie(name, "", 0, secure)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_read_cookie_among_several() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; kampus_session=abc123; lang=id"),
        );

        assert_eq!(
            read_cookie(&headers, "kampus_session").as_deref(),
            Some("abc123")
        );
        assert_eq!(read_cookie(&headers, "lang").as_deref(), Some("id"));
        assert!(read_cookie(&headers, "missing").is_none());
    }

    #[test]
    fn test_read_cookie_ignores_empty_value() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("kampus_session="));

        assert!(read_cookie(&headers, "kampus_session").is_none());
    }

    #[test]
    fn test_build_and_expire_cookie() {
        let cookie = build_cookie("kampus_session", "tok", 60, true);
        assert_eq!(
            cookie,
            "kampus_session=tok; Path=/; Max-Age=60; HttpOnly; SameSite=Lax; Secure"
        );

        let expired = expire_cookie("kampus_session", false);
        assert!(expired.starts_with("kampus_session=; Path=/; Max-Age=0"));
        assert!(!expired.contains("Secure"));
    }
}
