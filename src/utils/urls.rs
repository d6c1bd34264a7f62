use url::{ParseError, Url};

pub fn to_url(host: String) -> Result<Url, ParseError> {
    Url::parse(&host)
}

/// Link target safe to place in an `href`: only absolute http(s) URLs pass,
/// everything else collapses to `#`.
pub fn safe_href(link: &str) -> String {
    match to_url(link.trim().to_string()) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => url.to_string(),
        _ => String::from("#"),
    }
}

/// Join the `/check` path onto a configured server base URL.
pub fn check_endpoint(base: &str) -> Result<Url, ParseError> {
    let mut base = to_url(base.to_string())?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join("check")
}

#[cfg(test)]
mod cfg_tests {
    use super::*;

    #[test]
    fn test_safe_href() {
        assert_eq!(
            safe_href("https://www.virustotal.com/gui/file/abc"),
            "https://www.virustotal.com/gui/file/abc"
        );
        assert_eq!(safe_href("http://localhost:5000/x"), "http://localhost:5000/x");
        assert_eq!(safe_href("javascript:alert(1)"), "#");
        assert_eq!(safe_href("data:text/html,<b>x</b>"), "#");
        assert_eq!(safe_href("/relative/path"), "#");
        assert_eq!(safe_href(""), "#");
    }

    #[test]
    fn test_check_endpoint() {
        assert_eq!(
            check_endpoint("http://127.0.0.1:5000").unwrap().as_str(),
            "http://127.0.0.1:5000/check"
        );
        assert_eq!(
            check_endpoint("https://canary.example/app").unwrap().as_str(),
            "https://canary.example/app/check"
        );
        assert_eq!(
            check_endpoint("https://canary.example/app/").unwrap().as_str(),
            "https://canary.example/app/check"
        );
        assert!(check_endpoint("not a url").is_err());
    }
}
