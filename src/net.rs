//! Fetch plumbing shared by the AJAX endpoints, plus the CSRF cookie read.
//!
//! All helpers return `Result<_, String>`; callers log and surface a toast.
//! There is no retry or timeout; a hung request simply never resolves.

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{FormData, Request, RequestInit, Response};

pub const CSRF_COOKIE: &str = "csrftoken";

/// Status + body of a completed request. `ok` mirrors `Response.ok`.
#[derive(Clone, Debug)]
pub struct HttpReply {
    pub ok: bool,
    pub status: u16,
    pub body: String,
}

/// Find a cookie value in a `document.cookie` string.
pub fn parse_cookie(cookies: &str, name: &str) -> Option<String> {
    cookies.split(';').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        if key.trim() == name {
            Some(value.trim().to_string())
        } else {
            None
        }
    })
}

/// CSRF token from the `csrftoken` cookie, if the server set one.
pub fn csrf_token() -> Option<String> {
    let document = web_sys::window()?.document()?;
    let html_doc: web_sys::HtmlDocument = document.dyn_into().ok()?;
    let cookies = html_doc.cookie().ok()?;
    parse_cookie(&cookies, CSRF_COOKIE)
}

async fn response_reply(resp_value: wasm_bindgen::JsValue) -> Result<HttpReply, String> {
    let resp: Response = resp_value
        .dyn_into()
        .map_err(|_| "Response cast failed".to_string())?;
    let text = JsFuture::from(resp.text().map_err(|e| format!("{e:?}"))?)
        .await
        .map_err(|e| format!("text: {e:?}"))?;
    Ok(HttpReply {
        ok: resp.ok(),
        status: resp.status(),
        body: text.as_string().unwrap_or_default(),
    })
}

/// GET a JSON endpoint, returning the raw body for the caller to parse.
pub async fn get(url: &str) -> Result<HttpReply, String> {
    let window = web_sys::window().ok_or("No window")?;
    let resp_value = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| format!("fetch error: {e:?}"))?;
    response_reply(resp_value).await
}

/// POST multipart form data with the `X-Requested-With` marker the server
/// uses to pick JSON responses. `with_csrf` additionally attaches the
/// `X-CSRFToken` header when the cookie is present.
pub async fn post_form(url: &str, form: &FormData, with_csrf: bool) -> Result<HttpReply, String> {
    let window = web_sys::window().ok_or("No window")?;

    let init = RequestInit::new();
    init.set_method("POST");
    init.set_body(form);

    let request = Request::new_with_str_and_init(url, &init)
        .map_err(|e| format!("request build: {e:?}"))?;
    let headers = request.headers();
    headers
        .set("X-Requested-With", "XMLHttpRequest")
        .map_err(|e| format!("header: {e:?}"))?;
    if with_csrf {
        if let Some(token) = csrf_token() {
            headers
                .set("X-CSRFToken", &token)
                .map_err(|e| format!("header: {e:?}"))?;
        } else {
            log::warn!("CSRF cookie missing; posting without token");
        }
    }

    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| format!("fetch error: {e:?}"))?;
    response_reply(resp_value).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_cookie_among_others() {
        let cookies = "sessionid=abc123; csrftoken=tok456; theme=dark";
        assert_eq!(parse_cookie(cookies, "csrftoken").as_deref(), Some("tok456"));
    }

    #[test]
    fn handles_leading_whitespace_and_absence() {
        assert_eq!(parse_cookie(" csrftoken=x", "csrftoken").as_deref(), Some("x"));
        assert_eq!(parse_cookie("sessionid=abc", "csrftoken"), None);
        assert_eq!(parse_cookie("", "csrftoken"), None);
    }

    #[test]
    fn value_may_contain_equals() {
        assert_eq!(
            parse_cookie("csrftoken=a=b", "csrftoken").as_deref(),
            Some("a=b")
        );
    }

    #[test]
    fn name_must_match_exactly() {
        assert_eq!(parse_cookie("xcsrftoken=1; csrftokenx=2", "csrftoken"), None);
    }
}
