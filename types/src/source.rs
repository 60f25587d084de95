use html5ever::driver::{self, ParseOpts};
use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use scraper::{Html, Node, Selector};

use crate::error::FetchFailure;

/// Public CORS proxy; the encoded target URL is appended to it.
pub const DEFAULT_PROXY: &str = "https://api.allorigins.win/raw?url=";

/// Same unreserved set as JavaScript's `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Build the proxy request URL for `target`.
pub fn proxy_url(proxy: &str, target: &str) -> Result<String, FetchFailure> {
    let target = target.trim();
    if target.is_empty() {
        return Err(FetchFailure::InvalidUrl("empty url".to_string()));
    }
    Ok(format!("{proxy}{}", utf8_percent_encode(target, URI_COMPONENT)))
}

/// Concatenate every text node under `<body>`, in document order.
///
/// Mirrors DOM `textContent` on a `DOMParser` document: scripting is off, so
/// `<noscript>` holds ordinary markup, and `<template>` contents are left out.
/// Script and style text stay in, whitespace is left exactly as written.
pub fn html_to_text(html: &str) -> String {
    let opts = ParseOpts {
        tree_builder: TreeBuilderOpts {
            scripting_enabled: false,
            ..Default::default()
        },
        ..Default::default()
    };
    let doc = driver::parse_document(Html::new_document(), opts).one(html);
    let Ok(body) = Selector::parse("body") else {
        return String::new();
    };
    let Some(body) = doc.select(&body).next() else {
        return String::new();
    };
    body.descendants()
        .filter(|node| !node.ancestors().any(|a| is_template(a.value())))
        .filter_map(|node| node.value().as_text().map(|t| &**t))
        .collect()
}

fn is_template(node: &Node) -> bool {
    node.as_element().is_some_and(|el| el.name() == "template")
}

/// Strip a fetched page to text, failing when nothing but whitespace is left.
pub fn page_text(html: &str) -> Result<String, FetchFailure> {
    let text = html_to_text(html);
    if text.trim().is_empty() {
        return Err(FetchFailure::EmptyContent);
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proxy_url_encodes_like_uri_component() {
        let url = proxy_url(DEFAULT_PROXY, "https://truyenfull.vn/a b?c=1&d=(x)").unwrap();
        assert_eq!(
            url,
            "https://api.allorigins.win/raw?url=https%3A%2F%2Ftruyenfull.vn%2Fa%20b%3Fc%3D1%26d%3D(x)"
        );
    }

    #[test]
    fn proxy_url_encodes_non_ascii_as_utf8() {
        let url = proxy_url("http://p/?u=", "http://x/萧").unwrap();
        assert_eq!(url, "http://p/?u=http%3A%2F%2Fx%2F%E8%90%A7");
    }

    #[test]
    fn proxy_url_rejects_blank_target() {
        assert!(matches!(
            proxy_url(DEFAULT_PROXY, "   "),
            Err(FetchFailure::InvalidUrl(_))
        ));
    }

    #[test]
    fn body_text_only() {
        let html = "<html><head><title>Tiêu đề</title></head>\
                    <body><p>沈宜嘉=<b>Thẩm Nghi Gia</b></p></body></html>";
        assert_eq!(html_to_text(html), "沈宜嘉=Thẩm Nghi Gia");
    }

    #[test]
    fn whitespace_is_preserved() {
        let html = "<body><div>王林 = Vương Lâm</div>\n<div>李慕婉</div></body>";
        assert_eq!(html_to_text(html), "王林 = Vương Lâm\n李慕婉");
    }

    #[test]
    fn noscript_is_markup_and_template_is_hidden() {
        let html = "<body><p>王林</p><noscript><b>Vương Lâm</b></noscript>\
                    <template><p>李慕婉 Lý Mộ Uyển</p></template></body>";
        let text = html_to_text(html);
        assert_eq!(text, "王林Vương Lâm");
        assert_eq!(
            crate::extract(&text).as_slice(),
            &[crate::NamePair::new("王林", "Vương Lâm")]
        );
    }

    #[test]
    fn bare_text_lands_in_body() {
        assert_eq!(html_to_text("安康王 An Khang Vương"), "安康王 An Khang Vương");
    }

    #[test]
    fn blank_page_is_empty_content() {
        assert_eq!(
            page_text("<html><body>  \n </body></html>"),
            Err(FetchFailure::EmptyContent)
        );
        assert_eq!(page_text("<p>萧漾</p>").unwrap(), "萧漾");
    }
}
