use crate::utils::error::{EtlError, Result};
use regex::Regex;
use scraper::{Html, Selector};
use std::collections::BTreeSet;
use std::sync::OnceLock;

fn art_query_pattern() -> &'static Regex {
    static ART_QUERY: OnceLock<Regex> = OnceLock::new();
    ART_QUERY.get_or_init(|| Regex::new(r"(?:^|[?&])art=([0-9]+)(?:&|$)").expect("valid art pattern"))
}

/// 從 ajax.php 回傳的 HTML 片段找出所有 `<a href="...art=####">`，回傳排序後不重複的 art ID
pub fn extract_art_ids(html_text: &str) -> Result<Vec<i64>> {
    let selector = Selector::parse("a[href]").map_err(|e| EtlError::ProcessingError {
        message: format!("invalid link selector: {:?}", e),
    })?;

    let fragment = Html::parse_fragment(html_text);
    let arts: BTreeSet<i64> = fragment
        .select(&selector)
        .filter_map(|link| link.value().attr("href"))
        .filter_map(art_id_from_href)
        .collect();

    Ok(arts.into_iter().collect())
}

fn art_id_from_href(href: &str) -> Option<i64> {
    let caps = art_query_pattern().captures(href)?;
    caps[1].parse().ok()
}
