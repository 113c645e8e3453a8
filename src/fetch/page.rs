// src/fetch/page.rs
// =============================================================================
// This module extracts profile data from a profile page's HTML.
//
// What we read:
// - Header card: the name and the profile photo
// - Background section: title, company, location and school. The section is
//   rendered as "label" / "value" lines, so each value is the line right
//   after its label.
// - "People also viewed": links to related profiles. Every one of them is a
//   reference; only some become profiles to visit next (see below).
//
// Any element we cannot find becomes None. A page that is missing everything
// still produces a FetchedPage, just an empty one.
//
// Rust concepts:
// - Iterators: chaining select/filter/map over the parsed DOM
// - Option combinators: or_else/and_then instead of nested matches
// =============================================================================

use super::{ExpansionRequest, FetchedPage};
use crate::profile::{extract_id, ProfileDetails};
use scraper::{ElementRef, Html, Selector};
use std::collections::BTreeSet;

const RELATED_HEADING: &str = "people also viewed";

// Parses a profile page
//
// Parameters:
//   html: the page source
//   own_id: identifier of the profile the page belongs to (never picked to
//           visit next)
//   expansion: whether (and how many) related profiles to pick for the next
//              crawl level
//
// Picking rules, in page order:
//   - premium profiles are skipped (they cannot be scraped) but still count
//     as references
//   - already visited profiles are skipped and do not use up the cap
//   - stop once `cap` profiles are picked
pub fn parse_profile_page(
    html: &str,
    own_id: &str,
    expansion: Option<ExpansionRequest<'_>>,
) -> FetchedPage {
    let document = Html::parse_document(html);

    let (name, picture) = header_info(&document);
    let background = background_lines(&document);

    let details = ProfileDetails {
        name,
        picture,
        title: value_after(&background, "Title").or_else(|| value_after(&background, "Experience")),
        company: value_after(&background, "Company Name"),
        location: value_after(&background, "Location"),
        school: value_after(&background, "Education"),
    };

    let Some(related) = related_profiles(&document) else {
        return FetchedPage {
            details,
            ..Default::default()
        };
    };

    let references: BTreeSet<String> = related.iter().map(|r| r.id.clone()).collect();

    let expansion = expansion.map(|request| {
        let mut picked: Vec<String> = Vec::new();
        for profile in &related {
            if picked.len() >= request.cap {
                break;
            }
            if profile.premium
                || profile.id == own_id
                || request.visited.contains(&profile.id)
                || picked.contains(&profile.id)
            {
                continue;
            }
            picked.push(profile.id.clone());
        }
        picked
    });

    FetchedPage {
        details,
        references,
        expansion,
    }
}

// A profile listed in the related profiles section
#[derive(Debug)]
struct RelatedProfile {
    id: String,
    premium: bool,
}

// Reads the name and photo from the header card
fn header_info(document: &Html) -> (Option<String>, Option<String>) {
    // These selectors are constants, so unwrap() only fails on a typo here
    let header_selector = Selector::parse("section.pv-top-card").unwrap();
    let name_selector = Selector::parse("li.t-24").unwrap();
    let photo_selector = Selector::parse("img.pv-top-card__photo").unwrap();

    let Some(header) = document.select(&header_selector).next() else {
        return (None, None);
    };

    let name = header
        .select(&name_selector)
        .next()
        .map(element_text)
        .filter(|name| !name.is_empty());

    let picture = header
        .select(&photo_selector)
        .next()
        .and_then(|img| img.value().attr("src"))
        .map(str::to_string);

    (name, picture)
}

// Returns the background section as a list of non-empty text lines
fn background_lines(document: &Html) -> Vec<String> {
    let selector = Selector::parse("#oc-background-section").unwrap();

    match document.select(&selector).next() {
        Some(section) => section
            .text()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect(),
        None => Vec::new(),
    }
}

// Finds `label` among the lines and returns the line after it
fn value_after(lines: &[String], label: &str) -> Option<String> {
    lines
        .iter()
        .position(|line| line == label)
        .and_then(|i| lines.get(i + 1))
        .cloned()
}

// Lists the related profiles, or None if the page has no such section
fn related_profiles(document: &Html) -> Option<Vec<RelatedProfile>> {
    let heading_selector = Selector::parse("h2.t-16").unwrap();
    let member_selector = Selector::parse("li.pv-browsemap-section__member-container").unwrap();
    let link_selector = Selector::parse(r#"a[data-control-name="browsemap_profile"]"#).unwrap();
    let premium_selector = Selector::parse(".premium-icon").unwrap();

    let has_section = document
        .select(&heading_selector)
        .any(|h| element_text(h).to_lowercase() == RELATED_HEADING);
    if !has_section {
        return None;
    }

    let related = document
        .select(&member_selector)
        .filter_map(|member| member.select(&link_selector).next())
        .filter_map(|link| {
            let id = extract_id(link.value().attr("href")?)?;
            let premium = link.select(&premium_selector).next().is_some();
            Some(RelatedProfile { id, premium })
        })
        .collect();

    Some(related)
}

// Collects an element's text, trimmed
fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
