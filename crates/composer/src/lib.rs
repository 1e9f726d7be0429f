//! Post assembly: a user-edited draft into one self-contained HTML document.
//!
//! [`compose`] is pure and deterministic; identical drafts produce
//! byte-identical HTML. No state is retained between calls.

pub mod escape;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::escape::{escape_attr, escape_text};

/// User-editable working copy of a post. Text fields start from the
/// canonical record but may be freely overridden; the composer treats them
/// all as untrusted free text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostDraft {
    pub title: String,
    pub tagline: String,
    pub overview: String,
    pub release_date: String,
    pub runtime: String,
    pub rating: String,
    /// Comma-separated genre text; tokens become the post-labels line.
    pub genres: String,
    pub directors: String,
    pub writers: String,
    pub cast: String,
    pub companies: String,
    pub trailer_url: String,
    pub poster_url: String,
    pub download_links: Vec<DownloadLink>,
    /// Full gallery in canonical order.
    pub images: Vec<String>,
    /// Chosen subset of `images`. Output order follows `images`, not the
    /// selection order.
    pub selected_images: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DownloadLink {
    pub label: String,
    pub url: String,
}

/// A finished post. Produced fresh per call, never cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedPost {
    pub title: String,
    pub html: String,
}

/// Static inline stylesheet emitted at the top of every post.
const STYLE_BLOCK: &str = r#"<style>
  .post-wrap{font-family: Arial, Helvetica, sans-serif; color:#0b1220; line-height:1.45; padding:18px;}
  .post-header{display:flex;gap:18px;align-items:flex-start}
  .post-poster{width:220px;flex:0 0 220px}
  .post-poster img{width:220px;border-radius:8px;display:block}
  .post-main{flex:1}
  .post-title{font-size:28px;margin:0 0 6px}
  .post-tagline{color:#444;margin:0 0 12px}
  .post-meta{color:#555;font-size:13px;margin-bottom:12px}
  .genre-labels{margin-bottom:10px}
  .genre-labels .label{display:inline-block;background:#eef2ff;color:#3b2a86;padding:6px 8px;border-radius:8px;margin-right:6px;font-size:12px}
  .overview{margin:12px 0;color:#222}
  .download-buttons a{display:inline-block;background:#1f6feb;color:#fff;padding:10px 14px;border-radius:8px;text-decoration:none;margin:6px 6px 6px 0}
  .screenshot-gallery{display:flex;flex-wrap:wrap;gap:8px;margin-top:12px}
  .screenshot-gallery img{width:320px;border-radius:8px;display:block}
  .trailer-link{display:inline-block;margin-top:10px;color:#0b5ed7;text-decoration:none}
</style>"#;

/// Split the comma-separated genres field into trimmed, non-empty labels.
pub fn split_labels(genres: &str) -> Vec<String> {
    genres
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Render the draft into a publishable HTML document.
pub fn compose(draft: &PostDraft) -> GeneratedPost {
    let mut lines: Vec<String> = Vec::new();

    let labels = split_labels(&draft.genres);
    if !labels.is_empty() {
        let spans = labels
            .iter()
            .map(|l| format!("<span class=\"label\">{}</span>", escape_text(l)))
            .collect::<Vec<_>>()
            .join(" ");
        lines.push(format!(
            "<div class=\"genre-labels\"><b>Post Labels:</b> {spans}</div>"
        ));
    }

    if !draft.tagline.is_empty() {
        lines.push(format!(
            "<p class=\"post-tagline\">{}</p>",
            escape_text(&draft.tagline)
        ));
    }
    if !draft.overview.is_empty() {
        lines.push(format!(
            "<div class=\"overview\">{}</div>",
            escape_text(&draft.overview)
        ));
    }

    let mut meta = Vec::new();
    if !draft.release_date.is_empty() {
        meta.push(format!("<b>Release:</b> {}", escape_text(&draft.release_date)));
    }
    if !draft.runtime.is_empty() {
        meta.push(format!("<b>Runtime:</b> {}", escape_text(&draft.runtime)));
    }
    if !draft.rating.is_empty() {
        meta.push(format!("<b>Rating:</b> {}", escape_text(&draft.rating)));
    }
    if !meta.is_empty() {
        lines.push(format!("<div class=\"post-meta\">{}</div>", meta.join(" • ")));
    }

    for (heading, value) in [
        ("Director(s)", &draft.directors),
        ("Writer(s)", &draft.writers),
        ("Cast", &draft.cast),
        ("Production", &draft.companies),
    ] {
        if !value.is_empty() {
            lines.push(format!("<p><b>{heading}:</b> {}</p>", escape_text(value)));
        }
    }

    if !draft.trailer_url.is_empty() {
        lines.push(format!(
            "<p><a class=\"trailer-link\" href=\"{}\" target=\"_blank\">Watch Trailer</a></p>",
            escape_attr(&draft.trailer_url)
        ));
    }

    // Rows with an empty label or URL are dropped, not errors.
    let buttons = draft
        .download_links
        .iter()
        .filter(|dl| !dl.label.trim().is_empty() && !dl.url.trim().is_empty())
        .map(|dl| {
            format!(
                "<a href=\"{}\" rel=\"nofollow noopener\" target=\"_blank\">{}</a>",
                escape_attr(dl.url.trim()),
                escape_text(dl.label.trim())
            )
        })
        .collect::<Vec<_>>();
    if !buttons.is_empty() {
        lines.push(format!(
            "<div class=\"download-buttons\"><b>Download:</b><br/>{}</div>",
            buttons.join("")
        ));
    }

    // Gallery follows canonical image order; the selection is only a filter.
    let selected: HashSet<&str> = draft.selected_images.iter().map(String::as_str).collect();
    let shots = draft
        .images
        .iter()
        .filter(|url| selected.contains(url.as_str()))
        .map(|url| format!("<img src=\"{}\" alt=\"\" />", escape_attr(url)))
        .collect::<Vec<_>>();
    if !shots.is_empty() {
        lines.push(format!(
            "<div class=\"screenshot-gallery\">{}</div>",
            shots.join("")
        ));
    }

    let poster_cell = if draft.poster_url.is_empty() {
        String::new()
    } else {
        format!(
            "<img src=\"{}\" alt=\"{}\" />",
            escape_attr(&draft.poster_url),
            escape_text(&draft.title)
        )
    };

    let html = format!(
        "{STYLE_BLOCK}\n\
         <div class=\"post-wrap\">\n  \
         <div class=\"post-header\">\n    \
         <div class=\"post-poster\">{poster_cell}</div>\n    \
         <div class=\"post-main\">\n      \
         <h1 class=\"post-title\">{title}</h1>\n      \
         {body}\n    \
         </div>\n  \
         </div>\n\
         </div>",
        title = escape_text(&draft.title),
        body = lines.join("\n      "),
    );

    GeneratedPost {
        title: draft.title.clone(),
        html,
    }
}
