//! Turns an article list into the view model the terminal draws.
//!
//! Rendering is a pure function of the list and the current time so the
//! placeholder and card rules can be exercised without a terminal.

use jiff::Timestamp;

use super::models::Article;
use crate::utils::datetime::format_relative;

pub const UNKNOWN_SOURCE: &str = "Unknown Source";
pub const UNKNOWN_DATE: &str = "unknown date";
pub const LOAD_ERROR_MESSAGE: &str = "Failed to load articles. Please try again.";

pub const BOOKMARKED_ICON: &str = "★";
pub const NOT_BOOKMARKED_ICON: &str = "☆";

/// Message shown in place of the article list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder {
    pub icon: &'static str,
    pub title: &'static str,
    pub hint: &'static str,
}

pub const NO_RESULTS: Placeholder = Placeholder {
    icon: "⌕",
    title: "No articles found",
    hint: "Try adjusting your search or filters",
};

pub const LOAD_FAILED: Placeholder = Placeholder {
    icon: "!",
    title: "Failed to load articles",
    hint: "Press r to refresh or try again later",
};

/// One rendered article.
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleCard {
    pub id: u32,
    pub title: String,
    pub url: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub source_label: String,
    pub time_label: String,
    pub bookmarked: bool,
}

impl ArticleCard {
    pub fn from_article(article: &Article, now: Timestamp) -> Self {
        let source_label = article
            .source
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(UNKNOWN_SOURCE)
            .to_string();

        let time_label = article
            .published_timestamp()
            .map(|ts| format_relative(ts, now))
            .unwrap_or_else(|| UNKNOWN_DATE.to_string());

        Self {
            id: article.id,
            title: article.title.clone(),
            url: article.url.clone(),
            description: article
                .description
                .as_deref()
                .filter(|d| !d.is_empty())
                .map(plain_text),
            image_url: article.image_url.clone().filter(|u| !u.is_empty()),
            source_label,
            time_label,
            bookmarked: article.is_bookmarked,
        }
    }

    pub fn bookmark_icon(&self) -> &'static str {
        if self.bookmarked {
            BOOKMARKED_ICON
        } else {
            NOT_BOOKMARKED_ICON
        }
    }

    /// Plain-text rendering of the card, one entry per line.
    pub fn text_lines(&self) -> Vec<String> {
        let mut lines = vec![format!("{} {}", self.bookmark_icon(), self.title)];
        if let Some(description) = &self.description {
            lines.push(description.clone());
        }
        let image = match self.image_url {
            Some(_) => " [img]",
            None => "",
        };
        lines.push(format!(
            "{} · {}{}",
            self.source_label, self.time_label, image
        ));
        lines
    }
}

/// What the article area currently shows.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ArticleListView {
    /// Nothing has been rendered yet.
    #[default]
    Pending,
    NoResults,
    LoadFailed,
    Cards(Vec<ArticleCard>),
}

impl ArticleListView {
    pub fn placeholder(&self) -> Option<Placeholder> {
        match self {
            Self::NoResults => Some(NO_RESULTS),
            Self::LoadFailed => Some(LOAD_FAILED),
            Self::Pending | Self::Cards(_) => None,
        }
    }

    pub fn cards(&self) -> &[ArticleCard] {
        match self {
            Self::Cards(cards) => cards,
            _ => &[],
        }
    }
}

/// Render a freshly fetched list, preserving server order.
pub fn render_articles(articles: Option<&[Article]>, now: Timestamp) -> ArticleListView {
    match articles {
        None | Some([]) => {
            tracing::debug!("no articles to render");
            ArticleListView::NoResults
        }
        Some(articles) => {
            tracing::debug!(count = articles.len(), "rendering articles");
            ArticleListView::Cards(
                articles
                    .iter()
                    .map(|a| ArticleCard::from_article(a, now))
                    .collect(),
            )
        }
    }
}

/// Strip markup from a backend description.
fn plain_text(html: &str) -> String {
    match html2text::from_read(html.as_bytes(), 1_000) {
        Ok(text) => text.trim().to_string(),
        Err(e) => {
            tracing::debug!(%e, "description is not convertible HTML, using raw text");
            html.trim().to_string()
        }
    }
}
