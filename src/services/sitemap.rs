use std::fmt::{self, Write};

use chrono::NaiveDateTime;
use sea_orm::ConnectionTrait;
use url::Url;

use crate::error::AppError;
use crate::services::catalog::{ArtistQuery, ArtworkQuery, EventQuery};

pub const STATIC_PAGES: [&str; 4] = ["/contact", "/termsofuse", "/privacy", "/termsofsale"];

#[derive(Clone, Debug, PartialEq)]
pub struct SitemapEntry {
    pub path: String,
    pub lastmod: Option<NaiveDateTime>,
    pub changefreq: &'static str,
    pub priority: f32,
}

impl SitemapEntry {
    fn weekly(path: String, lastmod: NaiveDateTime, priority: f32) -> Self {
        Self {
            path,
            lastmod: Some(lastmod),
            changefreq: "weekly",
            priority,
        }
    }
}

/// Static pages, then active artists, artworks and events.
pub async fn collect_entries<C: ConnectionTrait>(db: &C) -> Result<Vec<SitemapEntry>, AppError> {
    let mut entries: Vec<SitemapEntry> = STATIC_PAGES
        .iter()
        .map(|path| SitemapEntry {
            path: path.to_string(),
            lastmod: None,
            changefreq: "never",
            priority: 0.5,
        })
        .collect();

    for artist in ArtistQuery::new().active().orderly().all(db).await? {
        entries.push(SitemapEntry::weekly(
            format!("/artist/{}", artist.slug),
            artist.updated,
            0.75,
        ));
    }

    for (artwork, artist) in ArtworkQuery::new().active().orderly().all(db).await? {
        entries.push(SitemapEntry::weekly(
            format!("/artwork/{}/{}", artist.slug, artwork.slug),
            artwork.updated,
            1.0,
        ));
    }

    for event in EventQuery::new().active().all(db).await? {
        entries.push(SitemapEntry::weekly(format!("/event/{}", event.slug), event.updated, 0.5));
    }

    Ok(entries)
}

fn xml_escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

fn write_entry(xml: &mut String, location: &Url, entry: &SitemapEntry) -> fmt::Result {
    writeln!(xml, "  <url>")?;
    writeln!(xml, "    <loc>{}</loc>", xml_escape(location.as_str()))?;
    if let Some(lastmod) = entry.lastmod {
        writeln!(xml, "    <lastmod>{}</lastmod>", lastmod.format("%Y-%m-%d"))?;
    }
    writeln!(xml, "    <changefreq>{}</changefreq>", entry.changefreq)?;
    writeln!(xml, "    <priority>{:.2}</priority>", entry.priority)?;
    writeln!(xml, "  </url>")
}

/// Renders a `urlset` document with locations resolved against `site_url`.
pub fn render(site_url: &str, entries: &[SitemapEntry]) -> Result<String, AppError> {
    let base = Url::parse(site_url)
        .map_err(|e| AppError::InternalServerError(format!("Invalid site URL '{}': {}", site_url, e)))?;

    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );

    for entry in entries {
        let location = base
            .join(&entry.path)
            .map_err(|e| AppError::InternalServerError(format!("Invalid sitemap path '{}': {}", entry.path, e)))?;
        write_entry(&mut xml, &location, entry)
            .map_err(|e| AppError::InternalServerError(format!("Failed to render sitemap: {}", e)))?;
    }

    xml.push_str("</urlset>\n");
    Ok(xml)
}
