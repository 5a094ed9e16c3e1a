mod common;

use common::{artist, artwork, genre, new_artwork, older_artist, representative, setup};
use gallery_kit::entities::genre::CONTEMPORARY;
use gallery_kit::services::catalog::{ArtistQuery, ArtworkQuery, Bucket, GenreQuery};
use gallery_kit::services::listing::{artworks_by_artist, representative_artworks, Category};
use gallery_kit::services::search::{search_artists, search_artworks};
use gallery_kit::services::sitemap::{collect_entries, render};
use gallery_kit::tracking::Tracked;

fn titles(rows: &[(gallery_kit::entities::artwork::Model, gallery_kit::entities::artist::Model)]) -> Vec<&str> {
    rows.iter().map(|(work, _)| work.title.as_str()).collect()
}

#[tokio::test]
async fn quoted_phrases_match_whole() {
    let app = setup().await;
    let jane = artist(&app, "Jane", "Doe").await;
    let contemporary = genre(&app, CONTEMPORARY).await;
    artwork(&app, &jane, &contemporary, "Abstract Art Study").await;
    artwork(&app, &jane, &contemporary, "Art of the Abstract").await;
    artwork(&app, &jane, &contemporary, "Harvest").await;

    let phrase = search_artworks(&app.state.db, r#""abstract art""#).await.unwrap();
    assert_eq!(titles(&phrase), vec!["Abstract Art Study"]);

    let mut terms = titles(&search_artworks(&app.state.db, "ABSTRACT art").await.unwrap())
        .into_iter()
        .map(str::to_string)
        .collect::<Vec<_>>();
    terms.sort();
    assert_eq!(terms, vec!["Abstract Art Study", "Art of the Abstract"]);

    assert!(search_artworks(&app.state.db, "   ").await.unwrap().is_empty());
}

#[tokio::test]
async fn artwork_search_covers_genre_and_medium() {
    let app = setup().await;
    let jane = artist(&app, "Jane", "Doe").await;
    let madhubani = genre(&app, "Madhubani").await;
    let mut piece = new_artwork(&jane, &madhubani, "Harvest");
    piece.medium_description = "Natural dyes on handmade paper".to_string();
    app.store().save(Tracked::new(piece)).await.unwrap();

    let by_genre = search_artworks(&app.state.db, "madhu").await.unwrap();
    assert_eq!(titles(&by_genre), vec!["Harvest"]);

    let by_medium = search_artworks(&app.state.db, "handmade dyes").await.unwrap();
    assert_eq!(titles(&by_medium), vec!["Harvest"]);

    assert!(search_artworks(&app.state.db, "harvest canvas").await.unwrap().is_empty());
}

#[tokio::test]
async fn inactive_artworks_are_not_found() {
    let app = setup().await;
    let jane = artist(&app, "Jane", "Doe").await;
    let contemporary = genre(&app, CONTEMPORARY).await;
    let mut hidden = new_artwork(&jane, &contemporary, "Hidden Garden");
    hidden.is_active = false;
    app.store().save(Tracked::new(hidden)).await.unwrap();

    assert!(search_artworks(&app.state.db, "garden").await.unwrap().is_empty());
}

#[tokio::test]
async fn like_wildcards_are_literal() {
    let app = setup().await;
    let contemporary = genre(&app, CONTEMPORARY).await;
    let jane = artist(&app, "Jane", "Doe").await;
    artwork(&app, &jane, &contemporary, "Harvest").await;

    assert!(search_artworks(&app.state.db, "%").await.unwrap().is_empty());
    assert!(search_artworks(&app.state.db, "h_rvest").await.unwrap().is_empty());
}

#[tokio::test]
async fn artist_search_is_case_insensitive() {
    let app = setup().await;
    artist(&app, "Jane", "Doe").await;
    artist(&app, "Ravi", "Varma").await;

    let found = search_artists(&app.state.db, "jANE").await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].slug, "jane-doe-001");

    assert!(search_artists(&app.state.db, "jane varma").await.unwrap().is_empty());
}

#[tokio::test]
async fn artworks_are_bucketed_by_genre() {
    let app = setup().await;
    let jane = artist(&app, "Jane", "Doe").await;
    let contemporary = genre(&app, CONTEMPORARY).await;
    let madhubani = genre(&app, "Madhubani").await;
    artwork(&app, &jane, &contemporary, "Neon City").await;
    artwork(&app, &jane, &madhubani, "Fish Pond").await;

    let modern = ArtworkQuery::new().contemporary().all(&app.state.db).await.unwrap();
    assert_eq!(titles(&modern), vec!["Neon City"]);

    let classic = ArtworkQuery::new().traditional().all(&app.state.db).await.unwrap();
    assert_eq!(titles(&classic), vec!["Fish Pond"]);

    let by_name = ArtworkQuery::new().genre("Madhubani").all(&app.state.db).await.unwrap();
    assert_eq!(titles(&by_name), vec!["Fish Pond"]);

    let traditional_genres = GenreQuery::new().bucket(Bucket::Traditional).all(&app.state.db).await.unwrap();
    assert_eq!(traditional_genres.len(), 1);
    assert_eq!(traditional_genres[0].slug, "madhubani");
}

#[tokio::test]
async fn ordered_by_artist_then_name() {
    let app = setup().await;
    let varma = artist(&app, "Ravi", "Varma").await;
    let doe = artist(&app, "Jane", "Doe").await;
    let contemporary = genre(&app, CONTEMPORARY).await;
    artwork(&app, &varma, &contemporary, "Alpha").await;
    artwork(&app, &doe, &contemporary, "Zeta").await;
    artwork(&app, &doe, &contemporary, "Beta").await;

    let rows = ArtworkQuery::new().orderly().all(&app.state.db).await.unwrap();
    assert_eq!(titles(&rows), vec!["Beta", "Zeta", "Alpha"]);

    let distinct = ArtworkQuery::new().orderly().distinctly().all(&app.state.db).await.unwrap();
    let artists: Vec<_> = distinct.iter().map(|(_, artist)| artist.slug.as_str()).collect();
    assert_eq!(artists, vec!["jane-doe-001", "ravi-varma-001"]);
}

#[tokio::test]
async fn recent_filters_on_creation_time() {
    let app = setup().await;
    artist(&app, "Jane", "Doe").await;
    older_artist(&app, "Ravi", "Varma", 90).await;

    let recent = ArtistQuery::new().recent(30).all(&app.state.db).await.unwrap();
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].first_name, "Jane");
}

#[tokio::test]
async fn representative_listing_skips_inactive_artists() {
    let app = setup().await;
    let jane = artist(&app, "Jane", "Doe").await;
    let ravi = artist(&app, "Ravi", "Varma").await;
    let contemporary = genre(&app, CONTEMPORARY).await;
    let madhubani = genre(&app, "Madhubani").await;
    representative(&app, &jane, &contemporary, "Neon City").await;
    representative(&app, &ravi, &madhubani, "Fish Pond").await;
    artwork(&app, &ravi, &madhubani, "River Song").await;

    let all = representative_artworks(&app.state.db, Category::All, 30).await.unwrap();
    assert_eq!(titles(&all), vec!["Neon City", "Fish Pond"]);

    let traditional = representative_artworks(&app.state.db, Category::Traditional, 30).await.unwrap();
    assert_eq!(titles(&traditional), vec!["Fish Pond"]);

    let mut retired = Tracked::loaded(ravi);
    retired.is_active = false;
    app.store().save(retired).await.unwrap();

    let all = representative_artworks(&app.state.db, Category::All, 30).await.unwrap();
    assert_eq!(titles(&all), vec!["Neon City"]);
}

#[tokio::test]
async fn artworks_by_artist_keeps_each_artist_together() {
    let app = setup().await;
    let jane = artist(&app, "Jane", "Doe").await;
    let ravi = artist(&app, "Ravi", "Varma").await;
    let contemporary = genre(&app, CONTEMPORARY).await;
    let madhubani = genre(&app, "Madhubani").await;
    artwork(&app, &jane, &contemporary, "Neon City").await;
    artwork(&app, &jane, &contemporary, "Glass Tower").await;
    artwork(&app, &ravi, &madhubani, "Fish Pond").await;

    let rows = artworks_by_artist(&app.state.db, Category::All, 30).await.unwrap();
    assert_eq!(rows.len(), 3);
    // Contemporary artists lead the interleave.
    assert_eq!(rows[0].1.slug, "jane-doe-001");
    assert_eq!(rows[1].1.slug, "jane-doe-001");
    assert_eq!(rows[2].1.slug, "ravi-varma-001");

    let traditional = artworks_by_artist(&app.state.db, Category::Traditional, 30).await.unwrap();
    assert_eq!(titles(&traditional), vec!["Fish Pond"]);
}

#[tokio::test]
async fn sitemap_lists_catalog_pages() {
    let app = setup().await;
    let jane = artist(&app, "Jane", "Doe").await;
    let contemporary = genre(&app, CONTEMPORARY).await;
    artwork(&app, &jane, &contemporary, "Neon City").await;

    let entries = collect_entries(&app.state.db).await.unwrap();
    let xml = render("https://gallery.example", &entries).unwrap();

    assert!(xml.contains("<loc>https://gallery.example/contact</loc>"), "{xml}");
    assert!(xml.contains("<loc>https://gallery.example/artist/jane-doe-001</loc>"), "{xml}");
    assert!(
        xml.contains("<loc>https://gallery.example/artwork/jane-doe-001/neon-city-001</loc>"),
        "{xml}"
    );
}
