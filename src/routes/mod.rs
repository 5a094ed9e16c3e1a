pub mod admin;
mod artists;
mod artworks;
mod events;
mod genres;
mod home;
mod menu;
mod search;
mod sitemap;
pub mod views;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::middleware::auth::require_admin;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        // Gallery
        home::root,
        artists::artist_detail,
        artists::artists_by_category,
        artworks::artwork_detail,
        artworks::artworks_by_category,
        genres::learn,
        search::search,
        menu::menu,
        sitemap::sitemap_xml,
        // Events
        events::event_detail,
        events::list_events,
        // Back office
        admin::artists::create_artist,
        admin::artists::list_artists,
        admin::artists::get_artist,
        admin::artists::update_artist,
        admin::artists::delete_artist,
        admin::artists::upload_biography,
        admin::genres::create_genre,
        admin::genres::list_genres,
        admin::genres::get_genre,
        admin::genres::update_genre,
        admin::genres::delete_genre,
        admin::artworks::create_artwork,
        admin::artworks::list_artworks,
        admin::artworks::get_artwork,
        admin::artworks::update_artwork,
        admin::artworks::delete_artwork,
        admin::events::create_event,
        admin::events::list_events,
        admin::events::get_event,
        admin::events::update_event,
        admin::events::delete_event,
        admin::events::upload_event_image,
    ),
    components(
        schemas(
            views::ArtistSummary,
            views::ArtistView,
            views::ArtworkView,
            views::Dimensions,
            views::GenreLink,
            views::GenreView,
            views::EventView,
            home::HomeResponse,
            artists::ArtistPage,
            artists::ArtistsPage,
            artworks::ArtworkPage,
            artworks::ArtworksPage,
            search::SearchResults,
            menu::MenuResponse,
            menu::GenreArtists,
            admin::artists::CreateArtistRequest,
            admin::artists::UpdateArtistRequest,
            admin::artists::AdminArtistResponse,
            admin::genres::CreateGenreRequest,
            admin::genres::UpdateGenreRequest,
            admin::genres::AdminGenreResponse,
            admin::artworks::CreateArtworkRequest,
            admin::artworks::UpdateArtworkRequest,
            admin::artworks::AdminArtworkResponse,
            admin::events::CreateEventRequest,
            admin::events::UpdateEventRequest,
            admin::events::AdminEventResponse,
            crate::entities::artwork::StyleClass,
            crate::entities::artwork::Unit,
            crate::entities::artwork::Status,
        )
    ),
    tags(
        (name = "Gallery", description = "Public catalog pages"),
        (name = "Events", description = "Exhibitions and other gallery events"),
        (name = "Back Office", description = "Catalog maintenance (admin token required)")
    ),
    info(
        title = "GalleryKit API",
        version = "0.1.0",
        description = "Catalog service for an art gallery: artists, artworks, genres and events",
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::Http::new(
                        utoipa::openapi::security::HttpAuthScheme::Bearer,
                    ),
                ),
            );
        }
    }
}

pub fn create_routes(state: AppState) -> Router {
    let swagger_router: Router = SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
        .into();

    // Admin routes require a bearer token
    let admin_routes = Router::new()
        .route(
            "/artists",
            get(admin::artists::list_artists).post(admin::artists::create_artist),
        )
        .route(
            "/artists/{id}",
            get(admin::artists::get_artist)
                .put(admin::artists::update_artist)
                .delete(admin::artists::delete_artist),
        )
        .route("/artists/{id}/biography", post(admin::artists::upload_biography))
        .route(
            "/genres",
            get(admin::genres::list_genres).post(admin::genres::create_genre),
        )
        .route(
            "/genres/{id}",
            get(admin::genres::get_genre)
                .put(admin::genres::update_genre)
                .delete(admin::genres::delete_genre),
        )
        .route(
            "/artworks",
            get(admin::artworks::list_artworks).post(admin::artworks::create_artwork),
        )
        .route(
            "/artworks/{id}",
            get(admin::artworks::get_artwork)
                .put(admin::artworks::update_artwork)
                .delete(admin::artworks::delete_artwork),
        )
        .route(
            "/events",
            get(admin::events::list_events).post(admin::events::create_event),
        )
        .route(
            "/events/{id}",
            get(admin::events::get_event)
                .put(admin::events::update_event)
                .delete(admin::events::delete_event),
        )
        .route("/events/{id}/image", post(admin::events::upload_event_image))
        .layer(middleware::from_fn_with_state(state.clone(), require_admin));

    // Public catalog
    let app_routes = Router::new()
        .route("/", get(home::root))
        .route("/artist/{slug}", get(artists::artist_detail))
        .route("/artists/{category}", get(artists::artists_by_category))
        .route("/artwork/{artist_slug}/{slug}", get(artworks::artwork_detail))
        .route("/artworks/{category}", get(artworks::artworks_by_category))
        .route("/learn/{slug}", get(genres::learn))
        .route("/event/{slug}", get(events::event_detail))
        .route("/events", get(events::list_events))
        .route("/search", get(search::search))
        .route("/menu", get(menu::menu))
        .route("/sitemap.xml", get(sitemap::sitemap_xml))
        .nest("/admin", admin_routes)
        .with_state(state);

    Router::new().merge(swagger_router).merge(app_routes)
}
