pub mod artist;
pub mod artist_ratchet;
pub mod artwork;
pub mod artwork_ratchet;
pub mod event;
pub mod event_artist;
pub mod event_ratchet;
pub mod genre;
