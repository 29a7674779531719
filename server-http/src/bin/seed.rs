//! Development database seeder.
//!
//! Fills the configured database with a deterministic sample catalog:
//! 10 artists, 3 albums per artist, and 100 songs spread across the albums.
//! Rows go through the same repositories the server uses, so everything
//! inserted here passes the domain validation. Existing rows are kept.

use anyhow::{Context, Result};
use core_catalog::db::create_pool;
use core_catalog::models::{NewAlbum, NewArtist, NewSong};
use core_catalog::repositories::{
    AlbumRepository, ArtistRepository, SongRepository, SqliteAlbumRepository,
    SqliteArtistRepository, SqliteSongRepository,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use server_http::ServerConfig;
use tracing::info;
use tracing_subscriber::filter::EnvFilter;

const ARTIST_COUNT: usize = 10;
const ALBUMS_PER_ARTIST: usize = 3;
const SONG_COUNT: usize = 100;

const ARTIST_GENRES: &[&str] = &["Hip-Hop", "Rock", "Pop", "Jazz", "Classical", "RAP"];
const ALBUM_GENRES: &[&str] = &["Hip-Hop", "Rock", "Pop", "Jazz", "Classical"];

const FIRST_NAMES: &[&str] = &[
    "Alma", "Bruno", "Carmen", "Dexter", "Elena", "Felix", "Greta", "Hugo", "Irene", "Jonas",
    "Klara", "Louis", "Mara", "Nico", "Opal", "Pascal", "Quinn", "Rosa", "Silas", "Tessa",
];

const LAST_NAMES: &[&str] = &[
    "Alvarez", "Brandt", "Castellano", "Duval", "Eriksen", "Fontaine", "Graves", "Holloway",
    "Ivanov", "Jansen", "Keller", "Lindqvist", "Moreau", "Novak", "Okafor", "Petrov", "Quintero",
    "Rossi", "Sandoval", "Takahashi",
];

const COUNTRIES: &[&str] = &[
    "USA", "UK", "Canada", "Germany", "France", "Sweden", "Japan", "Brazil", "Australia",
    "Nigeria",
];

const TITLE_WORDS: &[&str] = &[
    "Midnight", "River", "Golden", "Thunder", "Echo", "Velvet", "Neon", "Winter", "Crimson",
    "Hollow", "Silver", "Wild", "Paper", "Static", "Lantern", "Harbor", "Ivory", "Monsoon",
    "Cobalt", "Ember", "Garden", "Mirror", "Saturn", "Quiet", "Electric",
];

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = ServerConfig::from_env();
    let pool = create_pool(config.database_config())
        .await
        .context("failed to open the catalog database")?;

    // Fixed seed keeps the sample data identical between runs.
    let mut rng = StdRng::seed_from_u64(20240217);

    let artists = SqliteArtistRepository::new(pool.clone());
    let albums = SqliteAlbumRepository::new(pool.clone());
    let songs = SqliteSongRepository::new(pool.clone());

    let mut album_ids = Vec::with_capacity(ARTIST_COUNT * ALBUMS_PER_ARTIST);

    for _ in 0..ARTIST_COUNT {
        let artist = artists.create(random_artist(&mut rng)).await?;

        for _ in 0..ALBUMS_PER_ARTIST {
            let album = albums.create(random_album(&mut rng, artist.id)).await?;
            album_ids.push(album.id);
        }
    }

    for _ in 0..SONG_COUNT {
        let album_id = album_ids[rng.gen_range(0..album_ids.len())];
        songs.create(random_song(&mut rng, album_id)).await?;
    }

    info!(
        artists = ARTIST_COUNT,
        albums = album_ids.len(),
        songs = SONG_COUNT,
        "Seed data inserted"
    );

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("seed=info,core_catalog=info,sqlx=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn random_artist(rng: &mut StdRng) -> NewArtist {
    NewArtist {
        name: format!("{} {}", pick(rng, FIRST_NAMES), pick(rng, LAST_NAMES)),
        genre: pick(rng, ARTIST_GENRES).to_string(),
        country: pick(rng, COUNTRIES).to_string(),
    }
}

fn random_album(rng: &mut StdRng, artist_id: i64) -> NewAlbum {
    NewAlbum {
        title: random_title(rng, 3),
        genre: pick(rng, ALBUM_GENRES).to_string(),
        release_date: random_release_date(rng),
        artist_id,
    }
}

fn random_song(rng: &mut StdRng, album_id: i64) -> NewSong {
    NewSong {
        title: random_title(rng, 2),
        duration: rng.gen_range(120..=400),
        album_id,
    }
}

fn random_title(rng: &mut StdRng, words: usize) -> String {
    let mut parts = Vec::with_capacity(words);
    for _ in 0..words {
        parts.push(pick(rng, TITLE_WORDS));
    }
    parts.join(" ")
}

/// Day stays at 28 or below so every generated date is valid.
fn random_release_date(rng: &mut StdRng) -> String {
    let year = rng.gen_range(1960..=2023);
    let month = rng.gen_range(1..=12);
    let day = rng.gen_range(1..=28);
    format!("{year:04}-{month:02}-{day:02}")
}

fn pick<'a>(rng: &mut StdRng, items: &'a [&'a str]) -> &'a str {
    items[rng.gen_range(0..items.len())]
}
