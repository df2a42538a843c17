//! Load stage: writes one transformed [`Dataset`] into PostgreSQL.
//!
//! Everything happens inside a single transaction in foreign-key order
//! (artists, albums, tracks, audio_features, listening_history). Dimension
//! tables are upserted so refreshed metadata wins; the listening_history
//! fact table only ever inserts, relying on its (track_id, played_at)
//! unique constraint to ignore replays of already-loaded events.

use sqlx::{Postgres, QueryBuilder, Transaction};

use crate::{
    config,
    error::{Error, Result},
    types::{AlbumRecord, ArtistRecord, AudioFeaturesRecord, Dataset, ListeningEvent, TrackRecord},
};

/// Rows written per table during one load, as reported by PostgreSQL.
///
/// For `listening_history` this is the number of genuinely new events;
/// conflicting replays count zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadReport {
    pub artists: u64,
    pub albums: u64,
    pub tracks: u64,
    pub audio_features: u64,
    pub listening_history: u64,
}

/// Loads the dataset in one transaction. Any failure rolls the whole run
/// back, so a partially loaded batch can never be observed.
pub async fn load(pool: &sqlx::PgPool, data: &Dataset) -> Result<LoadReport> {
    let batch_size = config::db_batch_size();
    let mut tx = pool.begin().await?;

    let artists = upsert_artists(&mut tx, &data.artists, batch_size).await?;
    let albums = upsert_albums(&mut tx, &data.albums, batch_size).await?;
    let tracks = upsert_tracks(&mut tx, &data.tracks, batch_size).await?;
    let audio_features = upsert_audio_features(&mut tx, &data.features, batch_size).await?;
    let listening_history = insert_events(&mut tx, &data.events, batch_size).await?;

    tx.commit().await?;

    Ok(LoadReport {
        artists,
        albums,
        tracks,
        audio_features,
        listening_history,
    })
}

async fn upsert_artists(
    tx: &mut Transaction<'_, Postgres>,
    rows: &[ArtistRecord],
    batch_size: usize,
) -> Result<u64> {
    let mut affected = 0;

    for chunk in rows.chunks(batch_size) {
        let mut qb = QueryBuilder::<Postgres>::new(
            "INSERT INTO artists (artist_id, name, genres, popularity, followers) ",
        );
        qb.push_values(chunk, |mut b, artist| {
            b.push_bind(&artist.id)
                .push_bind(&artist.name)
                .push_bind(&artist.genres)
                .push_bind(artist.popularity)
                .push_bind(artist.followers);
        });
        qb.push(
            r#" ON CONFLICT (artist_id) DO UPDATE SET
                name = EXCLUDED.name,
                genres = EXCLUDED.genres,
                popularity = EXCLUDED.popularity,
                followers = EXCLUDED.followers"#,
        );

        let result = qb
            .build()
            .execute(&mut **tx)
            .await
            .map_err(Error::from_db)?;
        affected += result.rows_affected();
    }

    Ok(affected)
}

async fn upsert_albums(
    tx: &mut Transaction<'_, Postgres>,
    rows: &[AlbumRecord],
    batch_size: usize,
) -> Result<u64> {
    let mut affected = 0;

    for chunk in rows.chunks(batch_size) {
        let mut qb = QueryBuilder::<Postgres>::new(
            "INSERT INTO albums (album_id, name, artist_id, release_date, total_tracks, album_type) ",
        );
        qb.push_values(chunk, |mut b, album| {
            b.push_bind(&album.id)
                .push_bind(&album.name)
                .push_bind(&album.artist_id)
                .push_bind(album.release_date)
                .push_bind(album.total_tracks)
                .push_bind(&album.album_type);
        });
        qb.push(
            r#" ON CONFLICT (album_id) DO UPDATE SET
                name = EXCLUDED.name,
                artist_id = EXCLUDED.artist_id,
                release_date = EXCLUDED.release_date,
                total_tracks = EXCLUDED.total_tracks,
                album_type = EXCLUDED.album_type"#,
        );

        let result = qb
            .build()
            .execute(&mut **tx)
            .await
            .map_err(Error::from_db)?;
        affected += result.rows_affected();
    }

    Ok(affected)
}

async fn upsert_tracks(
    tx: &mut Transaction<'_, Postgres>,
    rows: &[TrackRecord],
    batch_size: usize,
) -> Result<u64> {
    let mut affected = 0;

    for chunk in rows.chunks(batch_size) {
        let mut qb = QueryBuilder::<Postgres>::new(
            "INSERT INTO tracks (track_id, name, album_id, artist_id, duration_ms, explicit, popularity, preview_url) ",
        );
        qb.push_values(chunk, |mut b, track| {
            b.push_bind(&track.id)
                .push_bind(&track.name)
                .push_bind(&track.album_id)
                .push_bind(&track.artist_id)
                .push_bind(track.duration_ms)
                .push_bind(track.explicit)
                .push_bind(track.popularity)
                .push_bind(&track.preview_url);
        });
        qb.push(
            r#" ON CONFLICT (track_id) DO UPDATE SET
                name = EXCLUDED.name,
                album_id = EXCLUDED.album_id,
                artist_id = EXCLUDED.artist_id,
                duration_ms = EXCLUDED.duration_ms,
                explicit = EXCLUDED.explicit,
                popularity = EXCLUDED.popularity,
                preview_url = EXCLUDED.preview_url"#,
        );

        let result = qb
            .build()
            .execute(&mut **tx)
            .await
            .map_err(Error::from_db)?;
        affected += result.rows_affected();
    }

    Ok(affected)
}

async fn upsert_audio_features(
    tx: &mut Transaction<'_, Postgres>,
    rows: &[AudioFeaturesRecord],
    batch_size: usize,
) -> Result<u64> {
    let mut affected = 0;

    for chunk in rows.chunks(batch_size) {
        let mut qb = QueryBuilder::<Postgres>::new(
            r#"INSERT INTO audio_features
                (track_id, danceability, energy, key, loudness, mode, speechiness,
                 acousticness, instrumentalness, liveness, valence, tempo, time_signature) "#,
        );
        qb.push_values(chunk, |mut b, f| {
            b.push_bind(&f.track_id)
                .push_bind(f.danceability)
                .push_bind(f.energy)
                .push_bind(f.key)
                .push_bind(f.loudness)
                .push_bind(f.mode)
                .push_bind(f.speechiness)
                .push_bind(f.acousticness)
                .push_bind(f.instrumentalness)
                .push_bind(f.liveness)
                .push_bind(f.valence)
                .push_bind(f.tempo)
                .push_bind(f.time_signature);
        });
        qb.push(
            r#" ON CONFLICT (track_id) DO UPDATE SET
                danceability = EXCLUDED.danceability,
                energy = EXCLUDED.energy,
                key = EXCLUDED.key,
                loudness = EXCLUDED.loudness,
                mode = EXCLUDED.mode,
                speechiness = EXCLUDED.speechiness,
                acousticness = EXCLUDED.acousticness,
                instrumentalness = EXCLUDED.instrumentalness,
                liveness = EXCLUDED.liveness,
                valence = EXCLUDED.valence,
                tempo = EXCLUDED.tempo,
                time_signature = EXCLUDED.time_signature"#,
        );

        let result = qb
            .build()
            .execute(&mut **tx)
            .await
            .map_err(Error::from_db)?;
        affected += result.rows_affected();
    }

    Ok(affected)
}

async fn insert_events(
    tx: &mut Transaction<'_, Postgres>,
    rows: &[ListeningEvent],
    batch_size: usize,
) -> Result<u64> {
    let mut affected = 0;

    for chunk in rows.chunks(batch_size) {
        let mut qb =
            QueryBuilder::<Postgres>::new("INSERT INTO listening_history (track_id, played_at) ");
        qb.push_values(chunk, |mut b, event| {
            b.push_bind(&event.track_id).push_bind(event.played_at);
        });
        // replays of already-loaded events are silently skipped
        qb.push(" ON CONFLICT (track_id, played_at) DO NOTHING");

        let result = qb
            .build()
            .execute(&mut **tx)
            .await
            .map_err(Error::from_db)?;
        affected += result.rows_affected();
    }

    Ok(affected)
}
