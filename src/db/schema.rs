//! Schema setup for the listening-history star schema.
//!
//! Tables are created in foreign-key dependency order: artists, albums,
//! tracks, audio_features, listening_history. All statements are idempotent
//! (`CREATE TABLE IF NOT EXISTS`) so `spotetl init` is safe to re-run.

use sqlx::PgPool;

use crate::error::Result;

/// Create all tables and indexes if they don't exist.
pub async fn create_tables(pool: &PgPool) -> Result<()> {
    create_artists_table(pool).await?;
    create_albums_table(pool).await?;
    create_tracks_table(pool).await?;
    create_audio_features_table(pool).await?;
    create_listening_history_table(pool).await?;

    Ok(())
}

async fn create_artists_table(pool: &PgPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS artists (
            artist_id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            genres TEXT[],
            popularity INTEGER,
            followers BIGINT,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
            CHECK (popularity IS NULL OR (popularity >= 0 AND popularity <= 100)),
            CHECK (followers IS NULL OR followers >= 0)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_albums_table(pool: &PgPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS albums (
            album_id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            artist_id TEXT NOT NULL REFERENCES artists(artist_id),
            release_date DATE,
            total_tracks INTEGER,
            album_type TEXT,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
            CHECK (total_tracks IS NULL OR total_tracks >= 0)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_albums_artist ON albums(artist_id)")
        .execute(pool)
        .await?;

    Ok(())
}

async fn create_tracks_table(pool: &PgPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS tracks (
            track_id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            album_id TEXT NOT NULL REFERENCES albums(album_id),
            artist_id TEXT NOT NULL REFERENCES artists(artist_id),
            duration_ms BIGINT NOT NULL,
            explicit BOOLEAN NOT NULL DEFAULT FALSE,
            popularity INTEGER,
            preview_url TEXT,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
            CHECK (duration_ms >= 0),
            CHECK (popularity IS NULL OR (popularity >= 0 AND popularity <= 100))
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_tracks_album ON tracks(album_id)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_tracks_artist ON tracks(artist_id)")
        .execute(pool)
        .await?;

    Ok(())
}

async fn create_audio_features_table(pool: &PgPool) -> Result<()> {
    // one-to-one with tracks: track_id is both primary key and foreign key
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS audio_features (
            track_id TEXT PRIMARY KEY REFERENCES tracks(track_id),
            danceability DOUBLE PRECISION,
            energy DOUBLE PRECISION,
            key INTEGER,
            loudness DOUBLE PRECISION,
            mode INTEGER,
            speechiness DOUBLE PRECISION,
            acousticness DOUBLE PRECISION,
            instrumentalness DOUBLE PRECISION,
            liveness DOUBLE PRECISION,
            valence DOUBLE PRECISION,
            tempo DOUBLE PRECISION,
            time_signature INTEGER,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now()
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_listening_history_table(pool: &PgPool) -> Result<()> {
    // append-only fact table; (track_id, played_at) uniqueness is what makes
    // repeated API pulls idempotent
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS listening_history (
            id BIGSERIAL PRIMARY KEY,
            track_id TEXT NOT NULL REFERENCES tracks(track_id),
            played_at TIMESTAMPTZ NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
            UNIQUE (track_id, played_at)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_listening_history_played_at ON listening_history(played_at)",
    )
    .execute(pool)
    .await?;

    Ok(())
}
