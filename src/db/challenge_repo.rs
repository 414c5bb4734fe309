use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::models::{ChallengeStatus, GrowthChallenge};

/// Fetch the active challenge, seeding the default milestone for a fresh
/// journal.
pub async fn get_active_challenge(pool: &PgPool) -> anyhow::Result<GrowthChallenge> {
    let existing = sqlx::query_as::<_, GrowthChallenge>(
        "SELECT * FROM challenges WHERE status = 'active' ORDER BY created_at DESC LIMIT 1",
    )
    .fetch_optional(pool)
    .await?;

    match existing {
        Some(challenge) => Ok(challenge),
        None => insert_challenge(pool, &GrowthChallenge::default_seed(Utc::now())).await,
    }
}

/// Replace the mutable fields of the active challenge. History is untouched.
pub async fn update_active_challenge(
    pool: &PgPool,
    title: &str,
    starting_capital: Decimal,
    target_capital: Decimal,
) -> anyhow::Result<GrowthChallenge> {
    let active = get_active_challenge(pool).await?;

    let updated = sqlx::query_as::<_, GrowthChallenge>(
        r#"
        UPDATE challenges
        SET title = $2, starting_capital = $3, target_capital = $4
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(active.id)
    .bind(title)
    .bind(starting_capital)
    .bind(target_capital)
    .fetch_one(pool)
    .await?;

    Ok(updated)
}

/// Persist an archive transition atomically: the old challenge flips to
/// completed and its successor is inserted as the new active one.
pub async fn archive_pair(
    pool: &PgPool,
    completed: &GrowthChallenge,
    next: &GrowthChallenge,
) -> anyhow::Result<()> {
    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        UPDATE challenges
        SET status = $2, end_at = $3, current_capital = $4
        WHERE id = $1
        "#,
    )
    .bind(completed.id)
    .bind(&completed.status)
    .bind(completed.end_at)
    .bind(completed.current_capital)
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        INSERT INTO challenges (id, title, starting_capital, target_capital,
                                current_capital, start_at, end_at, status)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        "#,
    )
    .bind(next.id)
    .bind(&next.title)
    .bind(next.starting_capital)
    .bind(next.target_capital)
    .bind(next.current_capital)
    .bind(next.start_at)
    .bind(next.end_at)
    .bind(&next.status)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(())
}

/// Completed milestones, most recently archived first.
pub async fn get_completed_challenges(pool: &PgPool) -> anyhow::Result<Vec<GrowthChallenge>> {
    let challenges = sqlx::query_as::<_, GrowthChallenge>(
        "SELECT * FROM challenges WHERE status = $1 ORDER BY end_at DESC",
    )
    .bind(ChallengeStatus::Completed.as_str())
    .fetch_all(pool)
    .await?;

    Ok(challenges)
}

async fn insert_challenge(
    pool: &PgPool,
    challenge: &GrowthChallenge,
) -> anyhow::Result<GrowthChallenge> {
    let inserted = sqlx::query_as::<_, GrowthChallenge>(
        r#"
        INSERT INTO challenges (id, title, starting_capital, target_capital,
                                current_capital, start_at, end_at, status)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING *
        "#,
    )
    .bind(challenge.id)
    .bind(&challenge.title)
    .bind(challenge.starting_capital)
    .bind(challenge.target_capital)
    .bind(challenge.current_capital)
    .bind(challenge.start_at)
    .bind(challenge.end_at)
    .bind(&challenge.status)
    .fetch_one(pool)
    .await?;

    Ok(inserted)
}
