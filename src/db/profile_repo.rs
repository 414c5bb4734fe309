use sqlx::PgPool;

use crate::models::JournalProfile;

/// Fetch the journal profile, seeding the default label lists on first use.
pub async fn get_profile(pool: &PgPool) -> anyhow::Result<JournalProfile> {
    let existing = sqlx::query_as::<_, JournalProfile>(
        "SELECT * FROM journal_profile WHERE id = 1",
    )
    .fetch_optional(pool)
    .await?;

    match existing {
        Some(profile) => Ok(profile),
        None => {
            let seed = JournalProfile::seed();
            let inserted = sqlx::query_as::<_, JournalProfile>(
                r#"
                INSERT INTO journal_profile (id, custom_setups, rules, mistake_labels)
                VALUES (1, $1, $2, $3)
                ON CONFLICT (id) DO UPDATE SET updated_at = NOW()
                RETURNING *
                "#,
            )
            .bind(&seed.custom_setups)
            .bind(&seed.rules)
            .bind(&seed.mistake_labels)
            .fetch_one(pool)
            .await?;

            Ok(inserted)
        }
    }
}

pub async fn set_custom_setups(
    pool: &PgPool,
    setups: &[String],
) -> anyhow::Result<JournalProfile> {
    update_column(pool, "custom_setups", setups).await
}

pub async fn set_rules(pool: &PgPool, rules: &[String]) -> anyhow::Result<JournalProfile> {
    update_column(pool, "rules", rules).await
}

pub async fn set_mistake_labels(
    pool: &PgPool,
    labels: &[String],
) -> anyhow::Result<JournalProfile> {
    update_column(pool, "mistake_labels", labels).await
}

async fn update_column(
    pool: &PgPool,
    column: &str,
    values: &[String],
) -> anyhow::Result<JournalProfile> {
    // Ensure the row exists before updating it.
    get_profile(pool).await?;

    let sql = format!(
        "UPDATE journal_profile SET {column} = $1, updated_at = NOW() WHERE id = 1 RETURNING *"
    );
    let profile = sqlx::query_as::<_, JournalProfile>(&sql)
        .bind(values)
        .fetch_one(pool)
        .await?;

    Ok(profile)
}
