use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Trade, TradeDraft};

/// Result of an update attempt against the store.
///
/// `Recreated` means the update target was gone (deleted remotely, or an id
/// from a stale snapshot) and the draft was written as a brand-new record
/// instead; callers must re-key their local entry under the returned trade's
/// id.
#[derive(Debug, Clone)]
pub enum UpdateOutcome {
    Updated(Trade),
    Recreated(Trade),
}

impl UpdateOutcome {
    pub fn trade(&self) -> &Trade {
        match self {
            UpdateOutcome::Updated(t) | UpdateOutcome::Recreated(t) => t,
        }
    }
}

/// Insert a new journal trade. The store assigns the identity.
pub async fn insert_trade(pool: &PgPool, draft: &TradeDraft) -> anyhow::Result<Trade> {
    let pnl = draft.effective_pnl();

    let trade = sqlx::query_as::<_, Trade>(
        r#"
        INSERT INTO trades (
            symbol, direction, asset_class, entry_at, exit_at,
            entry_price, exit_price, quantity, fees, pnl,
            setup, mistakes, followed_plan, entry_reason, mood,
            lesson_learned, tags, screenshot, notes
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
                $11, $12, $13, $14, $15, $16, $17, $18, $19)
        RETURNING *
        "#,
    )
    .bind(&draft.symbol)
    .bind(&draft.direction)
    .bind(&draft.asset_class)
    .bind(draft.entry_at)
    .bind(draft.exit_at)
    .bind(draft.entry_price)
    .bind(draft.exit_price)
    .bind(draft.quantity)
    .bind(draft.fees)
    .bind(pnl)
    .bind(&draft.setup)
    .bind(&draft.mistakes)
    .bind(draft.followed_plan)
    .bind(&draft.entry_reason)
    .bind(&draft.mood)
    .bind(&draft.lesson_learned)
    .bind(&draft.tags)
    .bind(&draft.screenshot)
    .bind(&draft.notes)
    .fetch_one(pool)
    .await?;

    Ok(trade)
}

/// Full journal snapshot, newest entries first. This is the ordering the
/// push subscription delivers to clients.
pub async fn get_all_trades(pool: &PgPool) -> anyhow::Result<Vec<Trade>> {
    let trades = sqlx::query_as::<_, Trade>(
        "SELECT * FROM trades ORDER BY created_at DESC",
    )
    .fetch_all(pool)
    .await?;

    Ok(trades)
}

pub async fn get_trade_by_id(pool: &PgPool, id: Uuid) -> anyhow::Result<Option<Trade>> {
    let trade = sqlx::query_as::<_, Trade>("SELECT * FROM trades WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(trade)
}

/// Update a trade in place; when the target row no longer exists, fall back
/// to creating a fresh record from the draft so the journal entry is never
/// lost.
pub async fn update_trade(
    pool: &PgPool,
    id: Uuid,
    draft: &TradeDraft,
) -> anyhow::Result<UpdateOutcome> {
    let pnl = draft.effective_pnl();

    let updated = sqlx::query_as::<_, Trade>(
        r#"
        UPDATE trades
        SET symbol = $2, direction = $3, asset_class = $4, entry_at = $5,
            exit_at = $6, entry_price = $7, exit_price = $8, quantity = $9,
            fees = $10, pnl = $11, setup = $12, mistakes = $13,
            followed_plan = $14, entry_reason = $15, mood = $16,
            lesson_learned = $17, tags = $18, screenshot = $19, notes = $20,
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&draft.symbol)
    .bind(&draft.direction)
    .bind(&draft.asset_class)
    .bind(draft.entry_at)
    .bind(draft.exit_at)
    .bind(draft.entry_price)
    .bind(draft.exit_price)
    .bind(draft.quantity)
    .bind(draft.fees)
    .bind(pnl)
    .bind(&draft.setup)
    .bind(&draft.mistakes)
    .bind(draft.followed_plan)
    .bind(&draft.entry_reason)
    .bind(&draft.mood)
    .bind(&draft.lesson_learned)
    .bind(&draft.tags)
    .bind(&draft.screenshot)
    .bind(&draft.notes)
    .fetch_optional(pool)
    .await?;

    match updated {
        Some(trade) => Ok(UpdateOutcome::Updated(trade)),
        None => {
            tracing::warn!(%id, "update target missing, recreating trade");
            let trade = insert_trade(pool, draft).await?;
            Ok(UpdateOutcome::Recreated(trade))
        }
    }
}

/// Delete a trade. Idempotent: deleting an id that is already gone succeeds.
pub async fn delete_trade(pool: &PgPool, id: Uuid) -> anyhow::Result<()> {
    let result = sqlx::query("DELETE FROM trades WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        tracing::debug!(%id, "delete target already absent");
    }

    Ok(())
}

/// Rewrite a setup label across the journal (setup rename).
pub async fn rename_setup(pool: &PgPool, old_name: &str, new_name: &str) -> anyhow::Result<u64> {
    let result = sqlx::query("UPDATE trades SET setup = $2, updated_at = NOW() WHERE setup = $1")
        .bind(old_name)
        .bind(new_name)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
