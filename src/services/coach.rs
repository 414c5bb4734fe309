use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::models::Trade;

/// Structured coaching feedback returned by the LLM.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoachAnalysis {
    pub summary: String,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub actionable_tips: Vec<String>,
    /// Discipline / performance score, 0-100.
    pub discipline_score: i32,
}

/// Compact closed-trade view sent to the model; the full journal entry
/// (screenshots, timestamps, prices) stays local.
#[derive(Debug, Serialize)]
struct TradeSummary<'a> {
    symbol: &'a str,
    direction: &'a str,
    pnl: String,
    setup: Option<&'a str>,
    mistakes: &'a [String],
    notes: &'a str,
}

/// Gemini-backed trading coach. Failures are logged and surfaced to the
/// caller; journal state is never touched from here.
#[derive(Debug, Clone)]
pub struct CoachClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl CoachClient {
    pub fn new(api_key: String, model: String, base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            model,
            base_url,
        }
    }

    /// Ask the model for narrative feedback over the closed-trade history.
    pub async fn analyze(&self, trades: &[Trade]) -> anyhow::Result<CoachAnalysis> {
        let summaries: Vec<TradeSummary> = trades
            .iter()
            .filter(|t| t.is_closed())
            .map(|t| TradeSummary {
                symbol: &t.symbol,
                direction: &t.direction,
                pnl: t.realized_pnl().to_string(),
                setup: t.setup.as_deref(),
                mistakes: &t.mistakes,
                notes: &t.notes,
            })
            .collect();

        let prompt = format!(
            "You are a professional trading coach and risk manager at a top \
             proprietary trading firm. Analyze the following trading journal \
             entries. Identify patterns in behavior, profitability, and \
             mistakes.\n\nData: {}\n\nRespond with strictly valid JSON.",
            serde_json::to_string(&summaries)?,
        );

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": {
                    "type": "OBJECT",
                    "properties": {
                        "summary": { "type": "STRING" },
                        "strengths": { "type": "ARRAY", "items": { "type": "STRING" } },
                        "weaknesses": { "type": "ARRAY", "items": { "type": "STRING" } },
                        "actionable_tips": { "type": "ARRAY", "items": { "type": "STRING" } },
                        "discipline_score": { "type": "INTEGER" }
                    },
                    "required": [
                        "summary", "strengths", "weaknesses",
                        "actionable_tips", "discipline_score"
                    ]
                }
            }
        });

        let resp = self.http.post(&url).json(&body).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let detail = resp.text().await.unwrap_or_default();
            tracing::warn!(%status, "coach generateContent returned non-2xx");
            anyhow::bail!("coach request failed with status {status}: {detail}");
        }

        let payload: serde_json::Value = resp.json().await?;
        let text = payload["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("empty response from coach model"))?;

        let analysis: CoachAnalysis = serde_json::from_str(text)?;
        Ok(analysis)
    }
}
