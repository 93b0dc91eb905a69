//! Prompt text for source routing.

pub const SYSTEM_PROMPT: &str =
    "You route questions about U.S. macroeconomic data. Answer with JSON only.";

/// Builds the routing prompt for a user query.
pub fn routing_prompt(query: &str) -> String {
    format!(
        r#"Decide which data source answers the query below.

Sources:
1. FRED: historical, actually observed economic data.
2. GREENBOOK: Federal Reserve staff forecasts and projections (Greenbook/Tealbook).

Rules:
- Mentions of projections, forecasts, predictions, outlooks, the Greenbook or the Tealbook mean GREENBOOK.
- Questions about historical or actual data, or that only name a variable, mean FRED.
- When unsure, choose FRED.

Query: "{query}"

Respond with a single JSON object:
{{
    "source": "FRED" or "GREENBOOK",
    "confidence": number between 0 and 1,
    "reasoning": "one sentence",
    "query": "the query with routing words such as 'greenbook' or 'historical' removed"
}}"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_query() {
        let prompt = routing_prompt("greenbook real gdp");
        assert!(prompt.contains("Query: \"greenbook real gdp\""));
        assert!(prompt.contains("\"source\": \"FRED\" or \"GREENBOOK\""));
    }
}
