//! Client for the platform's `/rulebook/` endpoint.
//!
//! The endpoint answers a plain GET with every published rule. There is no
//! pagination, auth or retry: a failed request is logged and handed back to
//! the caller.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Deserializer, Serialize};

use crate::config::RulebookConfig;
use crate::errors::{Error, Result};

/// A published business rule. Field names follow the endpoint's wire format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    #[serde(default, deserialize_with = "lenient_string")]
    pub rule: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub rule_description: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub rule_id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub rule_process_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub rule_process_owner: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub rule_stage: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub rule_status: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub rule_subject: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub rule_version: String,
}

// Database-backed rows can come through as numbers or null
fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    })
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RulebookPayload {
    Envelope {
        // The backend spells it "staus"
        #[serde(alias = "staus", default)]
        status: Option<String>,
        message: Vec<Rule>,
    },
    Bare(Vec<Rule>),
}

/// Parse a rulebook response body, either the `{"staus", "message"}`
/// envelope or a bare array of rules
pub fn parse_rulebook_payload(body: &str) -> Result<Vec<Rule>> {
    let payload: RulebookPayload = serde_json::from_str(body)
        .map_err(|e| Error::Deserialization(format!("Failed to parse rulebook response: {e}")))?;

    Ok(match payload {
        RulebookPayload::Envelope { status, message } => {
            if let Some(status) = status.filter(|s| s != "success") {
                log::warn!("Rulebook responded with status '{}'", status);
            }
            message
        }
        RulebookPayload::Bare(rules) => rules,
    })
}

pub struct RulebookClient {
    client: Client,
    url: String,
}

impl RulebookClient {
    pub fn new(config: &RulebookConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Network(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch every rule. Failures are logged here and then returned.
    pub async fn fetch_rules(&self) -> Result<Vec<Rule>> {
        let result = self.request_rules().await;
        match &result {
            Ok(rules) => log::debug!("Fetched {} rules from {}", rules.len(), self.url),
            Err(e) => log::error!("Error fetching rules from {}: {}", self.url, e),
        }
        result
    }

    async fn request_rules(&self) -> Result<Vec<Rule>> {
        let response = self
            .client
            .get(&self.url)
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(|e| Error::Network(format!("Failed to fetch rules: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::Http {
                status: response.status().as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::Network(format!("Failed to read rulebook response: {e}")))?;

        parse_rulebook_payload(&body)
    }
}

/// Narrows a rule list. `None` fields accept everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleFilter {
    /// Case-insensitive substring of the rule text or process name
    pub query: Option<String>,
    pub stage: Option<String>,
    pub status: Option<String>,
    pub process_name: Option<String>,
}

impl RuleFilter {
    pub fn matches(&self, rule: &Rule) -> bool {
        let query_matches = self.query.as_deref().is_none_or(|query| {
            let query = query.to_lowercase();
            rule.rule.to_lowercase().contains(&query)
                || rule.rule_process_name.to_lowercase().contains(&query)
        });
        let exact = |wanted: &Option<String>, actual: &str| {
            wanted.as_deref().is_none_or(|wanted| wanted == actual)
        };

        query_matches
            && exact(&self.stage, &rule.rule_stage)
            && exact(&self.status, &rule.rule_status)
            && exact(&self.process_name, &rule.rule_process_name)
    }

    pub fn apply<'a>(&self, rules: &'a [Rule]) -> Vec<&'a Rule> {
        rules.iter().filter(|rule| self.matches(rule)).collect()
    }
}
