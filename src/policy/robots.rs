//! robots.txt parsing and evaluation

use super::FetchPolicy;
use async_trait::async_trait;
use tracing::debug;
use url::Url;

/// A single Allow/Disallow rule
#[derive(Debug, Clone)]
struct Rule {
    allow: bool,
    path: String,
}

/// A user-agent group with its rules
#[derive(Debug, Clone)]
struct Group {
    agents: Vec<String>,
    rules: Vec<Rule>,
}

impl Group {
    /// Whether this group applies to the given user agent.
    ///
    /// Matching follows the common robots convention: the agent token is
    /// compared case-insensitively as a substring of the product part of the
    /// user-agent string, and `*` matches everyone.
    fn applies_to(&self, user_agent: &str) -> bool {
        let ua = user_agent
            .split('/')
            .next()
            .unwrap_or(user_agent)
            .to_ascii_lowercase();
        self.agents
            .iter()
            .any(|a| a == "*" || ua.contains(a.as_str()))
    }

    fn is_wildcard(&self) -> bool {
        self.agents.iter().all(|a| a == "*")
    }
}

/// robots.txt policy
///
/// Parses a robots.txt body into user-agent groups and answers
/// `can_fetch` queries against them. Rule precedence is longest-path-match;
/// on equal length, Allow wins. A site without a reachable robots.txt
/// permits everything.
#[derive(Debug, Clone, Default)]
pub struct RobotsPolicy {
    groups: Vec<Group>,
}

impl RobotsPolicy {
    /// A policy that allows every fetch (no rules)
    pub fn allow_all() -> Self {
        Self::default()
    }

    /// Parse a robots.txt body
    pub fn parse(body: &str) -> Self {
        let mut groups: Vec<Group> = Vec::new();
        let mut agents: Vec<String> = Vec::new();
        let mut rules: Vec<Rule> = Vec::new();
        // True while consuming consecutive User-agent lines for one group
        let mut collecting_agents = false;

        let mut flush = |agents: &mut Vec<String>, rules: &mut Vec<Rule>| {
            if !agents.is_empty() {
                groups.push(Group {
                    agents: std::mem::take(agents),
                    rules: std::mem::take(rules),
                });
            } else {
                rules.clear();
            }
        };

        for line in body.lines() {
            let line = line.split('#').next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }

            let Some((field, value)) = line.split_once(':') else {
                continue;
            };
            let field = field.trim().to_ascii_lowercase();
            let value = value.trim();

            match field.as_str() {
                "user-agent" => {
                    if !collecting_agents {
                        flush(&mut agents, &mut rules);
                        collecting_agents = true;
                    }
                    agents.push(value.to_ascii_lowercase());
                }
                "allow" | "disallow" => {
                    collecting_agents = false;
                    // An empty Disallow means "allow everything" and adds no rule
                    if !value.is_empty() {
                        rules.push(Rule {
                            allow: field == "allow",
                            path: value.to_string(),
                        });
                    }
                }
                _ => {
                    // Crawl-delay, Sitemap and friends are ignored
                    collecting_agents = false;
                }
            }
        }
        flush(&mut agents, &mut rules);

        Self { groups }
    }

    /// Fetch and parse a site's robots.txt.
    ///
    /// Best-effort: a missing or unreachable robots.txt yields a permissive
    /// policy rather than an error.
    pub async fn fetch(client: &reqwest::Client, base_url: &Url) -> Self {
        let Some(host) = base_url.host_str() else {
            return Self::allow_all();
        };
        let robots_url = format!("{}://{}/robots.txt", base_url.scheme(), host);

        let response = match client.get(&robots_url).send().await {
            Ok(r) => r,
            Err(e) => {
                debug!("robots.txt fetch failed for {robots_url}: {e}");
                return Self::allow_all();
            }
        };
        if !response.status().is_success() {
            return Self::allow_all();
        }

        let body = response.text().await.unwrap_or_default();
        Self::parse(&body)
    }

    /// Evaluate whether the user agent may fetch the URL
    pub fn is_allowed(&self, user_agent: &str, url: &Url) -> bool {
        let Some(group) = self.select_group(user_agent) else {
            return true;
        };

        let path = url.path();
        let mut verdict = true;
        let mut best_len = 0;

        for rule in &group.rules {
            if path.starts_with(rule.path.as_str()) {
                let len = rule.path.len();
                if len > best_len || (len == best_len && rule.allow) {
                    best_len = len;
                    verdict = rule.allow;
                }
            }
        }

        verdict
    }

    /// Pick the group for a user agent: a specifically matching group beats
    /// the `*` group.
    fn select_group(&self, user_agent: &str) -> Option<&Group> {
        self.groups
            .iter()
            .find(|g| g.applies_to(user_agent) && !g.is_wildcard())
            .or_else(|| self.groups.iter().find(|g| g.applies_to(user_agent)))
    }
}

#[async_trait]
impl FetchPolicy for RobotsPolicy {
    async fn can_fetch(&self, user_agent: &str, url: &Url) -> bool {
        self.is_allowed(user_agent, url)
    }
}
