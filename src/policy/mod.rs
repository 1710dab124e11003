//! Fetch policy module
//!
//! Site-policy enforcement for the fetch path. The HTTP client consults the
//! installed policy before every request; a denial fails the call with
//! `Error::PolicyDenied` and no network traffic is issued for the target.
//!
//! # Overview
//!
//! - `FetchPolicy` - the policy collaborator trait
//! - `AllowAll` - the default, permits everything
//! - `RobotsPolicy` - robots.txt rules (user-agent groups, Allow/Disallow)

mod robots;

pub use robots::RobotsPolicy;

use async_trait::async_trait;
use url::Url;

/// Policy collaborator consulted before each fetch
#[async_trait]
pub trait FetchPolicy: Send + Sync {
    /// Whether the given user agent may fetch the given URL
    async fn can_fetch(&self, user_agent: &str, url: &Url) -> bool;
}

/// Permissive policy that allows every fetch
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

#[async_trait]
impl FetchPolicy for AllowAll {
    async fn can_fetch(&self, _user_agent: &str, _url: &Url) -> bool {
        true
    }
}
