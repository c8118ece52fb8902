use tracing::debug;

/// Collection of realistic user agents for rotation (§4.1).
pub const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) Gecko/20100101 Firefox/121.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.1 Safari/605.1.15",
    "Mozilla/5.0 (X11; Linux x86_64; rv:121.0) Gecko/20100101 Firefox/121.0",
];

pub fn get_random_user_agent() -> &'static str {
    use rand::Rng;
    let mut rng = rand::thread_rng();
    let index = rng.gen_range(0..USER_AGENTS.len());
    USER_AGENTS[index]
}

/// Stealth headers to resemble an ordinary browser request -- a politeness measure for sites
/// without a public API, not an attempt to defeat access controls (§4.1).
pub fn get_stealth_headers() -> Vec<(&'static str, &'static str)> {
    vec![
        ("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8"),
        ("Accept-Language", "en-US,en;q=0.9,bn;q=0.8"),
        ("Accept-Encoding", "gzip, deflate, br"),
        ("DNT", "1"),
        ("Connection", "keep-alive"),
        ("Upgrade-Insecure-Requests", "1"),
        ("Sec-Fetch-Dest", "document"),
        ("Sec-Fetch-Mode", "navigate"),
        ("Sec-Fetch-Site", "none"),
        ("Cache-Control", "max-age=0"),
    ]
}

/// Per-adapter inter-request delay: randomized uniformly from `[base_ms, base_ms + spread_ms]`.
#[derive(Debug, Clone, Copy)]
pub struct RequestDelay {
    pub base_ms: u64,
    pub spread_ms: u64,
}

impl RequestDelay {
    pub fn new(base_ms: u64, spread_ms: u64) -> Self {
        Self { base_ms, spread_ms }
    }

    pub fn random_delay(&self) -> u64 {
        use rand::Rng;
        let mut rng = rand::thread_rng();
        rng.gen_range(self.base_ms..=self.base_ms + self.spread_ms)
    }
}

/// Polite, per-adapter rate limiter: tracks the last-request timestamp (lock-free) and sleeps
/// only the remaining time, never more (§4.1).
pub struct RateLimiter {
    delay: RequestDelay,
    last_request_ms: std::sync::atomic::AtomicU64,
}

impl RateLimiter {
    pub fn new(delay: RequestDelay) -> Self {
        Self {
            delay,
            last_request_ms: std::sync::atomic::AtomicU64::new(0),
        }
    }

    pub async fn wait_for_next_request(&self) {
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_millis() as u64;

        let last = self.last_request_ms.load(std::sync::atomic::Ordering::Relaxed);
        let elapsed = now.saturating_sub(last);
        let delay = self.delay.random_delay();

        if elapsed < delay {
            let wait_ms = delay - elapsed;
            debug!(wait_ms, "rate limiting before next request");
            tokio::time::sleep(tokio::time::Duration::from_millis(wait_ms)).await;
        }

        self.last_request_ms
            .store(now + delay, std::sync::atomic::Ordering::Relaxed);
    }

    pub fn reset(&self) {
        self.last_request_ms.store(0, std::sync::atomic::Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_agents_are_non_empty_and_realistic() {
        assert!(!USER_AGENTS.is_empty());
        assert!(USER_AGENTS[0].contains("Mozilla"));
    }

    #[tokio::test]
    async fn rate_limiter_waits_at_least_the_minimum_delay() {
        let limiter = RateLimiter::new(RequestDelay::new(50, 0));
        let start = std::time::Instant::now();
        limiter.wait_for_next_request().await;
        limiter.wait_for_next_request().await;
        assert!(start.elapsed().as_millis() >= 50);
    }
}
