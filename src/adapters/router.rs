use crate::domain::ports::Navigator;
use async_trait::async_trait;
use std::sync::Mutex;

/// Router that keeps the current URL and history in memory.
#[derive(Debug)]
pub struct MemoryRouter {
    history: Mutex<Vec<String>>,
}

impl MemoryRouter {
    pub fn new() -> Self {
        Self {
            history: Mutex::new(vec!["/".to_string()]),
        }
    }

    pub fn current_url(&self) -> String {
        self.lock().last().cloned().unwrap_or_else(|| "/".to_string())
    }

    /// Every URL visited, starting with the initial `/`.
    pub fn history(&self) -> Vec<String> {
        self.lock().clone()
    }

    /// Number of `navigate` calls made so far.
    pub fn navigation_count(&self) -> usize {
        self.lock().len() - 1
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<String>> {
        // A poisoned history is still a valid list of strings
        self.history.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for MemoryRouter {
    fn default() -> Self {
        Self::new()
    }
}

pub fn route_url(commands: &[&str]) -> String {
    let segments: Vec<&str> = commands
        .iter()
        .map(|c| c.trim_matches('/'))
        .filter(|c| !c.is_empty())
        .collect();
    format!("/{}", segments.join("/"))
}

#[async_trait]
impl Navigator for MemoryRouter {
    async fn navigate(&self, commands: &[&str]) {
        let url = route_url(commands);
        tracing::debug!("Navigating to {}", url);
        self.lock().push(url);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_route_is_slash() {
        assert_eq!(route_url(&[""]), "/");
        assert_eq!(route_url(&[]), "/");
    }

    #[test]
    fn segments_are_joined() {
        assert_eq!(route_url(&["edit", "abc"]), "/edit/abc");
        assert_eq!(route_url(&["/auth/", "login"]), "/auth/login");
    }

    #[tokio::test]
    async fn navigation_is_recorded() {
        let router = MemoryRouter::new();
        assert_eq!(router.navigation_count(), 0);

        router.navigate(&["create"]).await;
        router.navigate(&[""]).await;

        assert_eq!(router.current_url(), "/");
        assert_eq!(router.history(), vec!["/", "/create", "/"]);
        assert_eq!(router.navigation_count(), 2);
    }
}
