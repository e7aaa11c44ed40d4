//! Navigation and Scroll Coordination
//!
//! The navigator owns the current path and notifies subscribed observers
//! synchronously, before the caller composes the new view. The scroll
//! coordinator is one such observer.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tracing::debug;

use crate::routing::Route;

/// Something with a scroll offset.
pub trait Viewport {
    fn scroll_to(&mut self, x: u32, y: u32);
}

/// Receives every navigation, changed or not.
pub trait RouteObserver {
    fn on_navigate(&mut self, path: &str, route: &Route);
}

/// Headless viewport that counts resets. Clones share the counter.
#[derive(Debug, Clone, Default)]
pub struct CountingViewport {
    resets: Arc<AtomicUsize>,
}

impl CountingViewport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resets(&self) -> usize {
        self.resets.load(Ordering::SeqCst)
    }
}

impl Viewport for CountingViewport {
    fn scroll_to(&mut self, _x: u32, _y: u32) {
        self.resets.fetch_add(1, Ordering::SeqCst);
    }
}

/// Resets the viewport to the origin whenever the path changes.
pub struct ScrollCoordinator<V: Viewport> {
    viewport: V,
    last_path: Option<String>,
}

impl<V: Viewport> ScrollCoordinator<V> {
    pub fn new(viewport: V) -> Self {
        Self {
            viewport,
            last_path: None,
        }
    }

    pub fn viewport(&self) -> &V {
        &self.viewport
    }
}

impl<V: Viewport> RouteObserver for ScrollCoordinator<V> {
    fn on_navigate(&mut self, path: &str, _route: &Route) {
        if self.last_path.as_deref() == Some(path) {
            return;
        }
        debug!(path, "resetting scroll position");
        self.viewport.scroll_to(0, 0);
        self.last_path = Some(path.to_string());
    }
}

/// Owns the current location and fans navigation events out to observers.
pub struct Navigator {
    current: Option<(String, Route)>,
    observers: Vec<Box<dyn RouteObserver + Send>>,
}

impl Navigator {
    pub fn new() -> Self {
        Self {
            current: None,
            observers: Vec::new(),
        }
    }

    /// Navigator with a scroll coordinator already subscribed.
    pub fn with_scroll_reset<V>(viewport: V) -> Self
    where
        V: Viewport + Send + 'static,
    {
        let mut navigator = Self::new();
        navigator.subscribe(Box::new(ScrollCoordinator::new(viewport)));
        navigator
    }

    pub fn subscribe(&mut self, observer: Box<dyn RouteObserver + Send>) {
        self.observers.push(observer);
    }

    /// Resolve `path`, notify every observer, then record it as current.
    /// The initial mount is just the first call.
    pub fn navigate(&mut self, path: &str) -> Route {
        let route = Route::resolve(path);
        for observer in &mut self.observers {
            observer.on_navigate(path, &route);
        }
        self.current = Some((path.to_string(), route.clone()));
        route
    }

    pub fn current_path(&self) -> Option<&str> {
        self.current.as_ref().map(|(path, _)| path.as_str())
    }

    pub fn current_route(&self) -> Option<&Route> {
        self.current.as_ref().map(|(_, route)| route)
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mount_fires_once() {
        let viewport = CountingViewport::new();
        let mut nav = Navigator::with_scroll_reset(viewport.clone());
        nav.navigate("/");
        assert_eq!(viewport.resets(), 1);
        assert_eq!(nav.current_path(), Some("/"));
        assert_eq!(nav.current_route(), Some(&Route::Home));
    }

    #[test]
    fn test_same_path_is_noop() {
        let viewport = CountingViewport::new();
        let mut nav = Navigator::with_scroll_reset(viewport.clone());
        nav.navigate("/projects/project-one");
        nav.navigate("/projects/project-one");
        assert_eq!(viewport.resets(), 1);
    }

    #[test]
    fn test_path_identity_not_view_identity() {
        // Both resolve to NotFound but are different paths.
        let viewport = CountingViewport::new();
        let mut nav = Navigator::with_scroll_reset(viewport.clone());
        nav.navigate("/a");
        nav.navigate("/b");
        assert_eq!(viewport.resets(), 2);
    }

    #[test]
    fn test_reset_happens_before_navigate_returns() {
        struct Recorder(Vec<(u32, u32)>);
        impl Viewport for Recorder {
            fn scroll_to(&mut self, x: u32, y: u32) {
                self.0.push((x, y));
            }
        }

        let mut coordinator = ScrollCoordinator::new(Recorder(vec![]));
        coordinator.on_navigate("/", &Route::Home);
        assert_eq!(coordinator.viewport().0, vec![(0, 0)]);
    }
}
