use std::sync::{Arc, Mutex, RwLock, Weak};
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    EnteredForeground,
    EnteredBackground,
}

pub trait LifecycleObserver: Send + Sync {
    fn on_lifecycle(&mut self, event: LifecycleEvent, now: Instant);
}

type SharedObserver = Weak<RwLock<dyn LifecycleObserver>>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    observers: Vec<(u64, SharedObserver)>,
}

#[derive(Clone, Default)]
pub struct AppLifecycle {
    registry: Arc<Mutex<Registry>>,
}

impl AppLifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, observer: SharedObserver) -> Subscription {
        let mut registry = self.registry.lock().unwrap();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.observers.push((id, observer));

        Subscription {
            id,
            registry: self.registry.clone(),
        }
    }

    pub fn notify(&self, event: LifecycleEvent, now: Instant) {
        // snapshot so an observer may subscribe/unsubscribe from its callback
        let snapshot: Vec<SharedObserver> = {
            let registry = self.registry.lock().unwrap();
            registry
                .observers
                .iter()
                .map(|(_, observer)| observer.clone())
                .collect()
        };

        for weak in snapshot {
            if let Some(observer) = weak.upgrade() {
                observer.write().unwrap().on_lifecycle(event, now);
            }
        }

        let mut registry = self.registry.lock().unwrap();
        registry
            .observers
            .retain(|(_, observer)| observer.strong_count() > 0);
    }

    pub(crate) fn observer_count(&self) -> usize {
        self.registry.lock().unwrap().observers.len()
    }
}

pub struct Subscription {
    id: u64,
    registry: Arc<Mutex<Registry>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let mut registry = self.registry.lock().unwrap();
        registry.observers.retain(|(id, _)| *id != self.id);
    }
}
