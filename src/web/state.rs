use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use uuid::Uuid;

use crate::analysis::{DashboardSettings, Session};
use crate::config::ServerConfig;
use crate::models::Dataset;

/// Shared server state: one read-only dataset, many independent sessions.
pub struct AppState {
    dataset: Arc<Dataset>,
    settings: DashboardSettings,
    session_ttl: Duration,
    max_sessions: usize,
    sessions: Mutex<HashMap<Uuid, (Instant, Session)>>,
}

impl AppState {
    pub fn new(dataset: Arc<Dataset>, settings: DashboardSettings, server: &ServerConfig) -> Self {
        Self {
            dataset,
            settings,
            session_ttl: Duration::from_secs(server.session_ttl_secs),
            max_sessions: server.max_sessions.max(1),
            sessions: Mutex::new(HashMap::new()),
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Start a session with every filter option selected.
    pub fn create_session(&self) -> (Uuid, Session) {
        let id = Uuid::new_v4();
        let session = Session::new(Arc::clone(&self.dataset), self.settings.clone());
        let mut map = self.sessions.lock().expect("sessions mutex poisoned");
        self.evict_expired(&mut map);
        if map.len() >= self.max_sessions {
            evict_oldest(&mut map);
        }
        map.insert(id, (Instant::now(), session.clone()));
        tracing::debug!(%id, sessions = map.len(), "session created");
        (id, session)
    }

    /// A copy of the session, refreshing its last-used time.
    pub fn get_session(&self, id: &Uuid) -> Option<Session> {
        let mut map = self.sessions.lock().expect("sessions mutex poisoned");
        self.evict_expired(&mut map);
        map.get_mut(id).map(|(touched, session)| {
            *touched = Instant::now();
            session.clone()
        })
    }

    /// Apply `f` to the stored session and return its result.
    pub fn update_session<T>(&self, id: &Uuid, f: impl FnOnce(&mut Session) -> T) -> Option<T> {
        let mut map = self.sessions.lock().expect("sessions mutex poisoned");
        self.evict_expired(&mut map);
        map.get_mut(id).map(|(touched, session)| {
            *touched = Instant::now();
            f(session)
        })
    }

    pub fn session_count(&self) -> usize {
        self.sessions.lock().expect("sessions mutex poisoned").len()
    }

    fn evict_expired(&self, map: &mut HashMap<Uuid, (Instant, Session)>) {
        let Some(cutoff) = Instant::now().checked_sub(self.session_ttl) else {
            return;
        };
        map.retain(|_, (touched, _)| *touched > cutoff);
    }
}

fn evict_oldest(map: &mut HashMap<Uuid, (Instant, Session)>) {
    if let Some(oldest_id) = map.iter().min_by_key(|(_, (t, _))| *t).map(|(id, _)| *id) {
        map.remove(&oldest_id);
    }
}
