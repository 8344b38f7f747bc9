//! Keeps the vertical scroll offset of several day columns in step.
//!
//! Only the active viewport drives synchronisation. Its offset is recorded
//! and persisted on every scroll; after a quiet period the offset is written
//! to every other viewport in one batch. Scroll events from inactive
//! viewports (including the echoes of those writes) are ignored.

use std::rc::Rc;
use std::time::{Duration, Instant};

use crate::models::settings::DayViewConfig;
use crate::services::key_value::KeyValueStore;
use crate::services::layout::PositionMapper;
use crate::utils::time::MINUTES_PER_HOUR;

/// A scrollable day column.
pub trait ScrollViewport {
    fn scroll_top(&self) -> f32;
    fn set_scroll_top(&mut self, offset: f32);
}

#[derive(Debug, Clone, Copy)]
struct PendingSync {
    offset: f32,
    due: Instant,
}

pub struct ScrollSynchronizer<V: ScrollViewport> {
    viewports: Vec<V>,
    active: usize,
    store: Rc<dyn KeyValueStore>,
    storage_key: String,
    debounce: Duration,
    last_offset: Option<f32>,
    pending: Option<PendingSync>,
}

impl<V: ScrollViewport> ScrollSynchronizer<V> {
    /// Take ownership of the viewports and restore the persisted offset into
    /// the one that is active now. Restoration happens only here; when nothing
    /// usable is stored the active viewport is scrolled to `fallback_offset`.
    pub fn new(
        viewports: Vec<V>,
        active: usize,
        store: Rc<dyn KeyValueStore>,
        storage_key: impl Into<String>,
        debounce: Duration,
        fallback_offset: f32,
    ) -> Self {
        let mut sync = Self {
            active: active.min(viewports.len().saturating_sub(1)),
            viewports,
            store,
            storage_key: storage_key.into(),
            debounce,
            last_offset: None,
            pending: None,
        };
        sync.restore(fallback_offset);
        sync
    }

    /// Storage key, debounce and start-of-day fallback taken from `config`.
    pub fn from_config(
        viewports: Vec<V>,
        active: usize,
        store: Rc<dyn KeyValueStore>,
        config: &DayViewConfig,
    ) -> Self {
        let fallback = PositionMapper::from_config(config)
            .top_px_for_minutes(config.day_start_hour * MINUTES_PER_HOUR);
        Self::new(
            viewports,
            active,
            store,
            config.scroll_storage_key.clone(),
            config.scroll_debounce(),
            fallback,
        )
    }

    fn restore(&mut self, fallback_offset: f32) {
        let active = self.active;
        let persisted = self.read_persisted();
        let Some(viewport) = self.viewports.get_mut(active) else {
            return;
        };
        match persisted {
            Some(offset) => {
                viewport.set_scroll_top(offset);
                self.last_offset = Some(offset);
                log::debug!("Restored scroll offset {} into viewport {}", offset, active);
            }
            None => {
                viewport.set_scroll_top(fallback_offset);
                log::debug!("No stored scroll offset, viewport {} starts at {}", active, fallback_offset);
            }
        }
    }

    fn read_persisted(&self) -> Option<f32> {
        let raw = match self.store.get(&self.storage_key) {
            Ok(raw) => raw?,
            Err(e) => {
                log::warn!("Failed to read scroll offset: {:#}", e);
                return None;
            }
        };
        match serde_json::from_str::<f32>(&raw) {
            Ok(offset) if offset.is_finite() && offset >= 0.0 => Some(offset),
            _ => {
                log::warn!("Ignoring corrupt scroll offset {:?}", raw);
                None
            }
        }
    }

    pub fn active(&self) -> usize {
        self.active
    }

    /// Switch which viewport drives synchronisation (e.g. after paging the carousel).
    pub fn set_active(&mut self, index: usize) {
        if index < self.viewports.len() {
            self.active = index;
        }
    }

    pub fn last_offset(&self) -> Option<f32> {
        self.last_offset
    }

    pub fn viewports(&self) -> &[V] {
        &self.viewports
    }

    pub fn viewport_mut(&mut self, index: usize) -> Option<&mut V> {
        self.viewports.get_mut(index)
    }

    /// When the host should next call [`Self::flush`].
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.map(|p| p.due)
    }

    /// A viewport scrolled. Returns false if the event was ignored because
    /// the viewport is not the active one.
    pub fn on_scroll(&mut self, index: usize, offset: f32, now: Instant) -> bool {
        if index != self.active || !offset.is_finite() {
            return false;
        }
        self.last_offset = Some(offset);
        match serde_json::to_string(&offset) {
            Ok(encoded) => {
                if let Err(e) = self.store.set(&self.storage_key, &encoded) {
                    log::warn!("Failed to persist scroll offset: {:#}", e);
                }
            }
            Err(e) => log::warn!("Failed to encode scroll offset: {}", e),
        }
        self.pending = Some(PendingSync {
            offset,
            due: now + self.debounce,
        });
        true
    }

    /// Propagate a settled offset to every viewport except the active one.
    /// Returns how many viewports were written.
    pub fn flush(&mut self, now: Instant) -> usize {
        let Some(pending) = self.pending else {
            return 0;
        };
        if now < pending.due {
            return 0;
        }
        self.pending = None;

        let active = self.active;
        let mut written = 0;
        for (index, viewport) in self.viewports.iter_mut().enumerate() {
            if index != active {
                viewport.set_scroll_top(pending.offset);
                written += 1;
            }
        }
        log::debug!("Synced scroll offset {} to {} viewports", pending.offset, written);
        written
    }
}
