//! Recording fake for the graphics capability.

#![allow(dead_code)]

use stage_core::{ApplicationOptions, BackendError, DestroyOptions, GraphicsBackend};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Stand-in for a canvas element owned by the UI layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Canvas(pub u32);

/// A live fake application. Compared by pointer to prove sharing.
#[derive(Debug)]
pub struct FakeApp {
    pub view: Canvas,
    pub background_alpha: f64,
}

/// Counters shared between the test and the backend it hands out.
#[derive(Debug, Default)]
pub struct Record {
    pub creates: AtomicUsize,
    pub destroys: AtomicUsize,
    pub fail_next: AtomicBool,
    pub destroy_options: Mutex<Vec<DestroyOptions>>,
}

impl Record {
    pub fn creates(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
    }

    pub fn destroys(&self) -> usize {
        self.destroys.load(Ordering::SeqCst)
    }

    pub fn live(&self) -> usize {
        self.creates() - self.destroys()
    }
}

#[derive(Debug, Default, Clone)]
pub struct RecordingBackend {
    pub record: Arc<Record>,
}

impl RecordingBackend {
    pub fn new() -> (Self, Arc<Record>) {
        let backend = Self::default();
        let record = Arc::clone(&backend.record);
        (backend, record)
    }
}

impl GraphicsBackend for RecordingBackend {
    type Canvas = Canvas;
    type Application = Arc<FakeApp>;

    fn create(
        &mut self,
        options: &ApplicationOptions<'_, Canvas>,
    ) -> Result<Arc<FakeApp>, BackendError> {
        if self.record.fail_next.swap(false, Ordering::SeqCst) {
            return Err(BackendError::new("context lost"));
        }
        self.record.creates.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(FakeApp {
            view: *options.view,
            background_alpha: options.background_alpha,
        }))
    }

    fn destroy(&mut self, _application: Arc<FakeApp>, options: DestroyOptions) {
        self.record.destroys.fetch_add(1, Ordering::SeqCst);
        self.record
            .destroy_options
            .lock()
            .unwrap()
            .push(options);
    }
}
