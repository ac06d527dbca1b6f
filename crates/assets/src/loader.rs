use crate::texture::{LoadState, TextureCache, TextureData, TextureHandle};
use crate::url::resolve_image_url;
use crate::{AssetError, TextureSource};
use crossbeam_channel::{unbounded, Receiver, Sender};
use std::sync::Arc;
use std::thread;

struct Job {
    url: String,
    location: String,
}

struct Completed {
    url: String,
    result: Result<TextureData, AssetError>,
}

/// Fetches and decodes textures on a small pool of worker threads.
///
/// The owning (render) thread calls [`request`](Self::request) for each URL a
/// scene references and [`poll`](Self::poll) once per frame to move finished
/// loads into the cache. Neither call blocks. In-flight loads cannot be
/// cancelled; dropping the loader abandons them.
pub struct TextureLoader {
    cache: TextureCache,
    base_origin: String,
    jobs: Sender<Job>,
    completed: Receiver<Completed>,
}

impl TextureLoader {
    pub fn new(source: Arc<dyn TextureSource>, base_origin: impl Into<String>, workers: usize) -> Self {
        let (jobs, job_rx) = unbounded::<Job>();
        let (done_tx, completed) = unbounded::<Completed>();

        for i in 0..workers.max(1) {
            let job_rx = job_rx.clone();
            let done_tx = done_tx.clone();
            let source = Arc::clone(&source);
            let spawned = thread::Builder::new()
                .name(format!("texture-loader-{i}"))
                .spawn(move || worker(&*source, &job_rx, &done_tx));
            if let Err(e) = spawned {
                tracing::warn!(worker = i, error = %e, "failed to spawn texture worker");
            }
        }

        Self {
            cache: TextureCache::new(),
            base_origin: base_origin.into(),
            jobs,
            completed,
        }
    }

    pub fn cache(&self) -> &TextureCache {
        &self.cache
    }

    pub fn state(&self, url: &str) -> Option<LoadState> {
        self.cache.state(url)
    }

    pub fn texture(&self, handle: TextureHandle) -> Option<&TextureData> {
        self.cache.texture(handle)
    }

    /// Start loading `url` unless it is already known. Keyed by the URL as
    /// given; resolution against the base origin happens here.
    pub fn request(&mut self, url: &str) -> LoadState {
        if !self.cache.mark_pending(url) {
            return self.cache.state(url).unwrap_or(LoadState::Pending);
        }
        let Some(location) = resolve_image_url(&self.base_origin, url) else {
            self.cache.mark_failed(url);
            return LoadState::Failed;
        };
        tracing::debug!(url, %location, "texture requested");
        let job = Job {
            url: url.to_string(),
            location,
        };
        if self.jobs.send(job).is_err() {
            tracing::warn!(url, "texture workers gone");
            self.cache.mark_failed(url);
            return LoadState::Failed;
        }
        LoadState::Pending
    }

    pub fn request_all<'a>(&mut self, urls: impl IntoIterator<Item = &'a str>) {
        for url in urls {
            self.request(url);
        }
    }

    /// Move finished loads into the cache. Returns handles that became ready.
    pub fn poll(&mut self) -> Vec<TextureHandle> {
        let mut ready = Vec::new();
        if self.completed.is_empty() {
            return ready;
        }
        let span = tracing::info_span!(
            "texture_poll",
            drained = tracing::field::Empty,
            ready = tracing::field::Empty
        );
        let _guard = span.enter();
        let mut drained = 0usize;
        while let Ok(done) = self.completed.try_recv() {
            drained += 1;
            match done.result {
                Ok(data) => {
                    let handle = self.cache.insert(&done.url, data);
                    tracing::debug!(url = %done.url, ?handle, "texture ready");
                    ready.push(handle);
                }
                Err(e) => {
                    tracing::warn!(url = %done.url, error = %e, "texture load failed; keeping placeholder");
                    self.cache.mark_failed(&done.url);
                }
            }
        }
        span.record("drained", drained);
        span.record("ready", ready.len());
        tracing::debug!(pending = self.cache.pending(), "texture batch applied");
        ready
    }
}

fn worker(source: &dyn TextureSource, jobs: &Receiver<Job>, done: &Sender<Completed>) {
    for job in jobs.iter() {
        let result = source
            .fetch(&job.location)
            .and_then(|bytes| TextureData::decode(&bytes));
        if done.send(Completed { url: job.url, result }).is_err() {
            return;
        }
    }
}
