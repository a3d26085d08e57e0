//! Incrementally loaded image reel with prefetch-ahead.

/// Filename used when an image URL has no usable last segment.
pub const FALLBACK_FILE_NAME: &str = "image.jpg";

/// Outcome of stepping forward in the reel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    Moved,
    /// At the end; the caller should fetch another batch.
    FetchMore,
    /// At the end with a batch already in flight.
    Waiting,
}

#[derive(Debug, Clone)]
pub struct ImageReel {
    images: Vec<String>,
    cursor: usize,
    loading: bool,
    prefetch_distance: usize,
}

impl ImageReel {
    pub fn new(prefetch_distance: usize) -> Self {
        Self {
            images: Vec::new(),
            cursor: 0,
            loading: false,
            prefetch_distance,
        }
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn current(&self) -> Option<&str> {
        self.images.get(self.cursor).map(String::as_str)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Mark a batch as in flight. Returns `false` when a non-initial
    /// request arrives while another batch is already loading.
    pub fn begin_load(&mut self, initial: bool) -> bool {
        if !initial && self.loading {
            return false;
        }
        self.loading = true;
        true
    }

    /// Apply a fetched batch: the initial batch replaces, later ones append.
    pub fn complete_load(&mut self, batch: Vec<String>, initial: bool) {
        self.loading = false;
        if initial {
            self.images = batch;
            self.cursor = 0;
        } else {
            self.images.extend(batch);
        }
    }

    /// Clear the in-flight flag after a failed fetch. Loaded images stay.
    pub fn fail_load(&mut self) {
        self.loading = false;
    }

    pub fn next(&mut self) -> Advance {
        if self.cursor + 1 < self.images.len() {
            self.cursor += 1;
            Advance::Moved
        } else if self.loading {
            Advance::Waiting
        } else {
            Advance::FetchMore
        }
    }

    pub fn previous(&mut self) -> bool {
        if self.cursor > 0 {
            self.cursor -= 1;
            true
        } else {
            false
        }
    }

    /// Whether the cursor is close enough to the end to fetch ahead.
    pub fn needs_prefetch(&self) -> bool {
        !self.loading
            && !self.images.is_empty()
            && self.cursor + self.prefetch_distance >= self.images.len()
    }
}

/// Download filename for an image URL: the last path segment without query.
pub fn file_name(url: &str) -> &str {
    url.rsplit('/')
        .next()
        .and_then(|last| last.split('?').next())
        .filter(|name| !name.is_empty())
        .unwrap_or(FALLBACK_FILE_NAME)
}
