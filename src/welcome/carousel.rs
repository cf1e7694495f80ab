//! Paged navigation for the content view.

use std::time::Duration;

use crate::debounce::Debounced;

/// Navigation clicks closer together than this are dropped
pub const NAVIGATION_DEBOUNCE: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Links,
    Apps,
}

impl Page {
    pub fn title(self) -> &'static str {
        match self {
            Page::Links => "Community & resources",
            Page::Apps => "Applications",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Carousel {
    pages: Vec<Page>,
    position: usize,
}

impl Carousel {
    pub fn new(pages: Vec<Page>) -> Self {
        Self { pages, position: 0 }
    }

    pub fn current(&self) -> Option<Page> {
        self.pages.get(self.position).copied()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn has_previous(&self) -> bool {
        self.position > 0
    }

    pub fn has_next(&self) -> bool {
        self.position + 1 < self.pages.len()
    }

    /// Scroll one page forward; stays put on the last page.
    pub fn next(&mut self) -> usize {
        if self.has_next() {
            self.position += 1;
        }
        self.position
    }

    pub fn previous(&mut self) -> usize {
        if self.has_previous() {
            self.position -= 1;
        }
        self.position
    }
}

type NavigateFn = fn(&mut Carousel) -> usize;

/// Debounced next/previous handlers, one guard per direction.
pub struct Navigation {
    pub next: Debounced<NavigateFn>,
    pub previous: Debounced<NavigateFn>,
}

impl Navigation {
    pub fn new(wait: Duration) -> Self {
        Self {
            next: Debounced::new(wait, Carousel::next as NavigateFn),
            previous: Debounced::new(wait, Carousel::previous as NavigateFn),
        }
    }
}

impl Default for Navigation {
    fn default() -> Self {
        Self::new(NAVIGATION_DEBOUNCE)
    }
}
