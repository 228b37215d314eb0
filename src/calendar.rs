use crate::config::Config;
use crate::diagnostics::{Diagnostics, LogDiagnostics};
use crate::interpreter::{Interpreter, DEFAULT_MAX_INCLUDE_DEPTH};
use crate::page::{CalendarPage, MAX_BOX_HEIGHT, MAX_BOX_WIDTH};
use crate::render::render;
use crate::source::{FsSource, Source};

/// A page together with where its description files come from.
pub struct Calendar {
    page: CalendarPage,
    source: Box<dyn Source>,
    max_include_depth: usize,
}

impl Calendar {
    pub fn new(page: CalendarPage) -> Self {
        Calendar {
            page,
            source: Box::new(FsSource::default()),
            max_include_depth: DEFAULT_MAX_INCLUDE_DEPTH,
        }
    }

    pub fn from_config(config: &Config, mut page: CalendarPage) -> Self {
        page.box_width = config.box_width.min(MAX_BOX_WIDTH);
        page.box_height = config.box_height.min(MAX_BOX_HEIGHT);

        let calendar = Self::new(page).with_max_include_depth(config.max_include_depth);

        match &config.include_root {
            Some(root) => calendar.with_source(FsSource::new(root)),
            None => calendar,
        }
    }

    pub fn with_source(mut self, source: impl Source + 'static) -> Self {
        self.source = Box::new(source);
        self
    }

    pub fn with_max_include_depth(mut self, depth: usize) -> Self {
        self.max_include_depth = depth;
        self
    }

    /// Applies the directives of `path` to the page.
    pub fn load(&mut self, path: &str, diagnostics: &mut dyn Diagnostics) -> &CalendarPage {
        Interpreter::new(&*self.source, diagnostics)
            .max_include_depth(self.max_include_depth)
            .process(path, &mut self.page);
        &self.page
    }

    pub fn render(&self) -> String {
        render(&self.page)
    }

    pub fn render_file(mut self, path: &str, diagnostics: &mut dyn Diagnostics) -> String {
        self.load(path, diagnostics);
        self.render()
    }
}

/// Renders the description file at `path` for the current month. An empty
/// path renders an empty calendar.
pub fn calendar(path: &str) -> String {
    Calendar::new(CalendarPage::for_today()).render_file(path, &mut LogDiagnostics)
}
