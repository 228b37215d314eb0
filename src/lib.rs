pub mod calendar;
pub mod config;
pub mod datetime;
pub mod diagnostics;
pub mod error;
pub mod interpreter;
pub mod page;
pub mod render;
pub mod source;
pub mod syntax;
pub mod weekday;

pub use calendar::{calendar, Calendar};
pub use diagnostics::{Diagnostics, LogDiagnostics};
pub use error::{Error, ErrorKind, Result};
pub use page::{CalendarPage, DayBox};
