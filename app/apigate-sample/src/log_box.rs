//! Text area showing the latest trace.

use std::sync::{Arc, Mutex, PoisonError};

use apigate::LogSink;

/// Text shown before the first call.
pub const PLACEHOLDER: &str = "Press \"Call me\" button to get API response";

/// Shared text area. Every published text replaces the previous one.
#[derive(Debug, Clone, Default)]
pub struct LogBox {
    text: Arc<Mutex<String>>,
    echo: bool,
}

impl LogBox {
    /// A log box that prints every update to stdout.
    pub fn echoing() -> Self {
        Self {
            echo: true,
            ..Self::default()
        }
    }

    /// Current content, or the placeholder while it is empty.
    pub fn render(&self) -> String {
        let text = self.text.lock().unwrap_or_else(PoisonError::into_inner);
        if text.is_empty() {
            PLACEHOLDER.to_string()
        } else {
            text.clone()
        }
    }

    fn print(&self) {
        if self.echo {
            println!("{}\n", self.render());
        }
    }
}

impl LogSink for LogBox {
    fn publish(&self, text: String) {
        *self.text.lock().unwrap_or_else(PoisonError::into_inner) = text;
        self.print();
    }
}
