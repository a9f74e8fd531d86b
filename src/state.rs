use crate::figure::Figure;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Outcome of dismissing the figure on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dismissal {
    /// Another figure is now current.
    Next,
    /// That was the last figure.
    Finished,
}

/// The full UI state, independent of rendering.
pub struct AppState {
    /// All figures, in display order.
    figures: Vec<Figure>,

    /// Index of the figure on screen.
    current: usize,

    /// Set once the last figure has been dismissed.
    finished: bool,
}

impl AppState {
    pub fn new(figures: Vec<Figure>) -> Self {
        Self {
            finished: figures.is_empty(),
            figures,
            current: 0,
        }
    }

    /// Figure currently on screen, `None` once everything was dismissed.
    pub fn current(&self) -> Option<&Figure> {
        if self.finished {
            None
        } else {
            self.figures.get(self.current)
        }
    }

    /// 1-based position of the current figure and the total count.
    pub fn position(&self) -> (usize, usize) {
        (self.current + 1, self.figures.len())
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Dismiss the figure on screen and move to the next one.
    pub fn dismiss(&mut self) -> Dismissal {
        if self.finished {
            return Dismissal::Finished;
        }
        if self.current + 1 < self.figures.len() {
            self.current += 1;
            Dismissal::Next
        } else {
            self.finished = true;
            Dismissal::Finished
        }
    }

    /// Window title for the current figure.
    pub fn window_title(&self) -> String {
        match self.current() {
            Some(fig) => {
                let (i, n) = self.position();
                format!("Orbits Plotter – {} ({i}/{n})", fig.title)
            }
            None => "Orbits Plotter".to_string(),
        }
    }
}
