//! Create/edit book form overlay.
//!
//! One form for both operations: `editing` carries the target id for
//! updates. Submission validates locally (price must parse non-negative),
//! then spawns the multipart round trip. On a backend failure the form
//! stays open with the detail message and all entered data retained.

use bookverse_core::catalog::{Book, BookDraft};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Color;

use super::OverlayUpdate;
use super::render_utils::{
    FieldLine, InputHint, calculate_overlay_area, render_field_line, render_hints,
    render_overlay_container, render_status_line,
};
use crate::effects::UiEffect;
use crate::state::TuiState;

const FIELD_LABELS: [&str; 7] = [
    "Title",
    "Author",
    "Description",
    "Price",
    "Category",
    "CTA text",
    "Cover path",
];

/// Index of the featured toggle row (after the text fields).
const FEATURED_ROW: usize = FIELD_LABELS.len();

/// State for the book form overlay.
#[derive(Debug)]
pub struct BookFormState {
    /// Target book id when editing; None when creating.
    pub editing: Option<String>,
    values: [String; 7],
    pub is_featured: bool,
    focus: usize,
    pub error: Option<String>,
    pub submitting: bool,
}

impl BookFormState {
    /// Opens an empty form for a new book.
    pub fn open_new(categories: &[String]) -> Self {
        let mut values: [String; 7] = Default::default();
        values[5] = bookverse_core::catalog::DEFAULT_CTA_TEXT.to_string();
        if let Some(first) = categories.first() {
            values[4].clone_from(first);
        }
        Self {
            editing: None,
            values,
            is_featured: false,
            focus: 0,
            error: None,
            submitting: false,
        }
    }

    /// Opens the form pre-filled from an existing book.
    pub fn open_edit(book: &Book) -> Self {
        let draft = BookDraft::from_book(book);
        Self {
            editing: Some(book.id.clone()),
            values: [
                draft.title,
                draft.author,
                draft.description,
                format_price(book.price),
                draft.category,
                draft.cta_button_text,
                String::new(),
            ],
            is_featured: draft.is_featured,
            focus: 0,
            error: None,
            submitting: false,
        }
    }

    /// Marks the submission failed and re-arms the form (values retained).
    pub fn fail(&mut self, message: String) {
        self.submitting = false;
        self.error = Some(message);
    }

    fn row_count() -> usize {
        FIELD_LABELS.len() + 1 // text fields + featured toggle
    }

    fn focus_next(&mut self, forward: bool) {
        let rows = Self::row_count();
        self.focus = if forward {
            (self.focus + 1) % rows
        } else {
            (self.focus + rows - 1) % rows
        };
    }

    /// Builds the draft, or reports the first validation problem.
    fn build_draft(&self) -> Result<BookDraft, String> {
        let [title, author, description, price, category, cta, cover] = &self.values;

        if title.trim().is_empty() {
            return Err("Title cannot be empty".to_string());
        }
        if author.trim().is_empty() {
            return Err("Author cannot be empty".to_string());
        }
        if category.trim().is_empty() {
            return Err("Category cannot be empty".to_string());
        }
        let price: f64 = price
            .trim()
            .parse()
            .map_err(|_| "Price must be a number".to_string())?;
        if price < 0.0 || !price.is_finite() {
            return Err("Price must be non-negative".to_string());
        }

        let cta = cta.trim();
        Ok(BookDraft {
            title: title.trim().to_string(),
            author: author.trim().to_string(),
            description: description.trim().to_string(),
            price,
            category: category.trim().to_string(),
            is_featured: self.is_featured,
            cta_button_text: if cta.is_empty() {
                bookverse_core::catalog::DEFAULT_CTA_TEXT.to_string()
            } else {
                cta.to_string()
            },
            cover_image: {
                let path = cover.trim();
                if path.is_empty() {
                    None
                } else {
                    Some(path.into())
                }
            },
        })
    }

    pub fn handle_key(&mut self, _tui: &TuiState, key: KeyEvent) -> OverlayUpdate {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        if !matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            self.error = None;
        }

        match key.code {
            KeyCode::Esc => OverlayUpdate::close(),
            KeyCode::Char('c') if ctrl => OverlayUpdate::close(),
            KeyCode::Tab | KeyCode::Down => {
                self.focus_next(true);
                OverlayUpdate::stay()
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus_next(false);
                OverlayUpdate::stay()
            }
            KeyCode::Char(' ') if self.focus == FEATURED_ROW => {
                self.is_featured = !self.is_featured;
                OverlayUpdate::stay()
            }
            KeyCode::Enter => {
                if self.submitting {
                    self.error = Some("Saving...".to_string());
                    return OverlayUpdate::stay();
                }
                match self.build_draft() {
                    Ok(draft) => {
                        self.submitting = true;
                        OverlayUpdate::stay().with_effects(vec![UiEffect::SaveBook {
                            editing: self.editing.clone(),
                            draft,
                        }])
                    }
                    Err(problem) => {
                        self.error = Some(problem);
                        OverlayUpdate::stay()
                    }
                }
            }
            KeyCode::Backspace => {
                if self.focus < FEATURED_ROW {
                    self.values[self.focus].pop();
                }
                OverlayUpdate::stay()
            }
            KeyCode::Char(c) if !ctrl => {
                if self.focus < FEATURED_ROW {
                    self.values[self.focus].push(c);
                }
                OverlayUpdate::stay()
            }
            _ => OverlayUpdate::stay(),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let title = match &self.editing {
            Some(_) => "Edit Book",
            None => "New Book",
        };
        let height = Self::row_count() as u16 + 5;
        let popup = calculate_overlay_area(area, 60, height);
        let inner = render_overlay_container(frame, popup, title, Color::Magenta);

        let mut y = inner.y;
        for (i, label) in FIELD_LABELS.iter().enumerate() {
            render_field_line(
                frame,
                Rect::new(inner.x, y, inner.width, 1),
                &FieldLine {
                    label,
                    value: &self.values[i],
                    focused: self.focus == i,
                    masked: false,
                },
            );
            y += 1;
        }

        let featured_value = if self.is_featured { "[x]" } else { "[ ]" };
        render_field_line(
            frame,
            Rect::new(inner.x, y, inner.width, 1),
            &FieldLine {
                label: "Featured",
                value: featured_value,
                focused: self.focus == FEATURED_ROW,
                masked: false,
            },
        );

        let help = if self.submitting {
            "Saving..."
        } else {
            "Enter to save; Space toggles Featured"
        };
        render_status_line(
            frame,
            Rect::new(inner.x, y + 2, inner.width, 1),
            self.error.as_deref(),
            help,
        );

        let hints = [
            InputHint::new("Enter", "save"),
            InputHint::new("Tab", "next"),
            InputHint::new("Esc", "cancel"),
        ];
        render_hints(
            frame,
            Rect::new(inner.x, inner.y + inner.height.saturating_sub(1), inner.width, 1),
            &hints,
        );
    }
}

/// Formats a price for the edit field without trailing noise.
fn format_price(price: f64) -> String {
    if (price.fract()).abs() < f64::EPSILON {
        format!("{price:.0}")
    } else {
        format!("{price}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlays::OverlayTransition;
    use crate::update::tests_support::{bare_tui, sample_book};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn filled_form() -> BookFormState {
        let mut form = BookFormState::open_new(&["Fiction".to_string()]);
        form.values[0] = "Dune".to_string();
        form.values[1] = "Frank Herbert".to_string();
        form.values[2] = "Sand.".to_string();
        form.values[3] = "14.99".to_string();
        form
    }

    /// Test: open_new seeds category and CTA defaults.
    #[test]
    fn test_open_new_defaults() {
        let form = BookFormState::open_new(&["Fiction".to_string()]);
        assert_eq!(form.values[4], "Fiction");
        assert_eq!(form.values[5], "Buy Now");
        assert!(form.editing.is_none());
    }

    /// Test: open_edit pre-fills from the book and targets its id.
    #[test]
    fn test_open_edit_prefills() {
        let book = sample_book("b1", "Dune", "Fiction", true);
        let form = BookFormState::open_edit(&book);
        assert_eq!(form.editing.as_deref(), Some("b1"));
        assert_eq!(form.values[0], "Dune");
        assert!(form.is_featured);
    }

    /// Test: a bad price is rejected locally with the form left open.
    #[test]
    fn test_invalid_price_rejected() {
        let tui = bare_tui();
        let mut form = filled_form();
        form.values[3] = "free".to_string();

        let update = form.handle_key(&tui, key(KeyCode::Enter));
        assert!(matches!(update.transition, OverlayTransition::Stay));
        assert!(update.effects.is_empty());
        assert_eq!(form.error.as_deref(), Some("Price must be a number"));

        form.values[3] = "-2".to_string();
        form.handle_key(&tui, key(KeyCode::Enter));
        assert_eq!(form.error.as_deref(), Some("Price must be non-negative"));
    }

    /// Test: a valid submit emits SaveBook with the parsed draft.
    #[test]
    fn test_valid_submit_emits_save() {
        let tui = bare_tui();
        let mut form = filled_form();

        let update = form.handle_key(&tui, key(KeyCode::Enter));
        assert!(form.submitting);
        match &update.effects[0] {
            UiEffect::SaveBook { editing, draft } => {
                assert!(editing.is_none());
                assert_eq!(draft.title, "Dune");
                assert!((draft.price - 14.99).abs() < f64::EPSILON);
                assert_eq!(draft.cta_button_text, "Buy Now");
            }
            other => panic!("expected SaveBook, got {other:?}"),
        }
    }

    /// Test: backend failure re-arms the form with values retained.
    #[test]
    fn test_failure_retains_values() {
        let mut form = filled_form();
        form.submitting = true;

        form.fail("Admin access required".to_string());
        assert!(!form.submitting);
        assert_eq!(form.error.as_deref(), Some("Admin access required"));
        assert_eq!(form.values[0], "Dune");
    }
}
