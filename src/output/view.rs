use crate::consts::GENERIC_ERROR;
use crate::failure::{Failure, normalize};

/// What a data-backed view should show
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ViewState {
    Error(String),
    Empty(String),
    Ready,
}

impl ViewState {
    /// Errors win over emptiness; an error with no usable message shows the
    /// generic retry hint.
    pub(crate) fn resolve<T, F>(result: &Result<T, Failure>, is_empty: F, empty_message: &str) -> Self
    where
        F: FnOnce(&T) -> bool,
    {
        match result {
            Err(failure) => {
                let message = normalize(failure);
                if message.trim().is_empty() {
                    ViewState::Error(GENERIC_ERROR.to_string())
                } else {
                    ViewState::Error(message)
                }
            }
            Ok(data) if is_empty(data) => ViewState::Empty(empty_message.to_string()),
            Ok(_) => ViewState::Ready,
        }
    }

    /// Print the non-ready states; returns true when the caller should render.
    pub(crate) fn print(&self) -> bool {
        match self {
            ViewState::Error(message) => {
                eprintln!("Error: {message}");
                false
            }
            ViewState::Empty(message) => {
                println!("{message}");
                false
            }
            ViewState::Ready => true,
        }
    }
}
