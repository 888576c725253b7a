//! Notifications published to the rendering adapter.

use crate::{error::MuralError, view::MuralView};

#[derive(Debug, Clone)]
pub enum MuralEvent {
    ViewChanged(MuralView),
    FetchFailed(MuralError),
    Notice(String),
}
