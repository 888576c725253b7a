//! User interactions the controller reacts to.

use shared::domain::RecadoId;

use crate::{drag::Point, sort::SortCriterion};

#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    /// Page is ready; first fetch.
    Load,
    Retry,
    DismissError,
    ToggleSortMenu,
    /// Click anywhere outside the sort menu.
    CloseSortMenu,
    ChooseSort(SortCriterion),
    OpenAddDialog,
    CancelAddDialog,
    ClickDialogBackdrop,
    EditAuthor(String),
    EditBody(String),
    SubmitAddDialog,
    AcknowledgeNotice,
    DragStart(RecadoId),
    DragEnd,
    Drop {
        pointer: Point,
        container_origin: Point,
    },
}

impl UiAction {
    pub fn name(&self) -> &'static str {
        match self {
            UiAction::Load => "load",
            UiAction::Retry => "retry",
            UiAction::DismissError => "dismiss_error",
            UiAction::ToggleSortMenu => "toggle_sort_menu",
            UiAction::CloseSortMenu => "close_sort_menu",
            UiAction::ChooseSort(_) => "choose_sort",
            UiAction::OpenAddDialog => "open_add_dialog",
            UiAction::CancelAddDialog => "cancel_add_dialog",
            UiAction::ClickDialogBackdrop => "click_dialog_backdrop",
            UiAction::EditAuthor(_) => "edit_author",
            UiAction::EditBody(_) => "edit_body",
            UiAction::SubmitAddDialog => "submit_add_dialog",
            UiAction::AcknowledgeNotice => "acknowledge_notice",
            UiAction::DragStart(_) => "drag_start",
            UiAction::DragEnd => "drag_end",
            UiAction::Drop { .. } => "drop",
        }
    }
}
