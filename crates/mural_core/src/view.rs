//! Pure view-model construction. A rendering adapter turns a [`MuralView`]
//! into actual UI elements.

use chrono::FixedOffset;
use shared::{
    domain::{CreatedAt, RecadoId},
    protocol::Recado,
};

use crate::sort::SortCriterion;

pub const ERROR_PANEL_TITLE: &str = "Erro ao carregar recados";
pub const RETRY_LABEL: &str = "Tentar Novamente";
pub const MISSING_FIELDS_NOTICE: &str = "Preencha todos os campos!";
pub const CREATE_FAILED_NOTICE: &str = "Erro ao adicionar recado";

/// pt-BR `toLocaleString` with two-digit day/month/hour/minute.
const TIMESTAMP_FORMAT: &str = "%d/%m/%Y, %H:%M";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub left: f64,
    pub top: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecadoNode {
    pub id: RecadoId,
    pub author: String,
    pub timestamp: String,
    pub body: String,
    pub draggable: bool,
    pub opacity: f32,
    /// Absolute position inside the list container, set by a drop.
    pub placement: Option<Placement>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorPanel {
    pub title: String,
    pub message: String,
    pub retry_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortOption {
    pub criterion: SortCriterion,
    pub label: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortMenu {
    pub open: bool,
    pub options: Vec<SortOption>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddDialog {
    pub author: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MuralView {
    pub loading: bool,
    pub items: Vec<RecadoNode>,
    pub error_panel: Option<ErrorPanel>,
    pub sort_menu: SortMenu,
    pub add_dialog: Option<AddDialog>,
    /// Blocking notice the user must acknowledge.
    pub notice: Option<String>,
}

/// Everything outside the list itself.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewFlags {
    pub loading: bool,
    pub error_message: Option<String>,
    pub sort_menu_open: bool,
    pub sort: SortCriterion,
    pub add_dialog: Option<AddDialog>,
    pub notice: Option<String>,
}

pub fn build_view(recados: &[Recado], flags: &ViewFlags, offset: &FixedOffset) -> MuralView {
    let mut view = MuralView {
        loading: false,
        items: recados
            .iter()
            .map(|recado| build_recado_node(recado, offset))
            .collect(),
        error_panel: None,
        sort_menu: build_sort_menu(flags),
        add_dialog: None,
        notice: None,
    };
    apply_flags(&mut view, flags);
    view
}

/// Refreshes the chrome of an existing view without touching its items, so
/// drag placements survive menu, dialog and error panel changes.
pub fn apply_flags(view: &mut MuralView, flags: &ViewFlags) {
    view.loading = flags.loading;
    view.error_panel = flags.error_message.as_ref().map(|message| ErrorPanel {
        title: ERROR_PANEL_TITLE.to_string(),
        message: message.clone(),
        retry_label: RETRY_LABEL.to_string(),
    });
    view.sort_menu = build_sort_menu(flags);
    view.add_dialog = flags.add_dialog.clone();
    view.notice = flags.notice.clone();
}

pub fn build_recado_node(recado: &Recado, offset: &FixedOffset) -> RecadoNode {
    RecadoNode {
        id: recado.id.clone(),
        author: recado.author.clone(),
        timestamp: format_timestamp(&recado.created_at, offset),
        body: recado.body.clone(),
        draggable: true,
        opacity: 1.0,
        placement: None,
    }
}

/// Unknown timestamps are shown as the server sent them.
pub fn format_timestamp(created_at: &CreatedAt, offset: &FixedOffset) -> String {
    match created_at.instant() {
        Some(instant) => instant
            .with_timezone(offset)
            .format(TIMESTAMP_FORMAT)
            .to_string(),
        None => created_at.raw().to_string(),
    }
}

fn build_sort_menu(flags: &ViewFlags) -> SortMenu {
    SortMenu {
        open: flags.sort_menu_open,
        options: SortCriterion::ALL
            .into_iter()
            .map(|criterion| SortOption {
                criterion,
                label: criterion.label().to_string(),
                selected: criterion == flags.sort,
            })
            .collect(),
    }
}
