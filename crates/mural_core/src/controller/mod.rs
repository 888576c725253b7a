//! Session controller: owns the recado collection, the view flags and the
//! last built view. One instance per session, driven from a single task.

pub mod actions;
pub mod events;

use std::sync::Arc;

use chrono::{FixedOffset, Local, Offset};
use shared::{
    domain::RecadoId,
    protocol::{NewRecado, Recado},
};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

pub use actions::UiAction;
pub use events::MuralEvent;

use crate::{
    drag::{DragState, Point},
    error::{MuralError, RequiredField},
    sort::{sort_recados, SortCriterion},
    transport::RecadosApi,
    view::{
        apply_flags, build_view, AddDialog, MuralView, ViewFlags, CREATE_FAILED_NOTICE,
        MISSING_FIELDS_NOTICE,
    },
};

const EVENT_CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Loaded,
    Failed(MuralError),
}

#[derive(Debug, Clone)]
pub struct ControllerOptions {
    /// Offset used to display timestamps.
    pub utc_offset: FixedOffset,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            utc_offset: Local::now().offset().fix(),
        }
    }
}

/// Trims both fields and rejects empty ones.
pub fn validate_new_recado(author: &str, body: &str) -> Result<NewRecado, MuralError> {
    let author = author.trim();
    let body = body.trim();
    if author.is_empty() {
        return Err(MuralError::Validation {
            field: RequiredField::Author,
        });
    }
    if body.is_empty() {
        return Err(MuralError::Validation {
            field: RequiredField::Body,
        });
    }
    Ok(NewRecado {
        author: author.to_string(),
        body: body.to_string(),
    })
}

pub struct MuralController {
    api: Arc<dyn RecadosApi>,
    offset: FixedOffset,
    recados: Vec<Recado>,
    sort: SortCriterion,
    load_state: LoadState,
    error_panel: Option<MuralError>,
    sort_menu_open: bool,
    dialog_open: bool,
    dialog_input: AddDialog,
    notice: Option<String>,
    drag: DragState,
    view: MuralView,
    events: broadcast::Sender<MuralEvent>,
}

impl MuralController {
    pub fn new(api: Arc<dyn RecadosApi>, options: ControllerOptions) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let initial_flags = ViewFlags {
            loading: true,
            ..ViewFlags::default()
        };
        Self {
            api,
            offset: options.utc_offset,
            recados: Vec::new(),
            sort: SortCriterion::default(),
            load_state: LoadState::Loading,
            error_panel: None,
            sort_menu_open: false,
            dialog_open: false,
            dialog_input: AddDialog::default(),
            notice: None,
            drag: DragState::default(),
            view: build_view(&[], &initial_flags, &options.utc_offset),
            events,
        }
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<MuralEvent> {
        self.events.subscribe()
    }

    pub fn recados(&self) -> &[Recado] {
        &self.recados
    }

    pub fn view(&self) -> &MuralView {
        &self.view
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn sort_criterion(&self) -> SortCriterion {
        self.sort
    }

    pub fn is_dialog_open(&self) -> bool {
        self.dialog_open
    }

    pub fn dialog_input(&self) -> &AddDialog {
        &self.dialog_input
    }

    /// Single entry point for user interactions.
    pub async fn handle(&mut self, action: UiAction) -> Result<(), MuralError> {
        debug!(action = action.name(), "handling ui action");
        match action {
            UiAction::Load | UiAction::Retry => return self.fetch_all().await,
            UiAction::DismissError => self.dismiss_error(),
            UiAction::ToggleSortMenu => self.toggle_sort_menu(),
            UiAction::CloseSortMenu => self.close_sort_menu(),
            UiAction::ChooseSort(criterion) => self.choose_sort(criterion),
            UiAction::OpenAddDialog => self.open_add_dialog(),
            UiAction::CancelAddDialog | UiAction::ClickDialogBackdrop => self.close_add_dialog(),
            UiAction::EditAuthor(author) => self.set_dialog_author(author),
            UiAction::EditBody(body) => self.set_dialog_body(body),
            UiAction::SubmitAddDialog => return self.submit_add_dialog().await,
            UiAction::AcknowledgeNotice => self.acknowledge_notice(),
            UiAction::DragStart(id) => {
                self.drag_start(id);
            }
            UiAction::DragEnd => self.drag_end(),
            UiAction::Drop {
                pointer,
                container_origin,
            } => {
                self.drop_at(pointer, container_origin);
            }
        }
        Ok(())
    }

    /// Replaces the collection with the server's list and re-renders in the
    /// default order. On failure the collection is left as it was and the
    /// error panel is shown.
    pub async fn fetch_all(&mut self) -> Result<(), MuralError> {
        self.error_panel = None;
        self.load_state = LoadState::Loading;
        self.refresh();

        match self.api.list_recados().await {
            Ok(recados) => {
                info!(count = recados.len(), "fetched recados");
                self.recados = recados;
                self.sort_by(SortCriterion::Recent);
                self.load_state = LoadState::Loaded;
                self.render();
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "failed to fetch recados");
                self.load_state = LoadState::Failed(err.clone());
                self.error_panel = Some(err.clone());
                self.refresh();
                let _ = self.events.send(MuralEvent::FetchFailed(err.clone()));
                Err(err)
            }
        }
    }

    /// Reorders the collection in place; nothing is fetched or rendered.
    pub fn sort_by(&mut self, criterion: SortCriterion) {
        sort_recados(&mut self.recados, criterion);
        self.sort = criterion;
    }

    /// Full clear-and-rebuild of the view. Drag placements are discarded.
    pub fn render(&mut self) -> &MuralView {
        self.drag.reset();
        self.view = build_view(&self.recados, &self.flags(), &self.offset);
        self.publish();
        &self.view
    }

    /// Posts a new recado. On success the dialog is closed and cleared and
    /// the list is fetched again; a failed refetch shows up in the error
    /// panel, not here.
    pub async fn create(&mut self, author: &str, body: &str) -> Result<(), MuralError> {
        let recado = match validate_new_recado(author, body) {
            Ok(recado) => recado,
            Err(err) => {
                debug!(error = %err, "rejected new recado");
                self.raise_notice(MISSING_FIELDS_NOTICE.to_string());
                return Err(err);
            }
        };

        if let Err(err) = self.api.create_recado(&recado).await {
            warn!(error = %err, "failed to create recado");
            self.raise_notice(format!("{CREATE_FAILED_NOTICE}: {err}"));
            return Err(err);
        }

        info!(author = %recado.author, "created recado");
        self.dialog_open = false;
        self.dialog_input = AddDialog::default();
        let _ = self.fetch_all().await;
        Ok(())
    }

    pub async fn submit_add_dialog(&mut self) -> Result<(), MuralError> {
        let AddDialog { author, body } = self.dialog_input.clone();
        self.create(&author, &body).await
    }

    pub fn dismiss_error(&mut self) {
        self.error_panel = None;
        self.refresh();
    }

    pub fn toggle_sort_menu(&mut self) {
        self.sort_menu_open = !self.sort_menu_open;
        self.refresh();
    }

    pub fn close_sort_menu(&mut self) {
        if self.sort_menu_open {
            self.sort_menu_open = false;
            self.refresh();
        }
    }

    /// Sort menu pick: sort, re-render, close the menu.
    pub fn choose_sort(&mut self, criterion: SortCriterion) {
        self.sort_by(criterion);
        self.sort_menu_open = false;
        self.render();
    }

    pub fn open_add_dialog(&mut self) {
        self.dialog_open = true;
        self.refresh();
    }

    /// Cancel button and backdrop click. Typed input is kept.
    pub fn close_add_dialog(&mut self) {
        self.dialog_open = false;
        self.refresh();
    }

    pub fn set_dialog_author(&mut self, author: String) {
        self.dialog_input.author = author;
        self.refresh();
    }

    pub fn set_dialog_body(&mut self, body: String) {
        self.dialog_input.body = body;
        self.refresh();
    }

    pub fn acknowledge_notice(&mut self) {
        self.notice = None;
        self.refresh();
    }

    pub fn drag_start(&mut self, id: RecadoId) -> bool {
        let started = self.drag.start(&mut self.view, id);
        if started {
            self.publish();
        }
        started
    }

    pub fn drop_at(&mut self, pointer: Point, container_origin: Point) -> bool {
        let dropped = self.drag.drop_at(&mut self.view, pointer, container_origin);
        if dropped {
            self.publish();
        }
        dropped
    }

    pub fn drag_end(&mut self) {
        self.drag.end(&mut self.view);
        self.publish();
    }

    fn raise_notice(&mut self, notice: String) {
        self.notice = Some(notice.clone());
        self.refresh();
        let _ = self.events.send(MuralEvent::Notice(notice));
    }

    fn flags(&self) -> ViewFlags {
        ViewFlags {
            loading: self.load_state == LoadState::Loading,
            error_message: self.error_panel.as_ref().map(ToString::to_string),
            sort_menu_open: self.sort_menu_open,
            sort: self.sort,
            add_dialog: self.dialog_open.then(|| self.dialog_input.clone()),
            notice: self.notice.clone(),
        }
    }

    /// Updates everything but the list items.
    fn refresh(&mut self) {
        let flags = self.flags();
        apply_flags(&mut self.view, &flags);
        self.publish();
    }

    fn publish(&self) {
        let _ = self.events.send(MuralEvent::ViewChanged(self.view.clone()));
    }
}

#[cfg(test)]
#[path = "../tests/controller_tests.rs"]
mod tests;
