use std::collections::VecDeque;

use super::*;
use async_trait::async_trait;
use shared::domain::CreatedAt;
use tokio::sync::Mutex;

use crate::view::{Placement, ERROR_PANEL_TITLE};

#[derive(Default)]
struct FakeRecadosApi {
    list_responses: Mutex<VecDeque<Result<Vec<Recado>, MuralError>>>,
    create_responses: Mutex<VecDeque<Result<(), MuralError>>>,
    list_calls: Mutex<u32>,
    created: Mutex<Vec<NewRecado>>,
}

impl FakeRecadosApi {
    async fn push_list(&self, response: Result<Vec<Recado>, MuralError>) {
        self.list_responses.lock().await.push_back(response);
    }

    async fn push_create(&self, response: Result<(), MuralError>) {
        self.create_responses.lock().await.push_back(response);
    }

    async fn list_calls(&self) -> u32 {
        *self.list_calls.lock().await
    }

    async fn created(&self) -> Vec<NewRecado> {
        self.created.lock().await.clone()
    }
}

#[async_trait]
impl RecadosApi for FakeRecadosApi {
    async fn list_recados(&self) -> Result<Vec<Recado>, MuralError> {
        *self.list_calls.lock().await += 1;
        self.list_responses
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn create_recado(&self, recado: &NewRecado) -> Result<(), MuralError> {
        self.created.lock().await.push(recado.clone());
        self.create_responses
            .lock()
            .await
            .pop_front()
            .unwrap_or(Ok(()))
    }
}

fn recado(id: i64, author: &str, created_at: &str) -> Recado {
    Recado {
        id: RecadoId::from(id),
        author: author.to_string(),
        body: format!("mensagem {id}"),
        created_at: CreatedAt::parse(created_at),
    }
}

fn two_recados() -> Vec<Recado> {
    vec![recado(2, "A", "2024-01-01"), recado(1, "B", "2024-01-02")]
}

fn controller_with(api: &Arc<FakeRecadosApi>) -> MuralController {
    let api: Arc<dyn RecadosApi> = api.clone();
    MuralController::new(
        api,
        ControllerOptions {
            utc_offset: FixedOffset::east_opt(0).expect("utc"),
        },
    )
}

fn ids(controller: &MuralController) -> Vec<String> {
    controller.recados().iter().map(|r| r.id.to_string()).collect()
}

fn authors(controller: &MuralController) -> Vec<String> {
    controller.recados().iter().map(|r| r.author.clone()).collect()
}

fn server_error() -> MuralError {
    MuralError::Http {
        status: 500,
        reason: "Internal Server Error".to_string(),
    }
}

#[tokio::test]
async fn starts_in_loading_state() {
    let api = Arc::new(FakeRecadosApi::default());
    let controller = controller_with(&api);

    assert_eq!(controller.load_state(), &LoadState::Loading);
    assert!(controller.view().loading);
    assert!(controller.view().items.is_empty());
    assert_eq!(api.list_calls().await, 0);
}

#[tokio::test]
async fn fetch_applies_default_recent_order_then_user_sorts() {
    let api = Arc::new(FakeRecadosApi::default());
    api.push_list(Ok(two_recados())).await;
    let mut controller = controller_with(&api);

    controller.handle(UiAction::Load).await.expect("load");
    assert_eq!(controller.load_state(), &LoadState::Loaded);
    assert_eq!(ids(&controller), vec!["1", "2"]);
    assert!(!controller.view().loading);

    controller.sort_by(SortCriterion::Alphabetical);
    assert_eq!(authors(&controller), vec!["A", "B"]);

    controller.sort_by(SortCriterion::Recent);
    assert_eq!(ids(&controller), vec!["1", "2"]);
    assert_eq!(api.list_calls().await, 1);
}

#[tokio::test]
async fn sort_by_does_not_render() {
    let api = Arc::new(FakeRecadosApi::default());
    api.push_list(Ok(two_recados())).await;
    let mut controller = controller_with(&api);
    controller.fetch_all().await.expect("fetch");

    controller.sort_by(SortCriterion::Oldest);
    let rendered: Vec<&str> = controller
        .view()
        .items
        .iter()
        .map(|node| node.id.as_str())
        .collect();
    assert_eq!(rendered, vec!["1", "2"]);

    controller.render();
    let rendered: Vec<&str> = controller
        .view()
        .items
        .iter()
        .map(|node| node.id.as_str())
        .collect();
    assert_eq!(rendered, vec!["2", "1"]);
}

#[tokio::test]
async fn choosing_sort_renders_and_closes_menu() {
    let api = Arc::new(FakeRecadosApi::default());
    api.push_list(Ok(two_recados())).await;
    let mut controller = controller_with(&api);
    controller.fetch_all().await.expect("fetch");

    controller.handle(UiAction::ToggleSortMenu).await.expect("toggle");
    assert!(controller.view().sort_menu.open);

    controller
        .handle(UiAction::ChooseSort(SortCriterion::Alphabetical))
        .await
        .expect("choose");
    assert!(!controller.view().sort_menu.open);
    assert_eq!(controller.sort_criterion(), SortCriterion::Alphabetical);
    let rendered: Vec<&str> = controller
        .view()
        .items
        .iter()
        .map(|node| node.author.as_str())
        .collect();
    assert_eq!(rendered, vec!["A", "B"]);
}

#[tokio::test]
async fn outside_click_closes_sort_menu() {
    let api = Arc::new(FakeRecadosApi::default());
    let mut controller = controller_with(&api);

    controller.toggle_sort_menu();
    assert!(controller.view().sort_menu.open);
    controller.handle(UiAction::CloseSortMenu).await.expect("close");
    assert!(!controller.view().sort_menu.open);
}

#[tokio::test]
async fn failed_fetch_keeps_collection_and_shows_retryable_panel() {
    let api = Arc::new(FakeRecadosApi::default());
    api.push_list(Ok(two_recados())).await;
    api.push_list(Err(server_error())).await;
    api.push_list(Ok(vec![recado(3, "C", "2024-02-01")])).await;
    let mut controller = controller_with(&api);

    controller.fetch_all().await.expect("first fetch");
    let before = controller.recados().to_vec();

    let err = controller.fetch_all().await.expect_err("must fail");
    assert_eq!(err, server_error());
    assert_eq!(controller.recados(), before.as_slice());
    assert_eq!(controller.view().items.len(), 2);
    assert!(!controller.view().loading);
    assert_eq!(controller.load_state(), &LoadState::Failed(server_error()));
    let panel = controller.view().error_panel.clone().expect("panel");
    assert_eq!(panel.title, ERROR_PANEL_TITLE);
    assert!(panel.message.contains("500"));

    controller.handle(UiAction::Retry).await.expect("retry");
    assert_eq!(api.list_calls().await, 3);
    assert!(controller.view().error_panel.is_none());
    assert_eq!(ids(&controller), vec!["3"]);
}

#[tokio::test]
async fn error_panel_is_dismissible() {
    let api = Arc::new(FakeRecadosApi::default());
    api.push_list(Err(MuralError::Network("connection refused".to_string())))
        .await;
    let mut controller = controller_with(&api);

    let _ = controller.fetch_all().await;
    assert!(controller.view().error_panel.is_some());

    controller.handle(UiAction::DismissError).await.expect("dismiss");
    assert!(controller.view().error_panel.is_none());
    assert!(matches!(controller.load_state(), LoadState::Failed(_)));
}

#[tokio::test]
async fn create_with_empty_author_never_calls_the_api() {
    let api = Arc::new(FakeRecadosApi::default());
    let mut controller = controller_with(&api);
    let mut events = controller.subscribe_events();

    let err = controller.create("", "hello").await.expect_err("must fail");
    assert_eq!(
        err,
        MuralError::Validation {
            field: RequiredField::Author
        }
    );
    assert!(api.created().await.is_empty());
    assert_eq!(api.list_calls().await, 0);
    assert_eq!(controller.view().notice.as_deref(), Some(MISSING_FIELDS_NOTICE));

    let mut notices = Vec::new();
    while let Ok(event) = events.try_recv() {
        if let MuralEvent::Notice(notice) = event {
            notices.push(notice);
        }
    }
    assert_eq!(notices, vec![MISSING_FIELDS_NOTICE.to_string()]);
}

#[tokio::test]
async fn whitespace_only_body_is_rejected() {
    let api = Arc::new(FakeRecadosApi::default());
    let mut controller = controller_with(&api);

    let err = controller.create("Ana", "   \n").await.expect_err("must fail");
    assert_eq!(
        err,
        MuralError::Validation {
            field: RequiredField::Body
        }
    );
    assert!(api.created().await.is_empty());
}

#[tokio::test]
async fn submitting_dialog_posts_trimmed_fields_and_refetches() {
    let api = Arc::new(FakeRecadosApi::default());
    api.push_list(Ok(vec![recado(9, "Ana", "2024-05-01")])).await;
    let mut controller = controller_with(&api);

    controller.handle(UiAction::OpenAddDialog).await.expect("open");
    controller
        .handle(UiAction::EditAuthor("  Ana ".to_string()))
        .await
        .expect("author");
    controller
        .handle(UiAction::EditBody(" Bom dia ".to_string()))
        .await
        .expect("body");
    assert!(controller.view().add_dialog.is_some());

    controller
        .handle(UiAction::SubmitAddDialog)
        .await
        .expect("submit");

    assert_eq!(
        api.created().await,
        vec![NewRecado {
            author: "Ana".to_string(),
            body: "Bom dia".to_string(),
        }]
    );
    assert!(!controller.is_dialog_open());
    assert_eq!(controller.dialog_input(), &AddDialog::default());
    assert!(controller.view().add_dialog.is_none());
    assert_eq!(api.list_calls().await, 1);
    assert_eq!(ids(&controller), vec!["9"]);
}

#[tokio::test]
async fn failed_create_keeps_dialog_input_and_raises_notice() {
    let api = Arc::new(FakeRecadosApi::default());
    api.push_create(Err(MuralError::Http {
        status: 503,
        reason: "Service Unavailable".to_string(),
    }))
    .await;
    let mut controller = controller_with(&api);

    controller.open_add_dialog();
    controller.set_dialog_author("Ana".to_string());
    controller.set_dialog_body("Oi".to_string());
    let err = controller.submit_add_dialog().await.expect_err("must fail");
    assert!(matches!(err, MuralError::Http { status: 503, .. }));

    assert!(controller.is_dialog_open());
    assert_eq!(
        controller.view().add_dialog,
        Some(AddDialog {
            author: "Ana".to_string(),
            body: "Oi".to_string(),
        })
    );
    let notice = controller.view().notice.clone().expect("notice");
    assert!(notice.starts_with(CREATE_FAILED_NOTICE));
    assert_eq!(api.list_calls().await, 0);

    controller
        .handle(UiAction::AcknowledgeNotice)
        .await
        .expect("ack");
    assert!(controller.view().notice.is_none());
    assert!(controller.is_dialog_open());
}

#[tokio::test]
async fn cancel_and_backdrop_close_dialog_but_keep_input() {
    let api = Arc::new(FakeRecadosApi::default());
    let mut controller = controller_with(&api);

    controller.open_add_dialog();
    controller.set_dialog_author("Ana".to_string());
    controller
        .handle(UiAction::ClickDialogBackdrop)
        .await
        .expect("backdrop");
    assert!(controller.view().add_dialog.is_none());
    assert_eq!(controller.dialog_input().author, "Ana");

    controller.open_add_dialog();
    controller
        .handle(UiAction::CancelAddDialog)
        .await
        .expect("cancel");
    assert!(!controller.is_dialog_open());
}

#[tokio::test]
async fn drop_moves_only_the_view_and_render_discards_it() {
    let api = Arc::new(FakeRecadosApi::default());
    api.push_list(Ok(two_recados())).await;
    let mut controller = controller_with(&api);
    controller.fetch_all().await.expect("fetch");

    controller
        .handle(UiAction::DragStart(RecadoId::from(1)))
        .await
        .expect("drag start");
    controller
        .handle(UiAction::Drop {
            pointer: Point::new(300.0, 220.0),
            container_origin: Point::new(20.0, 20.0),
        })
        .await
        .expect("drop");
    controller.handle(UiAction::DragEnd).await.expect("drag end");

    let moved = controller
        .view()
        .items
        .iter()
        .find(|node| node.id == RecadoId::from(1))
        .expect("node");
    assert_eq!(
        moved.placement,
        Some(Placement {
            left: 280.0,
            top: 200.0
        })
    );
    assert_eq!(moved.opacity, 1.0);
    assert_eq!(ids(&controller), vec!["1", "2"]);

    controller.toggle_sort_menu();
    assert!(controller.view().items.iter().any(|node| node.placement.is_some()));

    controller.render();
    assert!(controller.view().items.iter().all(|node| node.placement.is_none()));
}

#[tokio::test]
async fn publishes_view_changes_to_subscribers() {
    let api = Arc::new(FakeRecadosApi::default());
    api.push_list(Ok(two_recados())).await;
    let mut controller = controller_with(&api);
    let mut events = controller.subscribe_events();

    controller.fetch_all().await.expect("fetch");

    match events.recv().await.expect("loading event") {
        MuralEvent::ViewChanged(view) => assert!(view.loading),
        other => panic!("unexpected event: {other:?}"),
    }
    match events.recv().await.expect("rendered event") {
        MuralEvent::ViewChanged(view) => {
            assert!(!view.loading);
            assert_eq!(view.items.len(), 2);
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[tokio::test]
async fn failed_fetch_publishes_error_event() {
    let api = Arc::new(FakeRecadosApi::default());
    api.push_list(Err(server_error())).await;
    let mut controller = controller_with(&api);
    let mut events = controller.subscribe_events();

    let _ = controller.fetch_all().await;

    let mut saw_failure = false;
    while let Ok(event) = events.try_recv() {
        if let MuralEvent::FetchFailed(err) = event {
            assert_eq!(err, server_error());
            saw_failure = true;
        }
    }
    assert!(saw_failure);
}

#[test]
fn validation_trims_fields() {
    let recado = validate_new_recado("  Bia\t", "\n oi ").expect("valid");
    assert_eq!(recado.author, "Bia");
    assert_eq!(recado.body, "oi");
}
