//! Plain-text rendering adapter for the terminal.

use mural_core::MuralView;

const LOADING_TEXT: &str = "Carregando recados...";
const EMPTY_TEXT: &str = "Nenhum recado no mural.";

pub fn render_text(view: &MuralView) -> String {
    let mut out = String::new();

    if let Some(notice) = &view.notice {
        out.push_str(&format!("! {notice}\n\n"));
    }

    if view.loading {
        out.push_str(LOADING_TEXT);
        out.push('\n');
    } else if view.items.is_empty() && view.error_panel.is_none() {
        out.push_str(EMPTY_TEXT);
        out.push('\n');
    }

    for node in &view.items {
        out.push_str(&format!("{} · {}\n", node.author, node.timestamp));
        for line in node.body.lines() {
            out.push_str(&format!("    {line}\n"));
        }
        out.push('\n');
    }

    if let Some(panel) = &view.error_panel {
        out.push_str(&format!(
            "== {} ==\n{}\n[{}]\n",
            panel.title, panel.message, panel.retry_label
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use chrono::FixedOffset;
    use mural_core::view::{
        build_view, ViewFlags, ERROR_PANEL_TITLE, MISSING_FIELDS_NOTICE, RETRY_LABEL,
    };
    use shared::{
        domain::{CreatedAt, RecadoId},
        protocol::Recado,
    };

    use super::*;

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).expect("utc")
    }

    #[test]
    fn renders_author_timestamp_and_indented_body() {
        let recados = vec![Recado {
            id: RecadoId::from(1),
            author: "Ana".to_string(),
            body: "Bom dia\nmural".to_string(),
            created_at: CreatedAt::parse("2024-01-02T10:30:00Z"),
        }];
        let view = build_view(&recados, &ViewFlags::default(), &utc());

        assert_eq!(
            render_text(&view),
            "Ana · 02/01/2024, 10:30\n    Bom dia\n    mural\n\n"
        );
    }

    #[test]
    fn renders_loading_and_empty_states() {
        let loading = ViewFlags {
            loading: true,
            ..ViewFlags::default()
        };
        assert_eq!(
            render_text(&build_view(&[], &loading, &utc())),
            format!("{LOADING_TEXT}\n")
        );
        assert_eq!(
            render_text(&build_view(&[], &ViewFlags::default(), &utc())),
            format!("{EMPTY_TEXT}\n")
        );
    }

    #[test]
    fn renders_error_panel_and_notice() {
        let flags = ViewFlags {
            error_message: Some("request failed: 500 Internal Server Error".to_string()),
            notice: Some(MISSING_FIELDS_NOTICE.to_string()),
            ..ViewFlags::default()
        };
        let text = render_text(&build_view(&[], &flags, &utc()));

        assert!(text.starts_with(&format!("! {MISSING_FIELDS_NOTICE}")));
        assert!(text.contains(&format!("== {ERROR_PANEL_TITLE} ==")));
        assert!(text.contains(&format!("[{RETRY_LABEL}]")));
        assert!(!text.contains(EMPTY_TEXT));
    }
}
