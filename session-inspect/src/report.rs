//! Serializable summaries of what a SessionView derives from a snapshot

use serde::Serialize;
use session_view::{Clock, SessionStatus, SessionView, StateStore, TokenClaims};
use tabled::Tabled;

#[derive(Debug, Clone, PartialEq, Serialize, Tabled)]
pub struct EntityRow {
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Color")]
    pub color: String,
}

/// Everything the view can say about a snapshot, minus the raw token
#[derive(Debug, Serialize)]
pub struct Summary {
    pub entities: Vec<EntityRow>,
    pub token_present: bool,
    pub session: SessionStatus,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub claims: Option<TokenClaims>,
}

/// One row per entity, in list order, each with its own color
pub fn entity_rows<S: StateStore>(state: &S) -> Vec<EntityRow> {
    state
        .entities()
        .iter()
        .map(|e| EntityRow {
            name: e.name.clone(),
            color: e.color.clone(),
        })
        .collect()
}

pub fn summarize<C: Clock, S: StateStore>(view: &SessionView<C>, state: &S) -> Summary {
    let session = view.session_status(state);
    Summary {
        entities: entity_rows(state),
        token_present: !view.current_token(state).is_empty(),
        session,
        valid: session.is_valid(),
        expires_in: view.expires_in(state),
        claims: view.claims(state),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine;
    use session_view::{AppState, Entity, FixedClock};

    fn token_with_exp(exp: i64) -> String {
        let body = URL_SAFE_NO_PAD.encode(serde_json::json!({ "exp": exp }).to_string());
        format!("eyJhbGciOiJIUzI1NiJ9.{}.sig", body)
    }

    #[test]
    fn test_entity_rows_keep_each_color_for_duplicates() {
        let state = AppState::new(vec![Entity::new("x", "red"), Entity::new("x", "blue")], "");
        let rows = entity_rows(&state);
        let colors: Vec<&str> = rows.iter().map(|r| r.color.as_str()).collect();
        assert_eq!(colors, vec!["red", "blue"]);
        assert!(rows.iter().all(|r| r.name == "x"));
    }

    #[test]
    fn test_entity_table_headers() {
        let state = AppState::new(vec![Entity::new("a", "red")], "");
        let table = tabled::Table::new(entity_rows(&state)).to_string();
        assert!(table.contains("Name"));
        assert!(table.contains("Color"));
    }

    #[test]
    fn test_summary_for_valid_session() {
        let state = AppState::new(vec![Entity::new("a", "red")], token_with_exp(1_100));
        let view = SessionView::with_clock(FixedClock(1_000));

        let summary = summarize(&view, &state);
        assert!(summary.token_present);
        assert!(summary.valid);
        assert_eq!(summary.session, SessionStatus::Valid { exp: 1_100 });
        assert_eq!(summary.expires_in, Some(100));
        assert_eq!(summary.claims.map(|c| c.exp), Some(1_100));
    }

    #[test]
    fn test_summary_json_omits_raw_token() {
        let token = token_with_exp(10);
        let state = AppState::new(vec![], token.clone());
        let view = SessionView::with_clock(FixedClock(1_000));

        let json = serde_json::to_string(&summarize(&view, &state)).unwrap();
        assert!(!json.contains(&token));
        assert!(json.contains(r#""status":"expired""#));
        assert!(json.contains(r#""valid":false"#));
    }

    #[test]
    fn test_summary_without_token() {
        let view = SessionView::with_clock(FixedClock(1_000));
        let summary = summarize(&view, &AppState::default());
        assert!(!summary.token_present);
        assert_eq!(summary.session, SessionStatus::Absent);
        assert!(summary.expires_in.is_none());
        assert!(summary.claims.is_none());

        let value = serde_json::to_value(&summary).unwrap();
        assert!(value.get("claims").is_none());
    }
}
