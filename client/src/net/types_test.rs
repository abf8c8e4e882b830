use super::*;

#[test]
fn credentials_debug_redacts_password() {
    let rendered = format!("{:?}", Credentials::new("ana", "hunter2"));
    assert!(rendered.contains("ana"));
    assert!(!rendered.contains("hunter2"));
}

#[test]
fn token_response_defaults_token_type() {
    let token: TokenResponse = serde_json::from_str(r#"{"access_token":"abc"}"#).unwrap();
    assert_eq!(token.access_token, "abc");
    assert_eq!(token.token_type, "bearer");
}

#[test]
fn user_tolerates_missing_created_at() {
    let user: User = serde_json::from_str(r#"{"id":7,"username":"ana"}"#).unwrap();
    assert_eq!(user, User { id: 7, username: "ana".to_owned(), created_at: None });
}

#[test]
fn ai_model_parses_case_insensitively() {
    assert_eq!("Claude".parse::<AiModel>().unwrap(), AiModel::Claude);
    assert_eq!(" deepseek ".parse::<AiModel>().unwrap(), AiModel::Deepseek);
    assert!("gemini".parse::<AiModel>().unwrap_err().contains("unknown model"));
    assert_eq!(AiModel::Openai.to_string(), "openai");
}

#[test]
fn photo_analysis_decodes_server_shape() {
    let raw = r#"{
        "id": 12,
        "filename": "dunes.jpg",
        "thumbnail": "data:image/jpeg;base64,AAAA",
        "image_data": null,
        "scores": {"technical": 71, "composition": 80, "aesthetic": 77, "narrative": 64},
        "overall_score": 74,
        "analysis": {"highlights": ["leading lines"], "improvements": [], "suggestions": ["lower ISO"]},
        "model_used": "deepseek",
        "created_at": "2025-03-01T10:20:30"
    }"#;
    let photo: PhotoAnalysis = serde_json::from_str(raw).unwrap();
    assert_eq!(photo.id, 12);
    assert_eq!(photo.scores.composition, 80);
    assert_eq!(photo.analysis.highlights, vec!["leading lines".to_owned()]);
    assert_eq!(photo.image_data, None);
}

#[test]
fn photo_page_decodes_items_with_missing_scores() {
    let raw = r#"{"total": 1, "items": [
        {"id": 3, "filename": "a.png", "thumbnail": null, "overall_score": null, "created_at": "2025-01-01T00:00:00"}
    ]}"#;
    let page: PhotoPage = serde_json::from_str(raw).unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].overall_score, None);
}

#[test]
fn history_query_defaults_to_first_page_of_ten() {
    assert_eq!(HistoryQuery::default(), HistoryQuery::new(1, 10));
    assert_eq!(
        serde_json::to_value(HistoryQuery::new(2, 20)).unwrap(),
        serde_json::json!({ "page": 2, "page_size": 20 })
    );
}
