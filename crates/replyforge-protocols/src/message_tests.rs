use super::*;
use crate::types::{Preferences, ReplyLength, Tone};

fn bundle() -> UserProfileBundle {
    UserProfileBundle {
        profile: StyleProfile::new("Concise and curious", "balanced"),
        preferences: Preferences::new(Tone::Witty, ReplyLength::Short),
        api_key: "gsk_test".to_string(),
    }
}

#[test]
fn test_generate_reply_wire_shape() {
    let msg = RequestMessage::GenerateReply {
        context: ConversationContext::new("AI will change everything", "jdoe"),
        user_profile: bundle(),
    };
    let json = serde_json::to_value(&msg).unwrap();
    assert_eq!(json["action"], "generateReply");
    assert_eq!(json["context"]["tweetText"], "AI will change everything");
    assert_eq!(json["userProfile"]["profile"]["bio"], "Concise and curious");
    assert_eq!(json["userProfile"]["preferences"]["tone"], "witty");
    assert_eq!(json["userProfile"]["apiKey"], "gsk_test");
}

#[test]
fn test_reload_config_parses_from_bare_action() {
    let msg: RequestMessage =
        serde_json::from_value(serde_json::json!({"action": "reloadConfig"})).unwrap();
    assert_eq!(msg, RequestMessage::ReloadConfig {});
    assert_eq!(msg.action(), ACTION_RELOAD_CONFIG);
}

#[test]
fn test_analyze_profile_defaults() {
    let msg: RequestMessage =
        serde_json::from_value(serde_json::json!({"action": "analyzeProfile"})).unwrap();
    match msg {
        RequestMessage::AnalyzeProfile { tweets, bio } => {
            assert!(tweets.is_empty());
            assert!(bio.is_none());
        }
        other => panic!("unexpected message: {:?}", other),
    }
}

#[test]
fn test_unknown_action_is_rejected() {
    let result =
        serde_json::from_value::<RequestMessage>(serde_json::json!({"action": "openSettings"}));
    assert!(result.is_err());
    assert!(!RequestMessage::is_known_action("openSettings"));
    assert!(RequestMessage::is_known_action("generateReply"));
}

#[test]
fn test_response_shapes() {
    assert_eq!(
        serde_json::to_value(ResponseMessage::reply("Bet it already has 👀")).unwrap(),
        serde_json::json!({"reply": "Bet it already has 👀"})
    );
    assert_eq!(
        serde_json::to_value(ResponseMessage::error("boom")).unwrap(),
        serde_json::json!({"error": "boom"})
    );
    assert_eq!(
        serde_json::to_value(ResponseMessage::success(true)).unwrap(),
        serde_json::json!({"success": true})
    );
}

#[test]
fn test_response_tolerates_empty_object() {
    let response: ResponseMessage = serde_json::from_value(serde_json::json!({})).unwrap();
    assert_eq!(response, ResponseMessage::default());
}
