//! Live conversation API tests.
//!
//! Require the `api` feature, `ELEVENLABS_API_KEY` and a finished
//! conversation id in `VIEWFINDER_TEST_CONVERSATION_ID`.

use viewfinder_core::ConversationStatus;
use viewfinder_interface::ConversationSource;
use viewfinder_models::ConversationClient;

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
async fn test_fetch_finished_conversation() {
    let _ = dotenvy::dotenv();
    let client = ConversationClient::new().expect("ELEVENLABS_API_KEY must be set");
    let id = std::env::var("VIEWFINDER_TEST_CONVERSATION_ID")
        .expect("VIEWFINDER_TEST_CONVERSATION_ID must be set");

    let record = client.get(&id).await.expect("fetch should succeed");

    assert_eq!(record.conversation_id, id);
    assert_eq!(record.status, ConversationStatus::Done);
    assert!(record.transcript().usable_turns().count() > 0);
}

#[tokio::test]
async fn test_unreachable_service_is_an_error() {
    let client = ConversationClient::with_api_key("key")
        .unwrap()
        .with_base_url("http://127.0.0.1:9");

    assert!(client.get("conv_1").await.is_err());
}
