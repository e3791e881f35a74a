//! Smoke tests through the facade crate

use cirrus::{EncodedImage, ImageInput, Signature, encode_image, filter_params, make_batch, to_options};
use serde_json::json;

#[test]
fn test_one_option_map_serves_several_targets() {
    let options = to_options(json!({
        "region": "us-east5",
        "model": "claude-sonnet-4@20250514",
        "max_tokens": 64
    }))
    .unwrap();

    let client = Signature::new("client", cirrus::config::CONSTRUCTOR_PARAMS);
    let create = cirrus::llm::CREATE_SIGNATURE;

    let for_client = filter_params(&client, &options).unwrap();
    let for_create = filter_params(&create, &options).unwrap();
    assert_eq!(for_client.keys().collect::<Vec<_>>(), vec!["region"]);
    assert_eq!(for_create.len(), 2);
}

#[test]
fn test_utilities_through_facade() {
    let windows: Vec<_> = make_batch(&[1, 2, 3, 4, 5], 2, 1).unwrap().collect();
    assert_eq!(windows.len(), 4);

    let encoded = encode_image(&ImageInput::Bytes(b"hi".to_vec()), true).unwrap();
    assert_eq!(encoded, EncodedImage::Text("aGk=".to_string()));
}

#[tokio::test]
async fn test_async_adapter_reports_missing_token() {
    let options = to_options(json!({
        "region": "us-east5",
        "project_id": "p",
        "base_url": "https://us-east5-aiplatform.googleapis.com/v1"
    }))
    .unwrap();
    let client: cirrus::ClaudeVertexClient = cirrus::ClaudeVertexClient::new(&options).unwrap();

    let err = client
        .generate_message_async(
            &to_options(json!({
                "model": "claude",
                "max_tokens": 8,
                "messages": [{"role": "user", "content": "Hi"}]
            }))
            .unwrap(),
        )
        .await
        .unwrap_err();
    assert!(err.is_configuration());
    assert!(err.to_string().contains("access_token"));
}
