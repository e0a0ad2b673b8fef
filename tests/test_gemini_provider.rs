use culinary_vision::{
    AppConfig, GeminiProvider, ImagePayload, RecipeError, RecipeGenerator, Settings,
};
use mockito::Matcher;
use serde_json::json;

const ENDPOINT: &str = "/v1beta/models/gemini-2.5-flash:generateContent";

fn provider_for(base_url: String) -> GeminiProvider {
    let settings = Settings::from_config(AppConfig {
        api_key: Some("test-key".to_string()),
        base_url,
        ..AppConfig::default()
    })
    .unwrap();
    GeminiProvider::new(&settings).unwrap()
}

fn image() -> ImagePayload {
    ImagePayload::from_bytes(b"fake jpeg bytes", "image/jpeg")
}

fn gemini_body(text: &str) -> String {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }],
        "modelVersion": "gemini-2.5-flash"
    })
    .to_string()
}

#[tokio::test]
async fn test_veggie_stir_fry_example() {
    let mut server = mockito::Server::new_async().await;
    let recipe_json = r#"[{"name":"Veggie Stir Fry","prepTime":"20 minutes","ingredients":["1 cup broccoli","2 tbsp soy sauce"],"instructions":["Chop broccoli","Stir fry 5 minutes"]}]"#;

    let mock = server
        .mock("POST", ENDPOINT)
        .match_header("x-goog-api-key", "test-key")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(gemini_body(recipe_json))
        .create_async()
        .await;

    let recipes = provider_for(server.url())
        .generate_recipes(&image(), "")
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(recipes.len(), 1);
    assert_eq!(recipes[0].name, "Veggie Stir Fry");
    assert_eq!(recipes[0].prep_time, "20 minutes");
    assert_eq!(recipes[0].ingredients.len(), 2);
    assert_eq!(
        recipes[0].instructions,
        vec!["Chop broccoli", "Stir fry 5 minutes"]
    );
}

#[tokio::test]
async fn test_request_carries_image_prompt_and_schema() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", ENDPOINT)
        .match_body(Matcher::AllOf(vec![
            Matcher::PartialJson(json!({
                "contents": [{
                    "parts": [{
                        "inlineData": {
                            "mimeType": "image/jpeg",
                            "data": image().data
                        }
                    }]
                }],
                "generationConfig": {
                    "responseMimeType": "application/json",
                    "responseSchema": { "type": "ARRAY" }
                }
            })),
            Matcher::Regex(r#"Dietary restrictions: \\"vegan, nut-free\\""#.to_string()),
        ]))
        .with_status(200)
        .with_body(gemini_body("[]"))
        .create_async()
        .await;

    let recipes = provider_for(server.url())
        .generate_recipes(&image(), "vegan, nut-free")
        .await
        .unwrap();

    mock.assert_async().await;
    assert!(recipes.is_empty());
}

#[tokio::test]
async fn test_many_recipes_keep_order() {
    let mut server = mockito::Server::new_async().await;
    let recipes: Vec<_> = (1..=4)
        .map(|i| {
            json!({
                "name": format!("Recipe {}", i),
                "prepTime": format!("{} minutes", i * 10),
                "ingredients": [format!("{} eggs", i)],
                "instructions": ["Crack", "Cook"]
            })
        })
        .collect();

    let _m = server
        .mock("POST", ENDPOINT)
        .with_status(200)
        .with_body(gemini_body(&serde_json::to_string(&recipes).unwrap()))
        .create_async()
        .await;

    let result = provider_for(server.url())
        .generate_recipes(&image(), "")
        .await
        .unwrap();

    let names: Vec<&str> = result.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Recipe 1", "Recipe 2", "Recipe 3", "Recipe 4"]);
    assert_eq!(result[3].prep_time, "40 minutes");
    assert_eq!(result[2].ingredients, vec!["3 eggs"]);
}

#[tokio::test]
async fn test_blank_text_is_empty_result() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("POST", ENDPOINT)
        .with_status(200)
        .with_body(gemini_body("  \n  "))
        .create_async()
        .await;

    let recipes = provider_for(server.url())
        .generate_recipes(&image(), "")
        .await
        .unwrap();
    assert!(recipes.is_empty());
}

#[tokio::test]
async fn test_non_json_text_is_generation_error() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("POST", ENDPOINT)
        .with_status(200)
        .with_body(gemini_body("I only see a cat."))
        .create_async()
        .await;

    let err = provider_for(server.url())
        .generate_recipes(&image(), "")
        .await
        .unwrap_err();

    assert!(matches!(err, RecipeError::Generation(_)));
    assert!(err.to_string().starts_with("Failed to generate recipes: "));
    assert!(err.to_string().contains("not valid JSON"));
}

#[tokio::test]
async fn test_schema_mismatch_is_not_partial() {
    let mut server = mockito::Server::new_async().await;
    let body = r#"[
        {"name":"Omelette","prepTime":"10 minutes","ingredients":["2 eggs"],"instructions":["Whisk","Fry"]},
        {"name":"Salad","prepTime":"5 minutes","ingredients":"lettuce","instructions":["Toss"]}
    ]"#;
    let _m = server
        .mock("POST", ENDPOINT)
        .with_status(200)
        .with_body(gemini_body(body))
        .create_async()
        .await;

    let err = provider_for(server.url())
        .generate_recipes(&image(), "")
        .await
        .unwrap_err();
    assert!(err.to_string().contains("recipe 1"));
}

#[tokio::test]
async fn test_api_error_single_attempt() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", ENDPOINT)
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "error": {
                    "code": 400,
                    "message": "API key not valid. Please pass a valid API key.",
                    "status": "INVALID_ARGUMENT"
                }
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    let err = provider_for(server.url())
        .generate_recipes(&image(), "")
        .await
        .unwrap_err();

    mock.assert_async().await;
    assert_eq!(
        err.to_string(),
        "Failed to generate recipes: Gemini API error (400): API key not valid. Please pass a valid API key."
    );
}

#[tokio::test]
async fn test_server_error_with_plain_body() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("POST", ENDPOINT)
        .with_status(503)
        .with_body("upstream unavailable")
        .create_async()
        .await;

    let err = provider_for(server.url())
        .generate_recipes(&image(), "")
        .await
        .unwrap_err();
    let message = err.to_string();
    assert!(message.contains("503"));
    assert!(message.contains("upstream unavailable"));
}

#[tokio::test]
async fn test_blocked_prompt() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("POST", ENDPOINT)
        .with_status(200)
        .with_body(json!({ "promptFeedback": { "blockReason": "SAFETY" } }).to_string())
        .create_async()
        .await;

    let err = provider_for(server.url())
        .generate_recipes(&image(), "")
        .await
        .unwrap_err();
    assert!(err.to_string().contains("SAFETY"));
}

#[tokio::test]
async fn test_transport_error_is_wrapped() {
    // Nothing listens on port 1
    let err = provider_for("http://127.0.0.1:1".to_string())
        .generate_recipes(&image(), "")
        .await
        .unwrap_err();

    assert!(matches!(err, RecipeError::Generation(_)));
    assert!(err.to_string().starts_with("Failed to generate recipes: "));
}
