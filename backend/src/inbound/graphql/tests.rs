//! Schema-level tests running resolvers against in-memory adapters.

use std::sync::Arc;

use async_graphql::Request;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use super::*;
use crate::domain::AccountService;
use crate::domain::ports::TokenIssuer;
use crate::outbound::memory::InMemoryUserRepository;
use crate::outbound::security::{BcryptPasswordHasher, JwtSecret, JwtTokenIssuer};

const SECRET: &[u8] = b"0123456789abcdef0123456789abcdef";

const SIGNUP: &str = r#"mutation {
    signup(email: "a@b.com", password: "pw123456", name: "A") { token user { id name email } }
}"#;

struct Harness {
    schema: AppSchema,
    factory: ContextFactory,
    tokens: Arc<JwtTokenIssuer>,
}

impl Harness {
    async fn run(&self, query: &str, authorization: Option<&str>) -> Value {
        let context = self.factory.build(authorization).await;
        let response = self.schema.execute(Request::new(query).data(context)).await;
        serde_json::to_value(&response).expect("response serializes")
    }
}

#[fixture]
fn harness() -> Harness {
    let tokens = Arc::new(JwtTokenIssuer::new(&JwtSecret::new(SECRET)));
    let accounts = AccountService::new(
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(BcryptPasswordHasher::with_cost(4)),
        tokens.clone(),
    );
    Harness {
        schema: build_schema(),
        factory: ContextFactory::new(accounts),
        tokens,
    }
}

fn error_code(response: &Value) -> &Value {
    &response["errors"][0]["extensions"]["code"]
}

#[rstest]
fn sdl_matches_public_surface() {
    let sdl = build_schema().sdl();
    for expected in [
        "info: String!",
        "feed: [Post!]!",
        "me: User!",
        "post(url: String!, description: String!): Post!",
        "signup(email: String!, password: String!, name: String!): AuthPayload",
        "login(email: String!, password: String!): AuthPayload",
        "token: String\n",
        "user: User\n",
        "posts: [Post!]!",
    ] {
        assert!(sdl.contains(expected), "missing `{expected}` in:\n{sdl}");
    }
    assert!(!sdl.contains("type Subscription"));
}

#[rstest]
#[tokio::test]
async fn info_greets(harness: Harness) {
    let response = harness.run("{ info }", None).await;
    assert_eq!(response["data"], json!({ "info": "Hello World!" }));
}

#[rstest]
#[tokio::test]
async fn signup_then_login_returns_same_user(harness: Harness) {
    let signup = harness.run(SIGNUP, None).await;
    let user = &signup["data"]["signup"]["user"];
    assert_eq!(user["name"], json!("A"));
    assert_eq!(user["email"], json!("a@b.com"));
    let signup_token = signup["data"]["signup"]["token"].as_str().expect("token");

    let login = harness
        .run(
            r#"mutation { login(email: "a@b.com", password: "pw123456") { token user { id } } }"#,
            None,
        )
        .await;
    assert_eq!(login["data"]["login"]["user"]["id"], user["id"]);
    let login_token = login["data"]["login"]["token"].as_str().expect("token");

    for token in [signup_token, login_token] {
        let verified = harness.tokens.verify(token).expect("token verifies");
        assert_eq!(json!(verified.to_string()), user["id"]);
    }
}

#[rstest]
#[tokio::test]
async fn me_resolves_bearer_user(harness: Harness) {
    let signup = harness.run(SIGNUP, None).await;
    let token = signup["data"]["signup"]["token"].as_str().expect("token");

    let me = harness
        .run("{ me { id email } }", Some(&format!("Bearer {token}")))
        .await;
    assert_eq!(me["data"]["me"]["id"], signup["data"]["signup"]["user"]["id"]);
    assert_eq!(me["data"]["me"]["email"], json!("a@b.com"));
}

#[rstest]
#[case(None)]
#[case(Some("Bearer"))]
#[case(Some("Token abc"))]
#[case(Some("Bearer not-a-jwt"))]
#[tokio::test]
async fn me_without_valid_token_is_unauthenticated(
    harness: Harness,
    #[case] authorization: Option<&str>,
) {
    let response = harness.run("{ me { id } }", authorization).await;
    assert_eq!(response["data"], Value::Null);
    assert_eq!(error_code(&response), &json!("UNAUTHENTICATED"));
}

#[rstest]
#[tokio::test]
async fn token_for_unknown_user_is_anonymous(harness: Harness) {
    let stranger = harness
        .tokens
        .issue(&crate::domain::UserId::random())
        .expect("issue");
    let response = harness
        .run("{ me { id } }", Some(&format!("Bearer {stranger}")))
        .await;
    assert_eq!(error_code(&response), &json!("UNAUTHENTICATED"));
}

#[rstest]
#[tokio::test]
async fn duplicate_signup_is_conflict(harness: Harness) {
    harness.run(SIGNUP, None).await;
    let response = harness.run(SIGNUP, None).await;
    assert_eq!(response["data"], Value::Null);
    assert_eq!(error_code(&response), &json!("CONFLICT"));
}

#[rstest]
#[case("nope", "pw", "A")]
#[case("a@b.com", "", "A")]
#[case("a@b.com", "pw", " ")]
#[case(" a@b.com ", "pw", "A")]
#[tokio::test]
async fn signup_stores_any_string_arguments(
    harness: Harness,
    #[case] email: &str,
    #[case] password: &str,
    #[case] name: &str,
) {
    let arguments = json!({ "email": email, "password": password, "name": name });
    let response = harness
        .run(
            &format!(
                "mutation {{ signup(email: {}, password: {}, name: {}) {{ token user {{ name email }} }} }}",
                arguments["email"], arguments["password"], arguments["name"]
            ),
            None,
        )
        .await;
    assert!(response.get("errors").is_none(), "unexpected errors: {response}");
    let payload = &response["data"]["signup"];
    assert!(payload["token"].is_string());
    assert_eq!(payload["user"]["email"], json!(email));
    assert_eq!(payload["user"]["name"], json!(name));
}

#[rstest]
#[tokio::test]
async fn login_does_not_trim_email(harness: Harness) {
    harness.run(SIGNUP, None).await;
    let response = harness
        .run(
            r#"mutation { login(email: " a@b.com", password: "pw123456") { token } }"#,
            None,
        )
        .await;
    assert_eq!(error_code(&response), &json!("NOT_FOUND"));
}

#[rstest]
#[tokio::test]
async fn login_unknown_email_is_not_found(harness: Harness) {
    let response = harness
        .run(
            r#"mutation { login(email: "nobody@x.io", password: "pw") { token } }"#,
            None,
        )
        .await;
    assert_eq!(error_code(&response), &json!("NOT_FOUND"));
    assert_eq!(response["errors"][0]["message"], json!("no such user found"));
}

#[rstest]
#[tokio::test]
async fn login_wrong_password_is_unauthenticated(harness: Harness) {
    harness.run(SIGNUP, None).await;
    let response = harness
        .run(
            r#"mutation { login(email: "a@b.com", password: "wrong") { token } }"#,
            None,
        )
        .await;
    assert_eq!(error_code(&response), &json!("UNAUTHENTICATED"));
    assert_eq!(response["errors"][0]["message"], json!("invalid password"));
}

#[rstest]
#[case("{ feed { id } }")]
#[case(r#"mutation { post(url: "u", description: "d") { id } }"#)]
#[tokio::test]
async fn unimplemented_fields_report_code(harness: Harness, #[case] query: &str) {
    let response = harness.run(query, None).await;
    assert_eq!(error_code(&response), &json!("NOT_IMPLEMENTED"));
}

#[rstest]
#[tokio::test]
async fn user_posts_is_not_implemented(harness: Harness) {
    let signup = harness.run(SIGNUP, None).await;
    let token = signup["data"]["signup"]["token"].as_str().expect("token");
    let response = harness
        .run("{ me { posts { id } } }", Some(&format!("Bearer {token}")))
        .await;
    assert_eq!(error_code(&response), &json!("NOT_IMPLEMENTED"));
}
