//! `/graphql` endpoint.
//!
//! ```text
//! GET  /graphql  (Accept: text/html, no `query`)  -> GraphiQL page
//! GET  /graphql?query=...                         -> execute
//! POST /graphql  {"query": "...", "variables": {}} -> execute
//! ```
//!
//! Execution errors never change the HTTP status; they travel in the
//! response body's `errors` array.

use actix_web::guard::{self, GuardContext};
use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, Resource, web};
use async_graphql::http::GraphiQLSource;
use async_graphql_actix_web::{GraphQLBatchRequest, GraphQLResponse};
use tracing::debug;

use super::state::HttpState;

/// Path the endpoint is mounted on; GraphiQL posts back to it.
pub const GRAPHQL_PATH: &str = "/graphql";

/// Build the `/graphql` resource with the GraphiQL route ahead of execution.
pub fn graphql_resource() -> Resource {
    web::resource(GRAPHQL_PATH)
        .route(
            web::get()
                .guard(guard::fn_guard(wants_graphiql))
                .to(graphiql),
        )
        .route(web::route().to(graphql))
}

/// Execute a single or batched GraphQL request.
pub async fn graphql(
    state: web::Data<HttpState>,
    req: HttpRequest,
    batch: GraphQLBatchRequest,
) -> GraphQLResponse {
    let authorization = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    let context = state.contexts.build(authorization).await;
    state
        .schema
        .execute_batch(batch.into_inner().data(context))
        .await
        .into()
}

/// Serve the GraphiQL IDE.
pub async fn graphiql() -> HttpResponse {
    debug!("serving GraphiQL");
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(GraphiQLSource::build().endpoint(GRAPHQL_PATH).finish())
}

/// Browsers navigating to the endpoint get the IDE; anything carrying a
/// `query` parameter is an operation.
fn wants_graphiql(ctx: &GuardContext<'_>) -> bool {
    let accepts_html = ctx
        .head()
        .headers()
        .get(header::ACCEPT)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"));
    let has_query = ctx.head().uri.query().is_some_and(|query| {
        query
            .split('&')
            .any(|pair| pair == "query" || pair.starts_with("query="))
    });
    accepts_html && !has_query
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;
    use rstest::rstest;

    #[rstest]
    #[case("/graphql", Some("text/html,application/xhtml+xml"), true)]
    #[case("/graphql", Some("application/json"), false)]
    #[case("/graphql", None, false)]
    #[case("/graphql?query=%7Binfo%7D", Some("text/html"), false)]
    #[case("/graphql?queryish=1", Some("text/html"), true)]
    fn graphiql_guard(#[case] uri: &str, #[case] accept: Option<&str>, #[case] expected: bool) {
        let mut request = TestRequest::get().uri(uri);
        if let Some(accept) = accept {
            request = request.insert_header((header::ACCEPT, accept));
        }
        let request = request.to_srv_request();
        assert_eq!(wants_graphiql(&request.guard_ctx()), expected);
    }
}
